//! Plain-text letter renderer.
//!
//! Writes one `.txt` file per letter into the results directory, named
//! `{author}_{uuid}.txt`. Retained fields are laid out one per line in
//! template order; a blank line follows every retained section, and the
//! closing and signature come last. Retained-but-skipped fields render as
//! empty lines so a section keeps its shape.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::Utc;
use letterpost_core::render::Renderer;
use letterpost_types::document::{ArtifactHandle, Document};
use letterpost_types::error::RenderError;
use letterpost_types::letter::FieldName;
use uuid::Uuid;

/// Characters that cannot appear in a file name on common platforms.
const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace every forbidden filename character with `-`.
pub fn sanitize_file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| if FORBIDDEN_FILENAME_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

/// Longest author label, in bytes, that goes into a file name.
const MAX_AUTHOR_BYTES: usize = 64;

/// Cut `label` to at most `max` bytes without splitting a character.
fn truncate_on_char_boundary(label: &str, max: usize) -> &str {
    if label.len() <= max {
        return label;
    }
    let end = (0..=max)
        .rev()
        .find(|i| label.is_char_boundary(*i))
        .unwrap_or(0);
    &label[..end]
}

/// Label used in the artifact's file names: the signature when provided,
/// otherwise the owner id. Capped at `MAX_AUTHOR_BYTES`.
fn author_label(document: &Document) -> String {
    match document.value(FieldName::Signature).map(str::trim) {
        Some(signature) if !signature.is_empty() => {
            let stem = sanitize_file_stem(signature);
            truncate_on_char_boundary(&stem, MAX_AUTHOR_BYTES)
                .trim_end()
                .to_string()
        }
        _ => document.owner.to_string(),
    }
}

/// Lay the document out as plain text.
pub fn layout(document: &Document) -> String {
    let mut out = String::new();
    let mut current_section = None;

    for field in document.fields() {
        let section = field.name.section();
        if current_section.is_some() && section != current_section {
            out.push('\n');
        }
        current_section = section;
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", field.value.as_deref().unwrap_or_default());
    }

    out
}

/// Renders letters as text files under `results_dir`.
pub struct TextRenderer {
    results_dir: PathBuf,
}

impl TextRenderer {
    pub fn new(results_dir: PathBuf) -> Self {
        Self { results_dir }
    }
}

impl Renderer for TextRenderer {
    async fn render(&self, document: Document) -> Result<ArtifactHandle, RenderError> {
        if document.fields().is_empty() {
            return Err(RenderError::Format("document has no fields".to_string()));
        }

        let author = author_label(&document);
        let content = layout(&document);

        tokio::fs::create_dir_all(&self.results_dir).await?;
        let path = self
            .results_dir
            .join(format!("{author}_{}.txt", Uuid::now_v7()));
        tokio::fs::write(&path, content).await?;

        tracing::debug!(path = %path.display(), "letter written");

        Ok(ArtifactHandle {
            path,
            file_name: format!("Letter from {author}.txt"),
            created_at: Utc::now(),
        })
    }
}
