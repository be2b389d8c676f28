//! The assembled, immutable letter handed to a renderer, and the handle
//! a renderer returns for the artifact it produced.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::letter::{Field, FieldName, SectionName};
use crate::session::OwnerId;

/// Final letter structure.
///
/// Fields of elided sections are physically missing, not marked absent.
/// Retained fields that were skipped carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub owner: OwnerId,
    fields: Vec<Field>,
}

impl Document {
    /// Build a document from already-elided fields. Only the assembler
    /// should call this; it does not check section integrity.
    pub fn from_retained(owner: OwnerId, fields: Vec<Field>) -> Self {
        Self { owner, fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: FieldName) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the field survived elision.
    pub fn contains(&self, name: FieldName) -> bool {
        self.field(name).is_some()
    }

    /// The field's text, if it is retained and was provided.
    pub fn value(&self, name: FieldName) -> Option<&str> {
        self.field(name).and_then(|f| f.value.as_deref())
    }

    /// Sections with at least one retained member, in template order.
    pub fn sections(&self) -> Vec<SectionName> {
        SectionName::ALL
            .into_iter()
            .filter(|section| section.members().iter().any(|m| self.contains(*m)))
            .collect()
    }
}

/// Where a rendered artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandle {
    pub path: PathBuf,
    /// Name to present when the artifact is sent back to the owner.
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}
