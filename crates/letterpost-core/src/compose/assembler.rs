//! DocumentAssembler -- turns a completed session into the final `Document`.
//!
//! Section elision is all-or-nothing: a section whose members were all
//! skipped disappears entirely, and a section with at least one provided
//! member keeps every member (skipped ones as `None`). Fields outside any
//! section are always kept. Emptiness is evaluated over all members after
//! collection has finished, never while fields are still being visited.

use letterpost_types::document::Document;
use letterpost_types::error::ComposeError;
use letterpost_types::letter::{Field, SectionName};
use letterpost_types::session::Session;

use super::session::SessionExt;

/// Whether every member of `section` is absent in `fields`.
///
/// A member missing from `fields` altogether counts as absent.
pub fn is_section_empty(fields: &[Field], section: SectionName) -> bool {
    section.members().iter().all(|member| {
        fields
            .iter()
            .find(|f| f.name == *member)
            .is_none_or(|f| !f.is_provided())
    })
}

/// Stateless utility that assembles a `Document` from a completed session.
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Assemble the document for `session`.
    ///
    /// Fails with `IncompleteSession` unless every field has been visited.
    pub fn assemble(session: &Session) -> Result<Document, ComposeError> {
        if !session.is_complete() {
            return Err(ComposeError::IncompleteSession {
                owner: session.owner,
                step: session.step,
            });
        }

        let elided: Vec<SectionName> = SectionName::ALL
            .into_iter()
            .filter(|section| !section.is_required() && is_section_empty(&session.fields, *section))
            .collect();

        let retained = session
            .fields
            .iter()
            .filter(|field| match field.name.section() {
                Some(section) => !elided.contains(&section),
                None => true,
            })
            .cloned()
            .collect();

        Ok(Document::from_retained(session.owner, retained))
    }
}
