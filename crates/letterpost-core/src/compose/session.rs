//! Session lifecycle logic.
//!
//! The `Session` struct lives in `letterpost-types`; this module provides
//! the constructor and an extension trait (`SessionExt`) that records one
//! submission per step and reports completeness.

use chrono::Utc;
use letterpost_types::error::ComposeError;
use letterpost_types::letter::Step;
use letterpost_types::session::{OwnerId, Session, Submission};

use super::template::Template;

/// Create a fresh session for `owner` at the first step.
pub fn new_session(owner: OwnerId) -> Session {
    let now = Utc::now();
    Session {
        owner,
        fields: Template.fields(),
        step: Step::FIRST,
        started_at: now,
        updated_at: now,
    }
}

/// Extension trait for `Session` step handling.
pub trait SessionExt {
    /// Record the submission for the current step and advance.
    ///
    /// Returns the step the session moved to. Fails with
    /// `SessionAlreadyTerminal` once every field has been visited.
    fn record(&mut self, submission: Submission) -> Result<Step, ComposeError>;

    /// Whether all seven fields have been visited.
    fn is_complete(&self) -> bool;
}

impl SessionExt for Session {
    fn record(&mut self, submission: Submission) -> Result<Step, ComposeError> {
        let name = self
            .step
            .field()
            .ok_or(ComposeError::SessionAlreadyTerminal(self.owner))?;

        if let Some(field) = self.field_mut(name) {
            field.value = match submission {
                Submission::Skip => None,
                Submission::Text(text) => Some(text),
            };
        }

        self.step = self.step.next();
        self.updated_at = Utc::now();
        Ok(self.step)
    }

    fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use letterpost_types::letter::FieldName;

    use super::*;

    #[test]
    fn test_new_session_starts_at_first_step() {
        let session = new_session(OwnerId(1));
        assert_eq!(session.step, Step::Address1);
        assert_eq!(session.fields.len(), 7);
        assert!(!session.is_complete());
        assert_eq!(session.step.field(), Some(FieldName::Address1));
    }

    #[test]
    fn test_record_text_sets_value_and_advances() {
        let mut session = new_session(OwnerId(1));
        let next = session
            .record(Submission::Text("123 Main St".to_string()))
            .unwrap();

        assert_eq!(next, Step::Address2);
        let field = session.field(FieldName::Address1).unwrap();
        assert_eq!(field.value.as_deref(), Some("123 Main St"));
        assert!(field.is_provided());
    }

    #[test]
    fn test_record_skip_leaves_field_absent() {
        let mut session = new_session(OwnerId(1));
        session.record(Submission::Skip).unwrap();

        assert_eq!(session.step, Step::Address2);
        assert!(!session.field(FieldName::Address1).unwrap().is_provided());
    }

    #[test]
    fn test_record_keeps_text_verbatim() {
        let mut session = new_session(OwnerId(1));
        let long = "x".repeat(10_000);
        session.record(Submission::Text(long.clone())).unwrap();
        session.record(Submission::Text(String::new())).unwrap();

        assert_eq!(session.field(FieldName::Address1).unwrap().value, Some(long));
        // Empty text is still provided content.
        assert_eq!(
            session.field(FieldName::Address2).unwrap().value.as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_record_after_last_field_is_terminal() {
        let mut session = new_session(OwnerId(5));
        for _ in 0..7 {
            session.record(Submission::Skip).unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.step.field(), None);

        let err = session.record(Submission::Skip).unwrap_err();
        assert!(matches!(err, ComposeError::SessionAlreadyTerminal(OwnerId(5))));
    }
}
