use thiserror::Error;

use crate::letter::Step;
use crate::session::OwnerId;

/// Errors raised while driving a composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Content arrived for an owner that never began (or already ended) a composition.
    #[error("no active composition for owner {0}")]
    NoActiveSession(OwnerId),

    #[error("composition for owner {0} has already collected every field")]
    SessionAlreadyTerminal(OwnerId),

    #[error("composition for owner {owner} is incomplete (waiting on {step})")]
    IncompleteSession { owner: OwnerId, step: Step },

    /// The renderer failed. The session is gone; the owner must begin again.
    #[error("rendering failed: {0}")]
    RenderingFailed(String),

    #[error("session store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Errors from session and progress store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by a renderer while producing an artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot format document: {0}")]
    Format(String),
}

impl From<RenderError> for ComposeError {
    fn from(e: RenderError) -> Self {
        ComposeError::RenderingFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_error_display() {
        let err = ComposeError::IncompleteSession {
            owner: OwnerId(3),
            step: Step::Address1,
        };
        assert_eq!(
            err.to_string(),
            "composition for owner 3 is incomplete (waiting on address_line1)"
        );
    }

    #[test]
    fn test_render_error_maps_to_rendering_failed() {
        let err: ComposeError = RenderError::Format("empty".to_string()).into();
        assert!(matches!(err, ComposeError::RenderingFailed(ref msg) if msg.contains("empty")));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
