//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use letterpost_types::error::ComposeError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Composition state machine errors.
    Compose(ComposeError),
    /// Validation error.
    Validation(String),
}

impl From<ComposeError> for AppError {
    fn from(e: ComposeError) -> Self {
        AppError::Compose(e)
    }
}

impl AppError {
    /// Status code and machine-readable code for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Compose(ComposeError::NoActiveSession(_)) => {
                (StatusCode::NOT_FOUND, "NO_ACTIVE_SESSION")
            }
            AppError::Compose(ComposeError::SessionAlreadyTerminal(_)) => {
                (StatusCode::CONFLICT, "SESSION_ALREADY_TERMINAL")
            }
            AppError::Compose(ComposeError::IncompleteSession { .. }) => {
                (StatusCode::CONFLICT, "INCOMPLETE_SESSION")
            }
            AppError::Compose(ComposeError::RenderingFailed(_)) => {
                (StatusCode::BAD_GATEWAY, "RENDERING_FAILED")
            }
            AppError::Compose(ComposeError::Store(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR")
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Compose(e) => e.to_string(),
            AppError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        if status.is_server_error() {
            tracing::error!(code, error = %self.message(), "request failed");
        }

        let mut response = ApiResponse::error(code, &self.message()).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use letterpost_types::error::RepositoryError;
    use letterpost_types::letter::Step;
    use letterpost_types::session::OwnerId;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ComposeError::NoActiveSession(OwnerId(1)), StatusCode::NOT_FOUND),
            (ComposeError::SessionAlreadyTerminal(OwnerId(1)), StatusCode::CONFLICT),
            (
                ComposeError::IncompleteSession {
                    owner: OwnerId(1),
                    step: Step::Body,
                },
                StatusCode::CONFLICT,
            ),
            (ComposeError::RenderingFailed("x".to_string()), StatusCode::BAD_GATEWAY),
            (
                ComposeError::Store(RepositoryError::Connection),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status().0, expected);
        }
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
