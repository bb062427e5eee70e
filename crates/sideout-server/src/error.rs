//! Server error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::json;
use sideout_types::MatchId;
use thiserror::Error;

/// One offending field in a rejected payload.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Path of the field, such as `teams[0].players[1].name`.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while serving requests, each mapping to one HTTP status.
///
/// Internal causes are logged where they occur; the strings carried here
/// are the client-facing messages.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{message}")]
    Duplicate {
        message: String,
        match_id: Option<MatchId>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] sideout_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

impl ServerError {
    /// The stock 401 for requests with no usable credentials.
    pub fn auth_required() -> Self {
        Self::Unauthorized("Authentication required".to_string())
    }
}

impl From<sideout_reports::ReportError> for ServerError {
    fn from(err: sideout_reports::ReportError) -> Self {
        match err {
            sideout_reports::ReportError::Duplicate { match_id } => Self::Duplicate {
                message: "A match report already exists for this date and team combination"
                    .to_string(),
                match_id,
            },
            sideout_reports::ReportError::Store(err) => Self::Store(err),
        }
    }
}

impl From<sideout_users::UserError> for ServerError {
    fn from(err: sideout_users::UserError) -> Self {
        match err {
            sideout_users::UserError::Store(err) => Self::Store(err),
            // No handler registers users, so a conflict reaching this
            // conversion is a programming error; treat it as internal.
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            ServerError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, json!({ "message": message }))
            }
            ServerError::NotFound(message) => {
                (StatusCode::NOT_FOUND, json!({ "message": message }))
            }
            ServerError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "errors": errors }),
            ),
            ServerError::Duplicate { message, match_id } => (
                StatusCode::CONFLICT,
                json!({ "message": message, "matchId": match_id }),
            ),
            ServerError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": message }))
            }
            // Startup-flavored errors; if one ever reaches a response, hide
            // the detail.
            ServerError::Config(_) | ServerError::Store(_) | ServerError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_variants() {
        let cases: Vec<(ServerError, StatusCode)> = vec![
            (ServerError::auth_required(), StatusCode::UNAUTHORIZED),
            (
                ServerError::Forbidden("no".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ServerError::NotFound("gone".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::Validation {
                    message: "Invalid payload".to_string(),
                    errors: vec![FieldError::new("teams", "At least one team must be provided")],
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::Duplicate {
                    message: "exists".to_string(),
                    match_id: None,
                },
                StatusCode::CONFLICT,
            ),
            (
                ServerError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn field_error_serializes_flat() {
        let err = FieldError::new("matchDate", "matchDate must be YYYY-MM-DD");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({ "field": "matchDate", "message": "matchDate must be YYYY-MM-DD" })
        );
    }
}
