use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid match id: {0}")]
    InvalidMatchId(String),

    #[error("user id must be a non-empty string")]
    EmptyUserId,
}
