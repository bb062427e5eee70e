//! Error types for object-store operations.

use thiserror::Error;

/// Errors that can occur while talking to an object store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A conditional write was refused because the key already holds a value.
    #[error("precondition failed: key already exists: {key}")]
    PreconditionFailed {
        /// Key the write was attempted against.
        key: String,
    },

    /// The key cannot be used with this backend.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Why the backend rejected it.
        reason: String,
    },

    /// Stored bytes could not be encoded or decoded as a JSON document.
    #[error("serialization error for key {key}: {reason}")]
    Serialization {
        /// Key whose value failed to round-trip.
        key: String,
        /// Underlying serde error message.
        reason: String,
    },

    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True when this error is a refused conditional write.
    ///
    /// Callers that reserve keys with [`crate::PutOptions::if_absent`] use
    /// this to tell "somebody else got there first" apart from real faults.
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, StoreError::PreconditionFailed { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
