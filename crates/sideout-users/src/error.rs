//! Error types for user-store operations.

use sideout_store::StoreError;
use sideout_types::UserId;
use thiserror::Error;

/// Errors surfaced by the user store.
#[derive(Debug, Error)]
pub enum UserError {
    /// Another account already holds this email address.
    ///
    /// Carries the existing account's id when its index entry could still
    /// be read.
    #[error("email is already registered")]
    EmailTaken {
        /// Id of the account holding the address, when known.
        user_id: Option<UserId>,
    },

    /// The underlying object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for user operations.
pub type UserResult<T> = Result<T, UserError>;
