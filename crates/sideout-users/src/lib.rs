//! User records for the Sideout backend.
//!
//! Users are stored one document per key with a secondary email index,
//! the same layout the match-report store uses: the index entry is written
//! conditionally and doubles as the uniqueness gate on addresses. Password
//! hashing and token signing live outside this crate; records carry the
//! hash and salt as opaque strings and [`StoredUser::sanitized`] strips
//! them before anything is served.

pub mod error;
pub mod model;
pub mod store;

pub use error::{UserError, UserResult};
pub use model::{
    normalize_player_number, NewUser, PlayerNumberError, PublicUser, StoredUser, TeamHistoryEntry,
};
pub use store::{UserStore, EMAIL_INDEX_PREFIX, RECORD_PREFIX};
