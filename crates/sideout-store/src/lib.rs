//! Object storage for the Sideout backend.
//!
//! The whole system persists into a flat key/value object store. This crate
//! defines that abstraction and its two shipped backends:
//!
//! - [`Bucket`]: the async store trait (get / put / delete / list), with
//!   conditional write-if-absent as the only coordination primitive.
//! - [`InMemoryBucket`]: ordered in-memory backend for tests and ephemeral
//!   runs.
//! - [`FsBucket`]: plain-files backend for local deployments.
//! - [`DocStore`]: the JSON document codec the higher layers use, so typed
//!   documents rather than raw bytes flow through the rest of the workspace.
//!
//! Keys are `/`-separated UTF-8 strings and listing is always lexicographic,
//! so any ordering a caller needs must be designed into its keys.

pub mod docs;
pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod traits;

pub use docs::{DocStore, JSON_CONTENT_TYPE};
pub use error::{StoreError, StoreResult};
pub use fs::FsBucket;
pub use memory::InMemoryBucket;
pub use object::{ObjectMeta, PutOptions, WriteMode};
pub use traits::Bucket;
