//! Match-report persistence for the Sideout backend.
//!
//! Reports live in a flat object store under three key families: data keys
//! whose inverted-timestamp encoding makes lexicographic listing
//! newest-first, index keys for id lookup, and signature keys that emulate
//! a uniqueness constraint through atomic write-if-absent. The store runs
//! without any in-process locking; the conditional write is the only
//! coordination point, so any number of replicas can share one bucket.
//!
//! [`ReportStore`] is the entry point. Submissions arrive as
//! [`ReportPayload`], are normalized into [`StoredMatchReport`] documents,
//! and come back out as the public [`MatchReport`] shape.

pub mod error;
pub mod keys;
pub mod model;
pub mod signature;
pub mod store;

pub use error::{ReportError, ReportResult};
pub use model::{
    MatchReport, Player, PlayerPayload, ReportPayload, StatValue, StoredMatchReport, Team,
    TeamPayload,
};
pub use store::{
    DeleteOutcome, ListQuery, ReportStore, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
