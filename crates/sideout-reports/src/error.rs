//! Error types for match-report operations.

use sideout_store::StoreError;
use sideout_types::MatchId;
use thiserror::Error;

/// Errors surfaced by the report store.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A report with the same match signature already exists.
    ///
    /// Carries the id of the report holding the slot when the winning entry
    /// could still be read; a racing delete can make it `None`.
    #[error("a match report already exists for this date and team combination")]
    Duplicate {
        /// Id of the existing report, when known.
        match_id: Option<MatchId>,
    },

    /// The underlying object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReportError {
    /// True for the duplicate-slot error.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ReportError::Duplicate { .. })
    }
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
