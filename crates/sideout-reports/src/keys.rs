//! Object-store key layout for match reports.
//!
//! Three key families carry all report state:
//!
//! - data keys hold the full report body. The key embeds an inverted
//!   creation timestamp, so the store's native lexicographic listing walks
//!   reports newest-first with no sort step.
//! - index keys map a match id to its data key, since the data key's
//!   timestamp half is unknowable from the id alone.
//! - signature keys hold one entry per match signature and act as the
//!   uniqueness gate for duplicate submissions.

use sideout_types::MatchId;

/// Prefix for full report documents.
pub const DATA_PREFIX: &str = "match-reports/data/";

/// Prefix for matchId-to-data-key index entries.
pub const INDEX_PREFIX: &str = "match-reports/by-match-id/";

/// Prefix for signature reservation entries.
pub const SIGNATURE_PREFIX: &str = "match-reports/by-signature/";

/// Largest representable key timestamp: 13 decimal digits of Unix millis,
/// good until the year 2286.
pub const MAX_UNIX_MILLIS: i64 = 9_999_999_999_999;

/// Key for a report body created at `created_at_millis` (Unix millis).
///
/// The timestamp is stored inverted (`MAX_UNIX_MILLIS - millis`) and
/// zero-padded to a fixed 13 digits, which makes byte order on the prefix
/// equal to descending creation time. The match id suffix keeps keys unique
/// when two reports land on the same millisecond.
pub fn data_key(created_at_millis: i64, match_id: &MatchId) -> String {
    let inverted = MAX_UNIX_MILLIS - created_at_millis;
    format!("{DATA_PREFIX}{inverted:013}_{match_id}.json")
}

/// Key for the id-to-data-key index entry of `match_id`.
pub fn index_key(match_id: &MatchId) -> String {
    format!("{INDEX_PREFIX}{match_id}.json")
}

/// Key for the reservation entry of `signature`.
pub fn signature_key(signature: &str) -> String {
    format!("{SIGNATURE_PREFIX}{signature}.json")
}
