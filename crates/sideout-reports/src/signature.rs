//! Match signature derivation.
//!
//! A signature identifies the real-world match a report describes: the UTC
//! calendar day plus the set of team names, normalized so that casing,
//! padding, and listing order do not matter. Reports with equal signatures
//! are the same match and must not both exist; reports with no resolvable
//! date or no usable team names have no signature and are exempt.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Parse a match date given either as a bare `YYYY-MM-DD` calendar date or
/// as a full RFC 3339 datetime. Bare dates resolve to midnight UTC;
/// datetimes keep their instant and are converted to UTC.
///
/// Fresh submissions carry the bare form, while stored documents carry the
/// full form, so signature recomputation at delete time sees the datetime
/// this function produced at create time.
pub fn parse_match_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Utc
            .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
            .single();
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn normalize_team_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Derive the signature for a match, or `None` when the report is exempt
/// from the uniqueness constraint.
///
/// Shape: `{date}__{name}__{name}...` with the UTC date as `YYYY-MM-DD` and
/// team names trimmed, lowercased, and sorted. Blank names are dropped; if
/// none survive, there is no signature.
pub fn match_signature<'a, I>(match_date: Option<&str>, team_names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let date = parse_match_datetime(match_date?)?.date_naive();

    let mut names: Vec<String> = team_names
        .into_iter()
        .filter_map(normalize_team_name)
        .collect();
    if names.is_empty() {
        return None;
    }
    names.sort();

    Some(format!("{}__{}", date.format("%Y-%m-%d"), names.join("__")))
}
