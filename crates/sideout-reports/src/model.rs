//! Report document shapes: the submission payload, the stored JSON
//! document, and the public shape handed back to callers.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sideout_types::{MatchId, UserId};

use crate::signature::parse_match_datetime;

/// A stat cell as submitted by clients.
///
/// Spreadsheet exports are loose about cell types, so numbers and blanks
/// arrive alongside strings. Storage is uniform: everything normalizes to a
/// string, with empty cells becoming `""`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StatValue {
    /// A plain string cell.
    Text(String),
    /// A numeric cell, kept as JSON saw it.
    Number(serde_json::Number),
    /// An explicitly null cell.
    Null,
}

impl StatValue {
    fn normalize(&self) -> String {
        match self {
            StatValue::Text(text) => text.clone(),
            StatValue::Number(number) => number.to_string(),
            StatValue::Null => String::new(),
        }
    }
}

/// One team as submitted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TeamPayload {
    /// Team name.
    pub team: String,
    /// Roster with per-player stats.
    pub players: Vec<PlayerPayload>,
}

/// One player as submitted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerPayload {
    /// Jersey number, 0 through 999.
    pub number: u16,
    /// Player name.
    pub name: String,
    /// Stat name to cell value.
    #[serde(default)]
    pub stats: BTreeMap<String, StatValue>,
}

/// A match report submission, validated upstream and assumed well-formed
/// here.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    /// When the client generated the report, as an RFC 3339 string.
    pub generated_at: String,
    /// Calendar date the match was played, `YYYY-MM-DD`.
    #[serde(default)]
    pub match_date: Option<String>,
    /// Clock time the match started, `HH:MM`.
    #[serde(default)]
    pub match_time: Option<String>,
    /// Number of statistical columns (typically sets).
    pub set_columns: u32,
    /// Column headings, at least as many as `set_columns`.
    pub column_labels: Vec<String>,
    /// Participating teams, at least one.
    pub teams: Vec<TeamPayload>,
}

/// A team as persisted and served.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Team {
    /// Team name, as submitted.
    pub team: String,
    /// Roster with normalized stats.
    pub players: Vec<Player>,
}

/// A player as persisted and served.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Player {
    /// Jersey number.
    pub number: u16,
    /// Player name.
    pub name: String,
    /// Stat name to normalized string value.
    pub stats: BTreeMap<String, String>,
}

/// The JSON document written under a data key.
///
/// Datetimes are stored as RFC 3339 strings with millisecond precision so
/// the document is plain JSON all the way down.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatchReport {
    /// Canonical report id.
    pub match_id: MatchId,
    /// Client-side generation time.
    pub generated_at: String,
    /// Match datetime, UTC.
    pub match_date: Option<String>,
    /// Match start time, opaque `HH:MM` string.
    pub match_time: Option<String>,
    /// Number of statistical columns.
    pub set_columns: u32,
    /// Column headings.
    pub column_labels: Vec<String>,
    /// Teams with normalized stats.
    pub teams: Vec<Team>,
    /// Server-assigned creation time; also encoded in the data key.
    pub created_at: String,
    /// Authenticated creator.
    pub owner_id: UserId,
}

/// The public report shape, with stored datetime strings parsed back into
/// typed values. Strings that fail to parse surface as `None` rather than
/// failing the read.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// Canonical report id.
    pub match_id: MatchId,
    /// When the client generated the report.
    pub generated_at: Option<DateTime<Utc>>,
    /// When the match was played.
    pub match_date: Option<DateTime<Utc>>,
    /// Match start time, opaque `HH:MM` string.
    pub match_time: Option<String>,
    /// Number of statistical columns.
    pub set_columns: u32,
    /// Column headings.
    pub column_labels: Vec<String>,
    /// Teams with normalized stats.
    pub teams: Vec<Team>,
    /// Server-assigned creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Authenticated creator.
    pub owner_id: UserId,
}

/// Format a datetime the way stored documents carry them.
pub(crate) fn to_stored_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_stored_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn normalize_generated_at(value: &str) -> String {
    match parse_stored_datetime(value.trim()) {
        Some(dt) => to_stored_datetime(dt),
        // Upstream validation guarantees RFC 3339; anything else is kept
        // verbatim and reads back as a null datetime.
        None => value.trim().to_string(),
    }
}

impl TeamPayload {
    fn normalize(self) -> Team {
        Team {
            team: self.team,
            players: self.players.into_iter().map(PlayerPayload::normalize).collect(),
        }
    }
}

impl PlayerPayload {
    fn normalize(self) -> Player {
        Player {
            number: self.number,
            name: self.name,
            stats: self
                .stats
                .iter()
                .map(|(name, value)| (name.clone(), value.normalize()))
                .collect(),
        }
    }
}

impl StoredMatchReport {
    /// Build the document to persist for a fresh submission.
    pub fn from_payload(
        payload: ReportPayload,
        match_id: MatchId,
        created_at: DateTime<Utc>,
        owner_id: UserId,
    ) -> Self {
        Self {
            match_id,
            generated_at: normalize_generated_at(&payload.generated_at),
            match_date: payload
                .match_date
                .as_deref()
                .and_then(parse_match_datetime)
                .map(to_stored_datetime),
            match_time: payload.match_time,
            set_columns: payload.set_columns,
            column_labels: payload.column_labels,
            teams: payload.teams.into_iter().map(TeamPayload::normalize).collect(),
            created_at: to_stored_datetime(created_at),
            owner_id,
        }
    }

    /// Map the stored document to the public shape.
    pub fn into_report(self) -> MatchReport {
        MatchReport {
            match_id: self.match_id,
            generated_at: parse_stored_datetime(&self.generated_at),
            match_date: self.match_date.as_deref().and_then(parse_stored_datetime),
            match_time: self.match_time,
            set_columns: self.set_columns,
            column_labels: self.column_labels,
            teams: self.teams,
            created_at: parse_stored_datetime(&self.created_at),
            owner_id: self.owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn payload() -> ReportPayload {
        serde_json::from_value(json!({
            "generatedAt": "2024-05-11T18:30:00.000Z",
            "matchDate": "2024-05-11",
            "matchTime": "18:00",
            "setColumns": 3,
            "columnLabels": ["Set 1", "Set 2", "Set 3"],
            "teams": [
                {
                    "team": "Tigers",
                    "players": [
                        {
                            "number": 7,
                            "name": "Ana",
                            "stats": {"aces": 4, "errors": null, "notes": "strong serve"}
                        }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn stats_normalize_to_strings() {
        let owner = UserId::new("owner-1").unwrap();
        let created = Utc.with_ymd_and_hms(2024, 5, 12, 9, 0, 0).unwrap();
        let stored = StoredMatchReport::from_payload(payload(), MatchId::generate(), created, owner);

        let stats = &stored.teams[0].players[0].stats;
        assert_eq!(stats.get("aces").map(String::as_str), Some("4"));
        assert_eq!(stats.get("errors").map(String::as_str), Some(""));
        assert_eq!(stats.get("notes").map(String::as_str), Some("strong serve"));
    }

    #[test]
    fn fractional_stat_numbers_keep_their_representation() {
        let value: StatValue = serde_json::from_value(json!(3.5)).unwrap();
        assert_eq!(value.normalize(), "3.5");
    }

    #[test]
    fn match_date_is_stored_as_utc_midnight() {
        let owner = UserId::new("owner-1").unwrap();
        let created = Utc.with_ymd_and_hms(2024, 5, 12, 9, 0, 0).unwrap();
        let stored = StoredMatchReport::from_payload(payload(), MatchId::generate(), created, owner);

        assert_eq!(stored.match_date.as_deref(), Some("2024-05-11T00:00:00.000Z"));
        assert_eq!(stored.created_at, "2024-05-12T09:00:00.000Z");
    }

    #[test]
    fn unparseable_match_date_is_dropped() {
        let mut raw = payload();
        raw.match_date = Some("soon".to_string());

        let owner = UserId::new("owner-1").unwrap();
        let stored =
            StoredMatchReport::from_payload(raw, MatchId::generate(), Utc::now(), owner);
        assert_eq!(stored.match_date, None);
    }

    #[test]
    fn stored_document_uses_camel_case_fields() {
        let owner = UserId::new("owner-1").unwrap();
        let created = Utc.with_ymd_and_hms(2024, 5, 12, 9, 0, 0).unwrap();
        let stored = StoredMatchReport::from_payload(payload(), MatchId::generate(), created, owner);

        let value = serde_json::to_value(&stored).unwrap();
        let object = value.as_object().unwrap();
        for field in [
            "matchId",
            "generatedAt",
            "matchDate",
            "matchTime",
            "setColumns",
            "columnLabels",
            "teams",
            "createdAt",
            "ownerId",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }
    }

    #[test]
    fn into_report_parses_stored_datetimes() {
        let owner = UserId::new("owner-1").unwrap();
        let created = Utc.with_ymd_and_hms(2024, 5, 12, 9, 0, 0).unwrap();
        let report = StoredMatchReport::from_payload(payload(), MatchId::generate(), created, owner)
            .into_report();

        assert_eq!(report.created_at, Some(created));
        assert_eq!(
            report.match_date,
            Some(Utc.with_ymd_and_hms(2024, 5, 11, 0, 0, 0).unwrap())
        );
        assert_eq!(
            report.generated_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 11, 18, 30, 0).unwrap())
        );
        assert_eq!(report.match_time.as_deref(), Some("18:00"));
    }

    #[test]
    fn garbage_stored_datetime_reads_back_as_none() {
        let stored = StoredMatchReport {
            match_id: MatchId::generate(),
            generated_at: "whenever".to_string(),
            match_date: Some("not a date".to_string()),
            match_time: None,
            set_columns: 1,
            column_labels: vec!["Set 1".to_string()],
            teams: Vec::new(),
            created_at: "2024-05-12T09:00:00.000Z".to_string(),
            owner_id: UserId::new("owner-1").unwrap(),
        };

        let report = stored.into_report();
        assert_eq!(report.generated_at, None);
        assert_eq!(report.match_date, None);
        assert!(report.created_at.is_some());
    }

    #[test]
    fn stat_values_deserialize_from_mixed_json() {
        let stats: BTreeMap<String, StatValue> = serde_json::from_value(json!({
            "kills": 12,
            "digs": "9",
            "blocks": null
        }))
        .unwrap();

        assert_eq!(stats["digs"], StatValue::Text("9".to_string()));
        assert_eq!(stats["blocks"], StatValue::Null);
        assert!(matches!(stats["kills"], StatValue::Number(_)));
    }

    #[test]
    fn missing_stats_default_to_empty() {
        let player: PlayerPayload = serde_json::from_value(json!({
            "number": 12,
            "name": "Bea"
        }))
        .unwrap();
        assert!(player.stats.is_empty());
    }
}
