//! Request validation, upstream of the stores.
//!
//! The stores assume well-formed input, so every rule lives here, and a
//! rejected request reports all offending fields at once rather than the
//! first one found.

use chrono::DateTime;
use sideout_reports::{ListQuery, ReportPayload, StatValue};
use sideout_types::{MatchId, UserId};

use crate::error::{FieldError, ServerError, ServerResult};

/// Largest `limit` accepted at the HTTP boundary. The store clamps to its
/// own higher ceiling; requests past this one are rejected instead.
pub const HTTP_LIST_LIMIT_MAX: usize = 100;

/// `YYYY-MM-DD`, shape only; calendar validity is not checked here.
fn is_calendar_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}

/// `HH:MM`, 24-hour clock.
fn is_clock_time_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let hours_ok = match bytes[0] {
        b'0' | b'1' => bytes[1].is_ascii_digit(),
        b'2' => (b'0'..=b'3').contains(&bytes[1]),
        _ => false,
    };
    hours_ok && (b'0'..=b'5').contains(&bytes[3]) && bytes[4].is_ascii_digit()
}

/// Check a report submission, returning one entry per offending field.
pub fn validate_report_payload(payload: &ReportPayload) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if DateTime::parse_from_rfc3339(payload.generated_at.trim()).is_err() {
        errors.push(FieldError::new(
            "generatedAt",
            "generatedAt must be an ISO date-time string",
        ));
    }

    if payload.set_columns == 0 {
        errors.push(FieldError::new(
            "setColumns",
            "setColumns must be a positive integer",
        ));
    }

    if payload.column_labels.is_empty() {
        errors.push(FieldError::new(
            "columnLabels",
            "At least one column label is required",
        ));
    } else {
        for (index, label) in payload.column_labels.iter().enumerate() {
            if label.trim().is_empty() {
                errors.push(FieldError::new(
                    format!("columnLabels[{index}]"),
                    "Column labels must not be empty",
                ));
            }
        }
        if (payload.column_labels.len() as u32) < payload.set_columns {
            errors.push(FieldError::new(
                "columnLabels",
                "columnLabels must include at least setColumns entries",
            ));
        }
    }

    if let Some(match_date) = payload.match_date.as_deref() {
        if !is_calendar_date_shape(match_date) {
            errors.push(FieldError::new("matchDate", "matchDate must be YYYY-MM-DD"));
        }
    }
    if let Some(match_time) = payload.match_time.as_deref() {
        if !is_clock_time_shape(match_time) {
            errors.push(FieldError::new("matchTime", "matchTime must be HH:mm"));
        }
    }

    if payload.teams.is_empty() {
        errors.push(FieldError::new(
            "teams",
            "At least one team must be provided",
        ));
    }
    for (t, team) in payload.teams.iter().enumerate() {
        if team.team.trim().is_empty() {
            errors.push(FieldError::new(
                format!("teams[{t}].team"),
                "Team name is required",
            ));
        }
        if team.players.is_empty() {
            errors.push(FieldError::new(
                format!("teams[{t}].players"),
                "At least one player is required",
            ));
        }
        for (p, player) in team.players.iter().enumerate() {
            if player.number > 999 {
                errors.push(FieldError::new(
                    format!("teams[{t}].players[{p}].number"),
                    "number must be between 0 and 999",
                ));
            }
            if player.name.trim().is_empty() {
                errors.push(FieldError::new(
                    format!("teams[{t}].players[{p}].name"),
                    "Player name is required",
                ));
            }
            for (stat, value) in &player.stats {
                if stat.trim().is_empty() {
                    errors.push(FieldError::new(
                        format!("teams[{t}].players[{p}].stats"),
                        "Stat names must not be empty",
                    ));
                }
                if matches!(value, StatValue::Null) {
                    errors.push(FieldError::new(
                        format!("teams[{t}].players[{p}].stats.{stat}"),
                        "Stat values must be strings or numbers",
                    ));
                }
            }
        }
    }

    errors
}

/// Parse the `:matchId` path segment.
pub fn parse_match_id_param(raw: &str) -> ServerResult<MatchId> {
    MatchId::parse(raw).map_err(|_| ServerError::Validation {
        message: "Invalid request".to_string(),
        errors: vec![FieldError::new("matchId", "matchId must be a valid UUID")],
    })
}

/// Raw query parameters of the list endpoint.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    pub limit: Option<String>,
    pub owner_id: Option<String>,
}

/// Validate list parameters into a store query.
pub fn parse_list_params(params: ListParams) -> ServerResult<ListQuery> {
    let mut errors = Vec::new();

    let limit = match params.limit.as_deref() {
        None => None,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(value) if (1..=HTTP_LIST_LIMIT_MAX).contains(&value) => Some(value),
            _ => {
                errors.push(FieldError::new(
                    "limit",
                    "limit must be an integer between 1 and 100",
                ));
                None
            }
        },
    };

    let owner = match params.owner_id.as_deref() {
        None => None,
        Some(raw) => match UserId::new(raw) {
            Ok(owner) => Some(owner),
            Err(_) => {
                errors.push(FieldError::new(
                    "ownerId",
                    "ownerId must be a non-empty string",
                ));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(ServerError::Validation {
            message: "Invalid request".to_string(),
            errors,
        });
    }
    Ok(ListQuery { limit, owner })
}
