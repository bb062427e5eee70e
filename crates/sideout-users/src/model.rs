//! User record shapes and field normalization.

use serde::{Deserialize, Serialize};
use sideout_types::UserId;
use thiserror::Error;

/// One season in a player's team history.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamHistoryEntry {
    /// Team played for.
    pub team_name: String,
    /// Country of that team.
    pub team_country: String,
    /// Season start, RFC 3339.
    pub season_start: String,
    /// Season end, RFC 3339.
    pub season_end: String,
    /// Jersey number worn that season, 1 to 3 digits.
    pub player_number: String,
}

/// The user document persisted under a record key.
///
/// Credential fields travel with the record; anything leaving the backend
/// goes through [`StoredUser::sanitized`] first.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    /// Server-assigned id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, lowercased.
    pub email: String,
    /// Password digest; opaque to this crate.
    pub password_hash: String,
    /// Salt used for the digest; opaque to this crate.
    pub password_salt: String,
    /// Age in years, when given at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Country of residence.
    #[serde(default)]
    pub country: Option<String>,
    /// Current club.
    #[serde(default)]
    pub current_team: Option<String>,
    /// Country of the current club.
    #[serde(default)]
    pub current_team_country: Option<String>,
    /// First year playing professionally.
    #[serde(default)]
    pub years_as_a_professional: Option<i32>,
    /// Current jersey number, 1 to 3 digits.
    #[serde(default)]
    pub player_number: Option<String>,
    /// Past seasons.
    #[serde(default)]
    pub team_history: Vec<TeamHistoryEntry>,
    /// Server-assigned creation time, RFC 3339.
    pub created_at: String,
}

/// Fields a caller supplies when creating a user. Id, normalized email, and
/// creation time are assigned by the store.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub age: Option<u32>,
    pub country: Option<String>,
    pub current_team: Option<String>,
    pub current_team_country: Option<String>,
    pub years_as_a_professional: Option<i32>,
    pub player_number: Option<String>,
    pub team_history: Vec<TeamHistoryEntry>,
}

/// A user as served to clients: everything except credentials.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub country: Option<String>,
    pub current_team: Option<String>,
    pub current_team_country: Option<String>,
    pub years_as_a_professional: Option<i32>,
    pub player_number: Option<String>,
    pub team_history: Vec<TeamHistoryEntry>,
    pub created_at: String,
}

impl StoredUser {
    /// The record with credential fields stripped.
    pub fn sanitized(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
            country: self.country.clone(),
            current_team: self.current_team.clone(),
            current_team_country: self.current_team_country.clone(),
            years_as_a_professional: self.years_as_a_professional,
            player_number: self.player_number.clone(),
            team_history: self.team_history.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// Rejection from [`normalize_player_number`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("playerNumber must contain only digits and be up to 3 characters long")]
pub struct PlayerNumberError;

/// Normalize a jersey number: trim, treat blank as unset, and require 1 to
/// 3 ASCII digits otherwise. Leading zeros are kept, so `"07"` stays
/// `"07"`.
pub fn normalize_player_number(
    value: Option<&str>,
) -> Result<Option<String>, PlayerNumberError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.len() > 3 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlayerNumberError);
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> StoredUser {
        StoredUser {
            id: UserId::new("u-1").unwrap(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "hash".to_string(),
            password_salt: "salt".to_string(),
            age: Some(27),
            country: Some("Brazil".to_string()),
            current_team: Some("Tigers".to_string()),
            current_team_country: None,
            years_as_a_professional: Some(2018),
            player_number: Some("07".to_string()),
            team_history: vec![TeamHistoryEntry {
                team_name: "Wolves".to_string(),
                team_country: "Italy".to_string(),
                season_start: "2020-08-01T00:00:00.000Z".to_string(),
                season_end: "2021-06-01T00:00:00.000Z".to_string(),
                player_number: "12".to_string(),
            }],
            created_at: "2024-05-01T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn sanitized_strips_credential_fields() {
        let value = serde_json::to_value(stored_user().sanitized()).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("passwordSalt"));
        assert_eq!(object["email"], "ana@example.com");
        assert_eq!(object["playerNumber"], "07");
    }

    #[test]
    fn stored_user_serializes_camel_case() {
        let value = serde_json::to_value(stored_user()).unwrap();
        let object = value.as_object().unwrap();

        for field in [
            "id",
            "name",
            "email",
            "passwordHash",
            "passwordSalt",
            "age",
            "country",
            "currentTeam",
            "currentTeamCountry",
            "yearsAsAProfessional",
            "playerNumber",
            "teamHistory",
            "createdAt",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }

        let history = object["teamHistory"][0].as_object().unwrap();
        assert!(history.contains_key("teamName"));
        assert!(history.contains_key("seasonStart"));
    }

    #[test]
    fn stored_user_tolerates_sparse_documents() {
        let user: StoredUser = serde_json::from_value(serde_json::json!({
            "id": "u-2",
            "name": "Bea",
            "email": "bea@example.com",
            "passwordHash": "h",
            "passwordSalt": "s",
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(user.age, None);
        assert_eq!(user.player_number, None);
        assert!(user.team_history.is_empty());
    }

    #[test]
    fn player_number_keeps_leading_zeros() {
        assert_eq!(
            normalize_player_number(Some("07")),
            Ok(Some("07".to_string()))
        );
    }

    #[test]
    fn player_number_trims_whitespace() {
        assert_eq!(
            normalize_player_number(Some("  5 ")),
            Ok(Some("5".to_string()))
        );
    }

    #[test]
    fn blank_player_number_is_unset() {
        assert_eq!(normalize_player_number(Some("   ")), Ok(None));
        assert_eq!(normalize_player_number(Some("")), Ok(None));
        assert_eq!(normalize_player_number(None), Ok(None));
    }

    #[test]
    fn player_number_rejects_non_digits_and_long_values() {
        assert_eq!(normalize_player_number(Some("12a")), Err(PlayerNumberError));
        assert_eq!(normalize_player_number(Some("1234")), Err(PlayerNumberError));
        assert_eq!(normalize_player_number(Some("-1")), Err(PlayerNumberError));
    }

    #[test]
    fn player_number_accepts_boundary_values() {
        assert_eq!(normalize_player_number(Some("0")), Ok(Some("0".to_string())));
        assert_eq!(
            normalize_player_number(Some("999")),
            Ok(Some("999".to_string()))
        );
    }
}
