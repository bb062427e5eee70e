//! The user store: one record per key plus an email index.
//!
//! The layout mirrors the match-report store. Records live under their own
//! id-derived keys, a per-email index entry maps the address to the record,
//! and the index entry doubles as the uniqueness gate: whoever wins the
//! conditional write on the email key owns the address.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sideout_store::{Bucket, DocStore};
use sideout_types::UserId;

use crate::error::{UserError, UserResult};
use crate::model::{NewUser, StoredUser};

/// Prefix for user record documents.
pub const RECORD_PREFIX: &str = "users/by-id/";

/// Prefix for email-to-id index entries.
pub const EMAIL_INDEX_PREFIX: &str = "users/by-email/";

fn record_key(id: &UserId) -> String {
    format!("{RECORD_PREFIX}{id}.json")
}

fn email_key(email: &str) -> String {
    format!("{EMAIL_INDEX_PREFIX}{email}.json")
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Email index entry; its presence reserves the address.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct EmailIndexDoc {
    key: Option<String>,
    id: Option<UserId>,
}

/// User persistence over a flat object store.
#[derive(Clone)]
pub struct UserStore {
    docs: DocStore,
}

impl UserStore {
    /// Create a store over `bucket`.
    pub fn new(bucket: Arc<dyn Bucket>) -> Self {
        Self {
            docs: DocStore::new(bucket),
        }
    }

    /// Persist a new user, assigning id and creation time.
    ///
    /// The email key is reserved with a conditional write before the record
    /// is stored, so two registrations racing on one address leave exactly
    /// one account. A record write failing after the reservation releases
    /// the address best-effort.
    pub async fn create(&self, new_user: NewUser) -> UserResult<StoredUser> {
        let email = normalize_email(&new_user.email);
        let id = UserId::generate();
        let record_key = record_key(&id);
        let email_key = email_key(&email);

        let claim = EmailIndexDoc {
            key: Some(record_key.clone()),
            id: Some(id.clone()),
        };
        match self.docs.write_if_absent(&email_key, &claim).await {
            Ok(()) => {}
            Err(err) if err.is_precondition_failed() => {
                let holder = match self.docs.read::<EmailIndexDoc>(&email_key).await {
                    Ok(Some(existing)) => existing.id,
                    Ok(None) => None,
                    Err(read_err) => {
                        tracing::warn!(
                            key = %email_key,
                            error = %read_err,
                            "failed to read the index entry holding this email"
                        );
                        None
                    }
                };
                return Err(UserError::EmailTaken { user_id: holder });
            }
            Err(err) => return Err(err.into()),
        }

        let stored = StoredUser {
            id,
            name: new_user.name,
            email,
            password_hash: new_user.password_hash,
            password_salt: new_user.password_salt,
            age: new_user.age,
            country: new_user.country,
            current_team: new_user.current_team,
            current_team_country: new_user.current_team_country,
            years_as_a_professional: new_user.years_as_a_professional,
            player_number: new_user.player_number,
            team_history: new_user.team_history,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        if let Err(err) = self.docs.write(&record_key, &stored).await {
            if let Err(cleanup) = self.docs.delete(&email_key).await {
                tracing::warn!(
                    key = %email_key,
                    error = %cleanup,
                    "failed to release email reservation after aborted user create"
                );
            }
            return Err(err.into());
        }

        tracing::debug!(user_id = %stored.id, "stored user record");
        Ok(stored)
    }

    /// Look up a user by id.
    pub async fn find_by_id(&self, id: &UserId) -> UserResult<Option<StoredUser>> {
        Ok(self.docs.read(&record_key(id)).await?)
    }

    /// Look up a user by email, case-insensitively, through the index.
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<StoredUser>> {
        let index = self
            .docs
            .read::<EmailIndexDoc>(&email_key(&normalize_email(email)))
            .await?;
        let Some(key) = index.and_then(|doc| doc.key) else {
            return Ok(None);
        };
        Ok(self.docs.read(&key).await?)
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore").finish_non_exhaustive()
    }
}
