//! The match-report store: create, find, list, delete over three key
//! families, with uniqueness emulated through conditional writes.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sideout_store::{Bucket, DocStore, StoreError};
use sideout_types::{MatchId, UserId};

use crate::error::{ReportError, ReportResult};
use crate::keys;
use crate::model::{MatchReport, ReportPayload, StoredMatchReport};
use crate::signature;

/// Number of reports a list call returns when no limit is given.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Hard ceiling on a single list call.
pub const MAX_LIST_LIMIT: usize = 200;

/// Options for [`ReportStore::list`].
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    /// Maximum number of reports, clamped to `1..=`[`MAX_LIST_LIMIT`];
    /// defaults to [`DEFAULT_LIST_LIMIT`].
    pub limit: Option<usize>,
    /// When set, keep only reports created by this owner. Applied after
    /// the store-side limit, so the result may under-fill.
    pub owner: Option<UserId>,
}

/// Outcome of [`ReportStore::delete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The report existed, belonged to the caller, and its keys were
    /// tombstoned.
    Deleted,
    /// No report exists under that id.
    NotFound,
    /// The report belongs to someone else; nothing was touched.
    Forbidden,
}

/// Index entry mapping a match id to its data key.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct IndexDoc {
    key: Option<String>,
}

/// Signature reservation entry; its presence is the uniqueness gate.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
struct SignatureDoc {
    key: Option<String>,
    match_id: Option<MatchId>,
}

/// Match-report persistence over a flat object store.
///
/// All state lives in the bucket; the store itself is stateless and any
/// number of instances may run against the same bucket concurrently. The
/// only coordination primitive used is the conditional write-if-absent on
/// signature keys, which the bucket guarantees atomic.
#[derive(Clone)]
pub struct ReportStore {
    docs: DocStore,
}

impl ReportStore {
    /// Create a store over `bucket`.
    pub fn new(bucket: Arc<dyn Bucket>) -> Self {
        Self {
            docs: DocStore::new(bucket),
        }
    }

    /// Persist a fresh report for `owner`.
    ///
    /// Runs the insert as a small saga: reserve the signature key (when one
    /// is computable), then write the data key, then the index key. A
    /// reservation that loses the conditional write fails the whole call
    /// with [`ReportError::Duplicate`]; a write failure after a successful
    /// reservation releases the slot best-effort before the error is
    /// returned.
    pub async fn create(&self, payload: ReportPayload, owner: &UserId) -> ReportResult<MatchReport> {
        let created_at = Utc::now();
        let match_id = MatchId::generate();
        let data_key = keys::data_key(created_at.timestamp_millis(), &match_id);
        let signature = signature::match_signature(
            payload.match_date.as_deref(),
            payload.teams.iter().map(|team| team.team.as_str()),
        );

        let stored = StoredMatchReport::from_payload(payload, match_id, created_at, owner.clone());

        let mut reserved_key = None;
        if let Some(signature) = &signature {
            let key = keys::signature_key(signature);
            let claim = SignatureDoc {
                key: Some(data_key.clone()),
                match_id: Some(match_id),
            };
            match self.docs.write_if_absent(&key, &claim).await {
                Ok(()) => reserved_key = Some(key),
                Err(err) if err.is_precondition_failed() => {
                    let winner = match self.docs.read::<SignatureDoc>(&key).await {
                        Ok(Some(existing)) => existing.match_id,
                        Ok(None) => None,
                        Err(read_err) => {
                            tracing::warn!(
                                key = %key,
                                error = %read_err,
                                "failed to read the signature entry that won the reservation"
                            );
                            None
                        }
                    };
                    return Err(ReportError::Duplicate { match_id: winner });
                }
                Err(err) => return Err(err.into()),
            }
        }

        let mut written = self.docs.write(&data_key, &stored).await;
        if written.is_ok() {
            let index = IndexDoc {
                key: Some(data_key.clone()),
            };
            written = self.docs.write(&keys::index_key(&match_id), &index).await;
        }
        if let Err(err) = written {
            if let Some(key) = &reserved_key {
                if let Err(cleanup) = self.docs.delete(key).await {
                    tracing::warn!(
                        key = %key,
                        error = %cleanup,
                        "failed to release signature reservation after aborted create"
                    );
                }
            }
            return Err(err.into());
        }

        tracing::debug!(match_id = %match_id, signature = signature.as_deref(), "stored match report");
        Ok(stored.into_report())
    }

    /// Look up a report by id, resolving through the index key.
    pub async fn find_by_match_id(&self, match_id: &MatchId) -> ReportResult<Option<MatchReport>> {
        let index = self
            .docs
            .read::<IndexDoc>(&keys::index_key(match_id))
            .await?;
        let Some(data_key) = index.and_then(|doc| doc.key) else {
            return Ok(None);
        };

        let stored = self.docs.read::<StoredMatchReport>(&data_key).await?;
        Ok(stored.map(StoredMatchReport::into_report))
    }

    /// List reports newest-first.
    ///
    /// Ordering falls out of the data-key encoding; no sort happens here.
    /// Documents that fail to parse are skipped with a warning so one bad
    /// object cannot take the whole listing down.
    pub async fn list(&self, query: ListQuery) -> ReportResult<Vec<MatchReport>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);

        let metas = self
            .docs
            .bucket()
            .list(keys::DATA_PREFIX, Some(limit))
            .await?;

        let mut reports = Vec::with_capacity(metas.len());
        for meta in metas {
            match self.docs.read::<StoredMatchReport>(&meta.key).await {
                Ok(Some(stored)) => reports.push(stored.into_report()),
                Ok(None) => {}
                Err(err @ StoreError::Serialization { .. }) => {
                    tracing::warn!(key = %meta.key, error = %err, "skipping unparseable match report");
                }
                Err(err) => return Err(err.into()),
            }
        }

        if let Some(owner) = &query.owner {
            reports.retain(|report| &report.owner_id == owner);
        }
        Ok(reports)
    }

    /// Delete a report owned by `owner`, tombstoning all three key
    /// families.
    ///
    /// The three deletions are independent and best-effort: once the caller
    /// is authorized, partial storage failures are logged and the call
    /// still reports [`DeleteOutcome::Deleted`], so a record is never left
    /// findable-but-half-gone from the caller's point of view.
    pub async fn delete(&self, match_id: &MatchId, owner: &UserId) -> ReportResult<DeleteOutcome> {
        let index_key = keys::index_key(match_id);
        let index = self.docs.read::<IndexDoc>(&index_key).await?;
        let Some(data_key) = index.and_then(|doc| doc.key) else {
            return Ok(DeleteOutcome::NotFound);
        };

        let Some(stored) = self.docs.read::<StoredMatchReport>(&data_key).await? else {
            // The index pointed at nothing; heal it so later lookups stop
            // chasing the dangling key.
            if let Err(err) = self.docs.delete(&index_key).await {
                tracing::warn!(key = %index_key, error = %err, "failed to remove stale match report index entry");
            }
            return Ok(DeleteOutcome::NotFound);
        };

        if &stored.owner_id != owner {
            return Ok(DeleteOutcome::Forbidden);
        }

        let signature = signature::match_signature(
            stored.match_date.as_deref(),
            stored.teams.iter().map(|team| team.team.as_str()),
        );

        for key in [data_key.as_str(), index_key.as_str()] {
            if let Err(err) = self.docs.delete(key).await {
                tracing::warn!(key, error = %err, "failed to delete match report object");
            }
        }
        if let Some(signature) = &signature {
            let key = keys::signature_key(signature);
            if let Err(err) = self.docs.delete(&key).await {
                tracing::warn!(key = %key, error = %err, "failed to release match report signature");
            }
        }

        tracing::debug!(match_id = %match_id, "deleted match report");
        Ok(DeleteOutcome::Deleted)
    }
}

impl std::fmt::Debug for ReportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStore").finish_non_exhaustive()
    }
}
