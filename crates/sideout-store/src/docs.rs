//! JSON document codec layered over a [`Bucket`].
//!
//! Everything the backend persists is a JSON document, so the rest of the
//! workspace goes through [`DocStore`] instead of touching raw bytes.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::object::PutOptions;
use crate::traits::Bucket;

/// Content type declared on every document write.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Typed JSON reads and writes over an untyped [`Bucket`].
#[derive(Clone)]
pub struct DocStore {
    bucket: Arc<dyn Bucket>,
}

impl DocStore {
    /// Wrap a bucket.
    pub fn new(bucket: Arc<dyn Bucket>) -> Self {
        Self { bucket }
    }

    /// The underlying bucket, for callers that need raw operations such as
    /// key listing.
    pub fn bucket(&self) -> &Arc<dyn Bucket> {
        &self.bucket
    }

    /// Read and parse the document at `key`, or `None` when absent.
    ///
    /// Bytes that are not valid JSON for `T` are an error, not `None`: an
    /// absent document is normal, a corrupt one is not.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(data) = self.bucket.get(key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_slice(&data).map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    /// Serialize `value` and store it at `key`, replacing any prior document.
    pub async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let data = self.encode(key, value)?;
        self.bucket
            .put(
                key,
                data,
                PutOptions::overwrite().with_content_type(JSON_CONTENT_TYPE),
            )
            .await
    }

    /// Serialize `value` and store it at `key` only if the key is vacant.
    ///
    /// Fails with [`StoreError::PreconditionFailed`] when the key already
    /// holds a document, atomically against concurrent writers. This is the
    /// primitive that key-reservation schemes are built on.
    pub async fn write_if_absent<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        let data = self.encode(key, value)?;
        self.bucket
            .put(
                key,
                data,
                PutOptions::if_absent().with_content_type(JSON_CONTENT_TYPE),
            )
            .await
    }

    /// Shallow-merge `patch` into the object stored at `key` and write the
    /// result back, returning the merged document.
    ///
    /// An absent document merges into an empty object. Top-level fields from
    /// `patch` win wholesale; nested objects are replaced, not merged. A
    /// stored document that is not a JSON object is replaced.
    pub async fn update(&self, key: &str, patch: &Map<String, Value>) -> StoreResult<Value> {
        let mut merged = match self.read::<Value>(key).await? {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        for (field, value) in patch {
            merged.insert(field.clone(), value.clone());
        }
        let merged = Value::Object(merged);
        self.write(key, &merged).await?;
        Ok(merged)
    }

    /// Delete the document at `key`, succeeding even when absent.
    pub async fn delete(&self, key: &str) -> StoreResult<()> {
        self.bucket.delete(key).await
    }

    /// Fetch and parse every document whose key starts with `prefix`, in
    /// lexicographic key order.
    ///
    /// A key that vanishes between listing and reading is skipped rather
    /// than failing the whole call.
    pub async fn list_prefix<T: DeserializeOwned>(
        &self,
        prefix: &str,
    ) -> StoreResult<Vec<(String, T)>> {
        let metas = self.bucket.list(prefix, None).await?;
        let mut docs = Vec::with_capacity(metas.len());
        for meta in metas {
            if let Some(value) = self.read(&meta.key).await? {
                docs.push((meta.key, value));
            }
        }
        Ok(docs)
    }

    fn encode<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<Bytes> {
        let data = serde_json::to_vec(value).map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Bytes::from(data))
    }
}

impl std::fmt::Debug for DocStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocStore").finish_non_exhaustive()
    }
}
