//! In-memory [`Bucket`] backend for tests and ephemeral deployments.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectMeta, PutOptions, WriteMode};
use crate::traits::Bucket;

#[derive(Clone)]
struct Entry {
    data: Bytes,
    content_type: Option<String>,
}

/// A [`Bucket`] backed by a `BTreeMap` behind a read-write lock.
///
/// The ordered map makes [`list`](Bucket::list) lexicographic for free, and
/// the write lock makes conditional writes atomic. Not persistent: contents
/// vanish when the bucket is dropped.
#[derive(Default)]
pub struct InMemoryBucket {
    objects: RwLock<BTreeMap<String, Entry>>,
}

impl InMemoryBucket {
    /// Create an empty bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored object.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    /// All stored keys in lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Content type recorded for `key`, if the object exists and one was
    /// declared on write.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .expect("lock poisoned")
            .get(key)
            .and_then(|entry| entry.content_type.clone())
    }
}

impl std::fmt::Debug for InMemoryBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBucket")
            .field("object_count", &self.len())
            .finish()
    }
}

#[async_trait]
impl Bucket for InMemoryBucket {
    async fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        let objects = self.objects.read().expect("lock poisoned");
        Ok(objects.get(key).map(|entry| entry.data.clone()))
    }

    async fn put(&self, key: &str, data: Bytes, opts: PutOptions) -> StoreResult<()> {
        let mut objects = self.objects.write().expect("lock poisoned");
        if opts.mode == WriteMode::IfAbsent && objects.contains_key(key) {
            return Err(StoreError::PreconditionFailed {
                key: key.to_string(),
            });
        }
        objects.insert(
            key.to_string(),
            Entry {
                data,
                content_type: opts.content_type,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.objects.write().expect("lock poisoned").remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str, limit: Option<usize>) -> StoreResult<Vec<ObjectMeta>> {
        let objects = self.objects.read().expect("lock poisoned");
        let metas = objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .take(limit.unwrap_or(usize::MAX))
            .map(|(key, entry)| ObjectMeta {
                key: key.clone(),
                size: entry.data.len() as u64,
            })
            .collect();
        Ok(metas)
    }
}
