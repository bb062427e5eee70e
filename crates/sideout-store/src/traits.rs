//! The storage abstraction every higher layer is written against.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;
use crate::object::{ObjectMeta, PutOptions};

/// A flat key/value object store.
///
/// This is the only persistence primitive in the system: no SQL, no
/// transactions, no secondary indexes. Keys are UTF-8 strings (conventionally
/// `/`-separated), values are opaque byte blobs. Everything richer, such as
/// uniqueness or ordering, is built on top by choosing keys carefully.
///
/// # Contract
///
/// * [`get`](Bucket::get) of an absent key returns `Ok(None)`, never an error.
/// * [`put`](Bucket::put) with [`WriteMode::IfAbsent`](crate::WriteMode)
///   fails with [`StoreError::PreconditionFailed`](crate::StoreError) when
///   the key already holds a value, and the check-and-write is atomic with
///   respect to concurrent writers on the same key.
/// * [`delete`](Bucket::delete) is idempotent: deleting an absent key
///   succeeds quietly.
/// * [`list`](Bucket::list) returns keys in lexicographic byte order. That
///   is the only ordering the store offers, so callers that need another
///   order must encode it into their keys.
#[async_trait]
pub trait Bucket: Send + Sync {
    /// Fetch the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> StoreResult<Option<Bytes>>;

    /// Store `data` under `key` according to `opts`.
    async fn put(&self, key: &str, data: Bytes, opts: PutOptions) -> StoreResult<()>;

    /// Remove the value stored under `key`, succeeding even when absent.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// List objects whose key starts with `prefix`, in lexicographic order,
    /// up to `limit` entries when given.
    async fn list(&self, prefix: &str, limit: Option<usize>) -> StoreResult<Vec<ObjectMeta>>;
}
