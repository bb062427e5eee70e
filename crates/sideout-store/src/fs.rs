//! Filesystem [`Bucket`] backend.
//!
//! Maps object keys onto files under a root directory, with `/` in keys
//! becoming directory separators. Conditional writes lean on the kernel:
//! `O_CREAT | O_EXCL` decides [`WriteMode::IfAbsent`] races, so two
//! processes sharing one root still get exactly one winner.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectMeta, PutOptions, WriteMode};
use crate::traits::Bucket;

/// A [`Bucket`] persisted as plain files under a root directory.
///
/// Content types are accepted and ignored; the filesystem has nowhere to
/// keep them. Keys that name both a file and a directory level (`"a"` next
/// to `"a/b"`) cannot coexist, which the key layouts in this workspace
/// never require.
#[derive(Debug)]
pub struct FsBucket {
    root: PathBuf,
}

impl FsBucket {
    /// Open a bucket rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "opened filesystem bucket");
        Ok(Self { root })
    }

    /// Root directory this bucket stores objects under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "key is empty".to_string(),
            });
        }
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StoreError::InvalidKey {
                    key: key.to_string(),
                    reason: "key segments must be non-empty and must not be `.` or `..`"
                        .to_string(),
                });
            }
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl Bucket for FsBucket {
    async fn get(&self, key: &str) -> StoreResult<Option<Bytes>> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, data: Bytes, opts: PutOptions) -> StoreResult<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        match opts.mode {
            WriteMode::Overwrite => {
                tokio::fs::write(&path, &data).await?;
            }
            WriteMode::IfAbsent => {
                let mut file = match tokio::fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)
                    .await
                {
                    Ok(file) => file,
                    Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                        return Err(StoreError::PreconditionFailed {
                            key: key.to_string(),
                        });
                    }
                    Err(err) => return Err(err.into()),
                };
                file.write_all(&data).await?;
                file.flush().await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self, prefix: &str, limit: Option<usize>) -> StoreResult<Vec<ObjectMeta>> {
        let mut metas = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                if !file_type.is_file() {
                    continue;
                }
                let rel = path
                    .strip_prefix(&self.root)
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                // Skip files whose names are not valid UTF-8; we never
                // write such keys.
                let Some(key) = rel.to_str() else { continue };
                if key.starts_with(prefix) {
                    metas.push(ObjectMeta {
                        key: key.to_string(),
                        size: entry.metadata().await?.len(),
                    });
                }
            }
        }

        metas.sort_by(|a, b| a.key.cmp(&b.key));
        if let Some(limit) = limit {
            metas.truncate(limit);
        }
        Ok(metas)
    }
}
