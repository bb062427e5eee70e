//! Value types shared by every [`Bucket`](crate::Bucket) backend.

/// Write behavior for [`Bucket::put`](crate::Bucket::put).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Unconditionally replace whatever the key currently holds.
    #[default]
    Overwrite,
    /// Succeed only if the key holds nothing.
    ///
    /// Backends must decide this atomically against concurrent writers:
    /// when several `IfAbsent` writes race on one key, exactly one wins and
    /// the rest fail with
    /// [`StoreError::PreconditionFailed`](crate::StoreError::PreconditionFailed).
    IfAbsent,
}

/// Options for [`Bucket::put`](crate::Bucket::put).
#[derive(Clone, Debug, Default)]
pub struct PutOptions {
    /// Declared content type, kept as object metadata by backends that have
    /// any. Backends without metadata ignore it.
    pub content_type: Option<String>,
    /// Conditional-write behavior.
    pub mode: WriteMode,
}

impl PutOptions {
    /// Plain unconditional write.
    pub fn overwrite() -> Self {
        Self::default()
    }

    /// Conditional write that fails when the key already exists.
    pub fn if_absent() -> Self {
        Self {
            mode: WriteMode::IfAbsent,
            ..Self::default()
        }
    }

    /// Attach a content type to the write.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// One entry in a [`Bucket::list`](crate::Bucket::list) result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Full object key.
    pub key: String,
    /// Stored size in bytes.
    pub size: u64,
}
