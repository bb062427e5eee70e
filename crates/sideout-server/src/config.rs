//! Server configuration: bind address, storage backend, and the static
//! token table.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sideout_store::{Bucket, FsBucket, InMemoryBucket};

use crate::error::{ServerError, ServerResult};

/// Top-level configuration, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Which object-store backend holds the data.
    pub storage: StorageConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".parse().unwrap(),
            storage: StorageConfig::Filesystem {
                root: PathBuf::from("./sideout-data"),
            },
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, filling unset fields with
    /// defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}

/// Object-store backend selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Keep everything in memory; contents are lost on shutdown.
    Memory,
    /// Store objects as files under `root`.
    Filesystem { root: PathBuf },
}

impl StorageConfig {
    /// Open the configured bucket.
    pub async fn open_bucket(&self) -> ServerResult<Arc<dyn Bucket>> {
        match self {
            StorageConfig::Memory => Ok(Arc::new(InMemoryBucket::new())),
            StorageConfig::Filesystem { root } => Ok(Arc::new(FsBucket::open(root).await?)),
        }
    }
}

/// Authentication settings: a static table of accepted bearer tokens.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted tokens and the identity each one resolves to.
    pub tokens: Vec<StaticToken>,
}

/// One accepted bearer token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaticToken {
    /// The literal token value presented in the `Authorization` header.
    pub token: String,
    /// User id the token authenticates as.
    pub id: String,
    /// Email of that user.
    pub email: String,
    /// Display name of that user.
    pub name: String,
}
