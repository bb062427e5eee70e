//! HTTP server for the Sideout backend.
//!
//! Thin axum handlers over the match-report and user stores: payload
//! validation, bearer-credential resolution, and status-code mapping.
//! Everything stateful lives in the stores; this crate only translates
//! between HTTP and their APIs.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod validate;

pub use auth::{AuthProvider, Credentials, Identity, StaticTokenAuth};
pub use config::{AuthConfig, ServerConfig, StaticToken, StorageConfig};
pub use error::{FieldError, ServerError, ServerResult};
pub use router::build_router;
pub use server::SideoutServer;
pub use state::AppState;
