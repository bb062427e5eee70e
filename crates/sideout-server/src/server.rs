use std::sync::Arc;

use sideout_reports::ReportStore;
use sideout_store::Bucket;
use sideout_users::UserStore;
use tokio::net::TcpListener;

use crate::auth::StaticTokenAuth;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The Sideout HTTP server.
pub struct SideoutServer {
    config: ServerConfig,
}

impl SideoutServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the configured bucket and wire up the stores.
    pub async fn state(&self) -> ServerResult<AppState> {
        let bucket = self.config.storage.open_bucket().await?;
        let auth = Arc::new(StaticTokenAuth::from_config(&self.config.auth)?);
        Ok(AppState::new(
            ReportStore::new(Arc::clone(&bucket) as Arc<dyn Bucket>),
            UserStore::new(bucket),
            auth,
        ))
    }

    /// Build the router (useful for testing).
    pub async fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.state().await?))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router().await?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Sideout server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
