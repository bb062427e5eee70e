//! Shared handler state.

use std::sync::Arc;

use sideout_reports::ReportStore;
use sideout_users::UserStore;

use crate::auth::AuthProvider;

/// Everything handlers need, cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Match-report persistence.
    pub reports: ReportStore,
    /// User records.
    pub users: UserStore,
    /// Credential resolution.
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(reports: ReportStore, users: UserStore, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            reports,
            users,
            auth,
        }
    }
}
