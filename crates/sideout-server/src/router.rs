use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Sideout endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route(
            "/stats/match-report",
            post(handler::create_report).get(handler::list_reports),
        )
        .route(
            "/stats/match-report/:match_id",
            get(handler::get_report).delete(handler::delete_report),
        )
        .route("/auth/me", get(handler::me))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
