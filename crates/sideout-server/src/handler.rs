//! Request handlers: payload validation, store calls, status mapping.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use sideout_reports::DeleteOutcome;

use crate::auth::Identity;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use crate::validate::{self, ListParams};

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// `POST /stats/match-report`
pub async fn create_report(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<sideout_reports::ReportPayload>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let errors = validate::validate_report_payload(&payload);
    if !errors.is_empty() {
        return Err(ServerError::Validation {
            message: "Invalid payload".to_string(),
            errors,
        });
    }

    let report = state.reports.create(payload, &identity.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "matchId": report.match_id, "ownerId": report.owner_id })),
    ))
}

/// `GET /stats/match-report/:matchId`
pub async fn get_report(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> ServerResult<Json<sideout_reports::MatchReport>> {
    let match_id = validate::parse_match_id_param(&match_id)?;
    state
        .reports
        .find_by_match_id(&match_id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound("Match report not found".to_string()))
}

/// `GET /stats/match-report?limit&ownerId`
pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ServerResult<Json<Value>> {
    let query = validate::parse_list_params(params)?;
    let reports = state.reports.list(query).await?;
    Ok(Json(json!({ "items": reports })))
}

/// `DELETE /stats/match-report/:matchId`
pub async fn delete_report(
    State(state): State<AppState>,
    identity: Identity,
    Path(match_id): Path<String>,
) -> ServerResult<Json<Value>> {
    let match_id = validate::parse_match_id_param(&match_id)?;
    match state.reports.delete(&match_id, &identity.id).await? {
        DeleteOutcome::Deleted => Ok(Json(json!({ "message": "Match report deleted" }))),
        DeleteOutcome::NotFound => {
            Err(ServerError::NotFound("Match report not found".to_string()))
        }
        DeleteOutcome::Forbidden => Err(ServerError::Forbidden(
            "You cannot delete this match report".to_string(),
        )),
    }
}

/// `GET /auth/me`
pub async fn me(State(state): State<AppState>, identity: Identity) -> ServerResult<Json<Value>> {
    match state.users.find_by_id(&identity.id).await? {
        Some(user) => Ok(Json(json!({ "user": user.sanitized() }))),
        None => Err(ServerError::NotFound("User not found".to_string())),
    }
}
