use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::search::CriteriaUpdate;
use crate::models::tutor::TutorSearchRequest;
use crate::presentation::page::{render_page, PageView};
use crate::search::controller::PendingFetches;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub page: PageView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaUpdatedResponse {
    /// Whether the edit started a new course search.
    pub triggered: bool,
    pub page: PageView,
}

#[derive(Deserialize)]
pub struct LocationUpdate {
    pub location: String,
}

/// Background fetches run detached; clients observe them by polling
/// GET /api/v1/sessions/:id.
fn detach(id: Uuid, pending: PendingFetches) {
    if !pending.is_empty() {
        debug!("Session {id}: {} background fetch(es) running", pending.len());
    }
}

async fn current_page(state: &AppState, id: Uuid) -> Result<PageView, AppError> {
    let session = state.controller.snapshot(id).await?;
    Ok(render_page(&session))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreatedResponse>), AppError> {
    let (session_id, pending) = state.controller.mount().await;
    detach(session_id, pending);
    let page = current_page(&state, session_id).await?;
    Ok((StatusCode::CREATED, Json(SessionCreatedResponse { session_id, page })))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PageView>, AppError> {
    Ok(Json(current_page(&state, id).await?))
}

/// PATCH /api/v1/sessions/:id/criteria
pub async fn handle_update_criteria(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<CriteriaUpdate>,
) -> Result<Json<CriteriaUpdatedResponse>, AppError> {
    let (triggered, pending) = state.controller.update_criteria(id, &update).await?;
    detach(id, pending);
    let page = current_page(&state, id).await?;
    Ok(Json(CriteriaUpdatedResponse { triggered, page }))
}

/// POST /api/v1/sessions/:id/search
pub async fn handle_run_search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<PageView>), AppError> {
    detach(id, state.controller.search(id).await?);
    Ok((StatusCode::ACCEPTED, Json(current_page(&state, id).await?)))
}

/// PUT /api/v1/sessions/:id/location
pub async fn handle_set_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LocationUpdate>,
) -> Result<Json<PageView>, AppError> {
    detach(id, state.controller.set_location(id, &req.location).await?);
    Ok(Json(current_page(&state, id).await?))
}

/// POST /api/v1/sessions/:id/tutors
/// Completes the lookup before responding; failures land in the tutor panel.
pub async fn handle_session_tutors(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TutorSearchRequest>,
) -> Result<Json<PageView>, AppError> {
    detach(id, state.controller.find_tutors(id, &req).await?);
    Ok(Json(current_page(&state, id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.controller.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
