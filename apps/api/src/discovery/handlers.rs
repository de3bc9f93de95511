use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::discovery::courses::top_courses_or_empty;
use crate::discovery::insight::admission_insight_or_default;
use crate::discovery::resources::state_resources_or_empty;
use crate::discovery::tutors::fetch_local_tutors;
use crate::errors::AppError;
use crate::models::course::Course;
use crate::models::resource::PracticeResource;
use crate::models::search::SearchCriteria;
use crate::models::tutor::{LocalTutorResponse, TutorSearchRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct InsightResponse {
    pub insight: String,
}

#[derive(Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,
}

/// POST /api/v1/courses/search
/// Provider failures degrade to an empty list.
pub async fn handle_search_courses(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Json<Vec<Course>> {
    Json(top_courses_or_empty(state.provider.as_ref(), &criteria).await)
}

/// GET /api/v1/insight
pub async fn handle_get_insight(State(state): State<AppState>) -> Json<InsightResponse> {
    Json(InsightResponse {
        insight: admission_insight_or_default(state.provider.as_ref()).await,
    })
}

/// POST /api/v1/tutors
pub async fn handle_find_tutors(
    State(state): State<AppState>,
    Json(req): Json<TutorSearchRequest>,
) -> Result<Json<LocalTutorResponse>, AppError> {
    let response = fetch_local_tutors(
        state.provider.as_ref(),
        &req.location,
        req.effective_subject(),
        req.filters.as_ref(),
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/resources?location=
pub async fn handle_get_resources(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> Json<Vec<PracticeResource>> {
    let location = params
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(&state.config.default_location);
    Json(state_resources_or_empty(state.provider.as_ref(), location).await)
}
