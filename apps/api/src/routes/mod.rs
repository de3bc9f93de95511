pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::discovery::handlers as discovery;
use crate::search::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless discovery API
        .route("/api/v1/courses/search", post(discovery::handle_search_courses))
        .route("/api/v1/insight", get(discovery::handle_get_insight))
        .route("/api/v1/tutors", post(discovery::handle_find_tutors))
        .route("/api/v1/resources", get(discovery::handle_get_resources))
        // Search sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_close_session),
        )
        .route(
            "/api/v1/sessions/:id/criteria",
            patch(sessions::handle_update_criteria),
        )
        .route("/api/v1/sessions/:id/search", post(sessions::handle_run_search))
        .route("/api/v1/sessions/:id/location", put(sessions::handle_set_location))
        .route("/api/v1/sessions/:id/tutors", post(sessions::handle_session_tutors))
        .with_state(state)
}
