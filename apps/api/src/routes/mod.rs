pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

/// Paths keep the trailing-slash form existing clients post to; the bare form
/// is accepted as well.
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates
        .route("/upload-resume/", post(candidates::handle_upload_resume))
        .route("/upload-resume", post(candidates::handle_upload_resume))
        .route(
            "/search-candidates/",
            post(candidates::handle_search_candidates),
        )
        .route(
            "/search-candidates",
            post(candidates::handle_search_candidates),
        )
        .route(
            "/career-insights/:id",
            get(candidates::handle_career_insights),
        )
        .route("/candidates/:id", get(candidates::handle_get_candidate))
        // Jobs
        .route("/add-job/", post(jobs::handle_add_job))
        .route("/add-job", post(jobs::handle_add_job))
        .route("/jobs", get(jobs::handle_list_jobs))
        .route("/jobs/:id", get(jobs::handle_get_job))
        .layer(body_limit)
        .with_state(state)
}
