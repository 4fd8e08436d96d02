//! Axum route handlers for the Jobs API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPosting, JobView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AddJobResponse {
    pub message: String,
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobView>,
}

/// POST /add-job/
///
/// Only the JSON shape is checked; an empty `required_skills` is accepted.
pub async fn handle_add_job(
    State(state): State<AppState>,
    payload: Result<Json<JobPosting>, JsonRejection>,
) -> Result<Json<AddJobResponse>, AppError> {
    let Json(job) = payload?;

    let title = job.job_title.clone();
    let job_id = state.jobs.insert(job).await;
    info!(job_id = %job_id, title = %title, "Job posting added");

    Ok(Json(AddJobResponse {
        message: "Job added successfully".to_string(),
        job_id,
    }))
}

/// GET /jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    let jobs = state
        .jobs
        .list()
        .await
        .into_iter()
        .map(|stored| JobView {
            job_id: stored.id,
            posting: stored.record,
        })
        .collect();

    Json(JobListResponse { jobs })
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobView>, AppError> {
    let not_found = || AppError::NotFound("Job not found".to_string());
    let job_id = Uuid::parse_str(&job_id).map_err(|_| not_found())?;
    let posting = state.jobs.get(job_id).await.ok_or_else(not_found)?;

    Ok(Json(JobView { job_id, posting }))
}
