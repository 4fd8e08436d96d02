//! Axum route handlers for the Candidates API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::candidates::extract::{extract_resume_text, FileType};
use crate::candidates::insights::generate_insights;
use crate::candidates::resume_parser::parse_resume;
use crate::errors::AppError;
use crate::models::candidate::{CandidateMatch, CandidateRecord, SearchQuery};
use crate::state::AppState;

/// Multipart field carrying the resume file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub candidate_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub candidates: Vec<CandidateMatch>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: String,
}

/// POST /upload-resume/
///
/// Extracts text from the uploaded file, parses it with the LLM and stores the
/// result. Parse failures store the fallback record instead of failing.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_type = FileType::detect(field.file_name(), field.content_type());
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let data = field.bytes().await?;

        info!(file_name = %file_name, size = data.len(), file_type = file_type.label(), "Resume received");

        let text = extract_resume_text(data, file_type).await;
        let record = parse_resume(&text, file_type.label(), state.llm.as_ref()).await;
        let candidate_id = state.candidates.insert(record).await;

        info!(candidate_id = %candidate_id, "Candidate stored");

        return Ok(Json(UploadResponse {
            message: "Resume uploaded successfully".to_string(),
            candidate_id,
        }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// POST /search-candidates/
///
/// Returns every stored candidate matching the query. Never an error for an
/// empty result.
pub async fn handle_search_candidates(
    State(state): State<AppState>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(query) = payload?;

    let all = state.candidates.list().await;
    let candidates = state.matcher.search(&query, &all);

    info!(
        matched = candidates.len(),
        searched = all.len(),
        "Candidate search completed"
    );

    Ok(Json(SearchResponse { candidates }))
}

/// GET /career-insights/:id
///
/// 404 when the candidate is unknown. Model failures come back as a 200 with
/// an explanatory message in `insights`.
pub async fn handle_career_insights(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<Json<InsightsResponse>, AppError> {
    let (_, candidate) = find_candidate(&state, &candidate_id).await?;
    let insights = generate_insights(&candidate, state.llm.as_ref()).await;
    Ok(Json(InsightsResponse { insights }))
}

/// GET /candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<Json<CandidateMatch>, AppError> {
    let (candidate_id, details) = find_candidate(&state, &candidate_id).await?;
    Ok(Json(CandidateMatch {
        candidate_id,
        details,
    }))
}

/// Resolves a path key; malformed keys are reported as not found.
async fn find_candidate(
    state: &AppState,
    raw_id: &str,
) -> Result<(Uuid, CandidateRecord), AppError> {
    let not_found = || AppError::NotFound("Candidate not found".to_string());
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
    let record = state.candidates.get(id).await.ok_or_else(not_found)?;
    Ok((id, record))
}
