use std::sync::Arc;

use crate::candidates::matcher::CandidateMatcher;
use crate::config::Config;
use crate::llm_client::LanguageModel;
use crate::models::candidate::CandidateRecord;
use crate::models::job::JobPosting;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; a scripted model in tests.
    pub llm: Arc<dyn LanguageModel>,
    /// Populated only by resume uploads.
    pub candidates: Arc<dyn RecordStore<CandidateRecord>>,
    /// Seeded with sample postings at startup.
    pub jobs: Arc<dyn RecordStore<JobPosting>>,
    /// Pluggable matcher. Default: KeywordMatcher.
    pub matcher: Arc<dyn CandidateMatcher>,
    pub config: Config,
}
