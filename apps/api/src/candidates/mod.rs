// Candidates: resume ingestion, career insights and search.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod extract;
pub mod handlers;
pub mod insights;
pub mod matcher;
pub mod prompts;
pub mod resume_parser;
