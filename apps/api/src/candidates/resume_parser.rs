//! Resume Parser: turns raw resume text into a `CandidateRecord` via the LLM.
//!
//! `extract_candidate` is fallible and reports why; `parse_resume` is what
//! handlers call and always yields a record, substituting
//! `CandidateRecord::fallback()` on any failure.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::candidates::prompts::RESUME_EXTRACTION_PROMPT;
use crate::llm_client::{LanguageModel, LlmError, BOUNDED_GENERATION};
use crate::models::candidate::{CandidateRecord, NOT_SPECIFIED};

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_RESUME_CHARS: usize = 5000;

#[derive(Debug, Error)]
pub enum ResumeParseError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response JSON is not an object")]
    NotAnObject,

    #[error("resume contains no text")]
    EmptyResume,
}

/// Extracts a candidate record, substituting the fallback record on failure.
pub async fn parse_resume(
    resume_text: &str,
    file_type: &str,
    llm: &dyn LanguageModel,
) -> CandidateRecord {
    match extract_candidate(resume_text, file_type, llm).await {
        Ok(record) => record,
        Err(e) => {
            warn!("Error parsing resume, storing fallback record: {e}");
            CandidateRecord::fallback()
        }
    }
}

pub async fn extract_candidate(
    resume_text: &str,
    file_type: &str,
    llm: &dyn LanguageModel,
) -> Result<CandidateRecord, ResumeParseError> {
    if resume_text.trim().is_empty() {
        return Err(ResumeParseError::EmptyResume);
    }

    let prompt = RESUME_EXTRACTION_PROMPT
        .replace("{file_type}", file_type)
        .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS));

    let response = llm.generate(&prompt, &BOUNDED_GENERATION).await?;
    parse_candidate_json(&response)
}

/// Parses a model reply into a record, backfilling missing fields.
pub fn parse_candidate_json(response: &str) -> Result<CandidateRecord, ResumeParseError> {
    let payload = extract_json_payload(response);
    let value: Value = serde_json::from_str(&payload)?;
    let fields = value.as_object().ok_or(ResumeParseError::NotAnObject)?;

    Ok(CandidateRecord {
        name: text_field(fields, "name"),
        skills: skills_field(fields),
        experience: text_field(fields, "experience"),
        education: text_field(fields, "education"),
        experience_level: text_field(fields, "experience_level"),
    })
}

/// Picks the contents of a closed ```json fence if there is one, otherwise the
/// whole reply, then strips any leftover fence markers.
fn extract_json_payload(response: &str) -> String {
    let fenced = response.find("```json").and_then(|start| {
        let body = &response[start + "```json".len()..];
        body.find("```").map(|end| &body[..end])
    });

    fenced
        .unwrap_or(response)
        .replace("```", "")
        .trim()
        .to_string()
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => NOT_SPECIFIED.to_string(),
        Some(other) => other.to_string(),
    }
}

fn skills_field(fields: &Map<String, Value>) -> Vec<String> {
    match fields.get("skills") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns at most `max` characters of `text` without splitting a character.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
