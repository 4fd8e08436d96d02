//! Insight Generator: markdown career advice for a stored candidate.

use tracing::warn;

use crate::candidates::prompts::CAREER_INSIGHTS_PROMPT;
use crate::llm_client::{LanguageModel, LlmError, BOUNDED_GENERATION};
use crate::models::candidate::CandidateRecord;

pub const EMPTY_RESPONSE_MESSAGE: &str =
    "The AI service returned an empty response, so no career insights could be generated. \
    Please try again later.";

pub const QUOTA_MESSAGE: &str =
    "Unable to generate career insights: the AI service quota has been exceeded. \
    Please try again later.";

pub const ACCESS_MESSAGE: &str =
    "Unable to generate career insights: access to the AI service was denied. \
    Please check that the API key is valid and has the required permissions.";

pub const CONTENT_FILTERED_MESSAGE: &str =
    "Unable to generate career insights: the response was blocked by the AI service's content filter.";

pub const MODEL_NOT_FOUND_MESSAGE: &str =
    "Unable to generate career insights: the configured AI model is not available.";

/// Generates career insights. Always returns displayable text: either the
/// model's markdown or a message describing why there is none.
pub async fn generate_insights(candidate: &CandidateRecord, llm: &dyn LanguageModel) -> String {
    let prompt = build_insights_prompt(candidate);

    match llm.generate(&prompt, &BOUNDED_GENERATION).await {
        Ok(text) if text.trim().is_empty() => {
            warn!("LLM returned blank career insights");
            EMPTY_RESPONSE_MESSAGE.to_string()
        }
        Ok(text) => text,
        Err(e) => {
            warn!("Error generating insights: {e}");
            failure_message(&e)
        }
    }
}

/// Display text for a failed insights call.
pub fn failure_message(err: &LlmError) -> String {
    match err {
        LlmError::QuotaExceeded(_) => QUOTA_MESSAGE.to_string(),
        LlmError::AccessDenied(_) => ACCESS_MESSAGE.to_string(),
        LlmError::ContentFiltered(_) => CONTENT_FILTERED_MESSAGE.to_string(),
        LlmError::ModelNotFound(_) => MODEL_NOT_FOUND_MESSAGE.to_string(),
        LlmError::EmptyContent => EMPTY_RESPONSE_MESSAGE.to_string(),
        other => format!("Unable to generate career insights at this time: {other}"),
    }
}

fn build_insights_prompt(candidate: &CandidateRecord) -> String {
    CAREER_INSIGHTS_PROMPT
        .replace("{name}", &candidate.name)
        .replace("{skills}", &candidate.skills.join(", "))
        .replace("{experience}", &candidate.experience)
        .replace("{education}", &candidate.education)
        .replace("{experience_level}", &candidate.experience_level)
}
