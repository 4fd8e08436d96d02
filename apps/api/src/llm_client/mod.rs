//! LLM Client: the single point of entry for all Gemini API calls in TalentMatch.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All LLM interactions go through the `LanguageModel` trait defined here.
//!
//! Model: gemini-1.5-flash (hardcoded; only the API base URL is configurable)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for all LLM calls in TalentMatch.
pub const MODEL: &str = "gemini-1.5-flash";

/// Finish/block reasons Gemini reports when its safety filters reject content.
const FILTERED_REASONS: &[&str] = &["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("API access denied: {0}")]
    AccessDenied(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("LLM request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Maps a non-success Gemini response onto a tagged variant.
    /// `api_status` is the `error.status` string from the body, e.g. `RESOURCE_EXHAUSTED`.
    pub fn from_api(status: u16, api_status: Option<&str>, message: String) -> Self {
        match (status, api_status) {
            (429, _) | (_, Some("RESOURCE_EXHAUSTED")) => LlmError::QuotaExceeded(message),
            (401 | 403, _) | (_, Some("PERMISSION_DENIED" | "UNAUTHENTICATED")) => {
                LlmError::AccessDenied(message)
            }
            (404, _) | (_, Some("NOT_FOUND")) => LlmError::ModelNotFound(message),
            _ => classify_message(status, message),
        }
    }
}

/// Substring classification for errors the status code does not pin down.
fn classify_message(status: u16, message: String) -> LlmError {
    let lower = message.to_lowercase();
    if lower.contains("quota") {
        LlmError::QuotaExceeded(message)
    } else if lower.contains("permission") || lower.contains("access") {
        LlmError::AccessDenied(message)
    } else if lower.contains("content") && lower.contains("filtered") {
        LlmError::ContentFiltered(message)
    } else if lower.contains("not found") || lower.contains("404") {
        LlmError::ModelNotFound(message)
    } else {
        LlmError::Api { status, message }
    }
}

/// Sampling bounds sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// Low randomness, capped output. Shared by extraction and insight prompts.
pub const BOUNDED_GENERATION: GenerationConfig = GenerationConfig {
    temperature: 0.2,
    top_p: 0.8,
    top_k: 40,
    max_output_tokens: 2048,
};

/// Anything that can turn a prompt into text. `LlmClient` is the production
/// implementation; handlers only ever see `Arc<dyn LanguageModel>`.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or the reason there is none.
    pub fn into_text(self) -> Result<String, LlmError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::ContentFiltered(format!("prompt blocked ({reason})")));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyContent)?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            if let Some(reason) = candidate
                .finish_reason
                .filter(|r| FILTERED_REASONS.contains(&r.as_str()))
            {
                return Err(LlmError::ContentFiltered(format!("response blocked ({reason})")));
            }
            return Err(LlmError::EmptyContent);
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    status: Option<String>,
}

/// The Gemini client used by all services in TalentMatch.
/// No retries: a failed call fails immediately and the caller picks a fallback.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_base: &str, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            endpoint: format!("{api_base}/v1beta/models/{MODEL}:generateContent"),
        })
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_body(status, &response.text().await.unwrap_or_default()));
        }

        let raw = response.text().await.map_err(map_transport_error)?;
        let body = decode_response(&raw)?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        body.into_text()
    }
}

fn map_transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Http(err)
    }
}

fn decode_response(raw: &str) -> Result<GenerateContentResponse, LlmError> {
    Ok(serde_json::from_str(raw)?)
}

fn error_from_body(status: StatusCode, body: &str) -> LlmError {
    match serde_json::from_str::<GeminiError>(body) {
        Ok(e) => LlmError::from_api(status.as_u16(), e.error.status.as_deref(), e.error.message),
        Err(_) => LlmError::from_api(status.as_u16(), None, body.to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_429_is_quota() {
        let err = LlmError::from_api(429, None, "slow down".to_string());
        assert!(matches!(err, LlmError::QuotaExceeded(_)));
    }

    #[test]
    fn test_resource_exhausted_status_is_quota() {
        let err = LlmError::from_api(400, Some("RESOURCE_EXHAUSTED"), "x".to_string());
        assert!(matches!(err, LlmError::QuotaExceeded(_)));
    }

    #[test]
    fn test_403_is_access_denied() {
        let err = LlmError::from_api(403, Some("PERMISSION_DENIED"), "nope".to_string());
        assert!(matches!(err, LlmError::AccessDenied(_)));
    }

    #[test]
    fn test_404_is_model_not_found() {
        let err = LlmError::from_api(404, None, "models/x is not found".to_string());
        assert!(matches!(err, LlmError::ModelNotFound(_)));
    }

    #[test]
    fn test_message_substrings_classify_unknown_statuses() {
        let quota = LlmError::from_api(400, None, "Quota limit reached".to_string());
        assert!(matches!(quota, LlmError::QuotaExceeded(_)));

        let filtered = LlmError::from_api(400, None, "Content was filtered".to_string());
        assert!(matches!(filtered, LlmError::ContentFiltered(_)));

        let access = LlmError::from_api(400, None, "no access to project".to_string());
        assert!(matches!(access, LlmError::AccessDenied(_)));
    }

    #[test]
    fn test_unclassified_error_keeps_status_and_message() {
        let err = LlmError::from_api(500, Some("INTERNAL"), "backend exploded".to_string());
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_body_is_parsed() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = error_from_body(StatusCode::TOO_MANY_REQUESTS, body);
        match err {
            LlmError::QuotaExceeded(msg) => assert_eq!(msg, "Resource has been exhausted"),
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_request_uses_camel_case_generation_config() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hi" }],
            }],
            generation_config: &BOUNDED_GENERATION,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(value["generationConfig"]["topK"], 40);
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Hello, "}, {"text": "world"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 2}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "Hello, world");
    }

    #[test]
    fn test_blocked_prompt_is_content_filtered() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::ContentFiltered(_))));
    }

    #[test]
    fn test_safety_finish_without_text_is_content_filtered() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::ContentFiltered(_))));
    }

    #[test]
    fn test_undecodable_success_body_is_parse_error() {
        assert!(matches!(
            decode_response("<html>bad gateway</html>"),
            Err(LlmError::Parse(_))
        ));
        assert!(decode_response(r#"{"candidates": []}"#).is_ok());
    }

    #[test]
    fn test_no_candidates_is_empty_content() {
        let response = GenerateContentResponse::default();
        assert!(matches!(response.into_text(), Err(LlmError::EmptyContent)));
    }
}
