use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value used for any field the model could not supply.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Structured data extracted from a single resume.
/// `experience` and `education` are free text; `experience_level` is
/// conventionally `Entry`, `Mid`, `Senior` or `Not specified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
    pub experience_level: String,
}

impl CandidateRecord {
    /// Placeholder record stored when a resume could not be parsed.
    pub fn fallback() -> Self {
        Self {
            name: "Candidate".to_string(),
            skills: vec![NOT_SPECIFIED.to_string()],
            experience: NOT_SPECIFIED.to_string(),
            education: NOT_SPECIFIED.to_string(),
            experience_level: NOT_SPECIFIED.to_string(),
        }
    }
}

/// Transient filter for `POST /search-candidates/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub skills: Vec<String>,
    pub experience_level: String,
}

/// A stored candidate as returned by search and lookup.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateMatch {
    pub candidate_id: Uuid,
    pub details: CandidateRecord,
}
