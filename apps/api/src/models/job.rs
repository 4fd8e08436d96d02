use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_title: String,
    pub required_skills: Vec<String>,
    pub description: String,
    pub experience_level: String,
}

/// A posting together with its store key, flattened on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub job_id: Uuid,
    #[serde(flatten)]
    pub posting: JobPosting,
}
