//! Candidate matching: pluggable, trait-based filter over the candidate store.
//!
//! Default: `KeywordMatcher` (exact skill overlap + exact experience level).
//! It stands in for a future hybrid lexical + semantic ranker; its exact-equality
//! behavior is kept for compatibility, not as a contract for new backends.
//!
//! `AppState` holds an `Arc<dyn CandidateMatcher>`.

use crate::models::candidate::{CandidateMatch, CandidateRecord, SearchQuery};
use crate::store::Stored;

pub trait CandidateMatcher: Send + Sync {
    /// Returns the candidates that satisfy `query`, in the order given.
    fn search(
        &self,
        query: &SearchQuery,
        candidates: &[Stored<CandidateRecord>],
    ) -> Vec<CandidateMatch>;
}

/// Matches when at least one requested skill appears verbatim in the
/// candidate's skills AND the experience levels are byte-for-byte equal.
/// No normalization, no fuzzy matching, no scoring.
pub struct KeywordMatcher;

impl CandidateMatcher for KeywordMatcher {
    fn search(
        &self,
        query: &SearchQuery,
        candidates: &[Stored<CandidateRecord>],
    ) -> Vec<CandidateMatch> {
        candidates
            .iter()
            .filter(|stored| matches_query(query, &stored.record))
            .map(|stored| CandidateMatch {
                candidate_id: stored.id,
                details: stored.record.clone(),
            })
            .collect()
    }
}

fn matches_query(query: &SearchQuery, record: &CandidateRecord) -> bool {
    record.experience_level == query.experience_level
        && query.skills.iter().any(|skill| record.skills.contains(skill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn stored(skills: &[&str], level: &str) -> Stored<CandidateRecord> {
        Stored {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            record: CandidateRecord {
                name: "Test Candidate".to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                experience: "3 years".to_string(),
                education: "BSc".to_string(),
                experience_level: level.to_string(),
            },
        }
    }

    fn query(skills: &[&str], level: &str) -> SearchQuery {
        SearchQuery {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_level: level.to_string(),
        }
    }

    #[test]
    fn test_overlap_and_level_match() {
        let mid = stored(&["Python", "SQL"], "Mid");
        let senior = stored(&["Python", "SQL"], "Senior");
        let results = KeywordMatcher.search(
            &query(&["Python"], "Mid"),
            &[mid.clone(), senior],
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate_id, mid.id);
        assert_eq!(results[0].details, mid.record);
    }

    #[test]
    fn test_no_skill_overlap_excludes() {
        let candidate = stored(&["Java"], "Mid");
        let results = KeywordMatcher.search(&query(&["Python", "Go"], "Mid"), &[candidate]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let candidate = stored(&["Python"], "Mid");
        assert!(KeywordMatcher
            .search(&query(&["python"], "Mid"), &[candidate.clone()])
            .is_empty());
        assert!(KeywordMatcher
            .search(&query(&["Python"], "mid"), &[candidate])
            .is_empty());
    }

    #[test]
    fn test_empty_query_skills_match_nothing() {
        let candidate = stored(&["Python"], "Mid");
        assert!(KeywordMatcher.search(&query(&[], "Mid"), &[candidate]).is_empty());
    }

    #[test]
    fn test_results_keep_input_order() {
        let first = stored(&["Rust"], "Senior");
        let second = stored(&["Rust", "Go"], "Senior");
        let results = KeywordMatcher.search(
            &query(&["Go", "Rust"], "Senior"),
            &[first.clone(), second.clone()],
        );
        let ids: Vec<Uuid> = results.iter().map(|m| m.candidate_id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
