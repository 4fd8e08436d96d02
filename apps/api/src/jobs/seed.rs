//! Sample job postings loaded into an empty job store at startup.

use tracing::info;

use crate::models::job::JobPosting;
use crate::store::RecordStore;

fn sample_jobs() -> Vec<JobPosting> {
    vec![
        JobPosting {
            job_title: "Senior Software Engineer".to_string(),
            required_skills: vec![
                "Python".to_string(),
                "Django".to_string(),
                "PostgreSQL".to_string(),
                "AWS".to_string(),
            ],
            description: "Design, build and operate backend services for a high-traffic \
                web platform. Mentor engineers and own architecture decisions."
                .to_string(),
            experience_level: "Senior".to_string(),
        },
        JobPosting {
            job_title: "Data Scientist".to_string(),
            required_skills: vec![
                "Python".to_string(),
                "Machine Learning".to_string(),
                "SQL".to_string(),
                "TensorFlow".to_string(),
            ],
            description: "Build predictive models, run experiments and turn data into \
                product insights together with the analytics team."
                .to_string(),
            experience_level: "Mid".to_string(),
        },
        JobPosting {
            job_title: "Frontend Developer".to_string(),
            required_skills: vec![
                "JavaScript".to_string(),
                "React".to_string(),
                "CSS".to_string(),
            ],
            description: "Implement responsive user interfaces and collaborate with \
                designers on new product features."
                .to_string(),
            experience_level: "Entry".to_string(),
        },
    ]
}

/// Inserts the sample postings unless the store already holds jobs.
/// Returns how many postings were inserted.
pub async fn seed_sample_jobs(store: &dyn RecordStore<JobPosting>) -> usize {
    if !store.is_empty().await {
        info!("Job store already populated, skipping sample jobs");
        return 0;
    }

    let jobs = sample_jobs();
    let count = jobs.len();
    for job in jobs {
        store.insert(job).await;
    }

    info!(count, "Seeded sample job postings");
    count
}
