mod candidates;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::candidates::matcher::KeywordMatcher;
use crate::config::Config;
use crate::jobs::seed::seed_sample_jobs;
use crate::llm_client::LlmClient;
use crate::models::candidate::CandidateRecord;
use crate::models::job::JobPosting;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed numeric values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentMatch API v{}", env!("CARGO_PKG_VERSION"));

    if !config.has_api_key() {
        warn!("GEMINI_API_KEY not found in environment; using placeholder, model calls will fail");
    }

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_api_base,
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    // In-memory stores; nothing survives a restart
    let candidates: Arc<dyn RecordStore<CandidateRecord>> =
        Arc::new(InMemoryStore::<CandidateRecord>::new());
    let jobs: Arc<dyn RecordStore<JobPosting>> = Arc::new(InMemoryStore::<JobPosting>::new());
    seed_sample_jobs(jobs.as_ref()).await;

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        candidates,
        jobs,
        matcher: Arc::new(KeywordMatcher),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
