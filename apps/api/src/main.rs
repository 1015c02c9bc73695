mod analysis;
mod config;
mod errors;
mod export;
mod llm_client;
mod models;
mod parsing;
mod resume;
mod rewrite;
mod routes;
mod state;
mod store;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::InMemoryResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Reactor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize text generation client
    let llm = LlmClient::new(LlmSettings {
        api_key: config.nvidia_api_key.clone(),
        base_url: config.nvidia_base_url.clone(),
        model: config.text_model.clone(),
        max_retries: config.llm_max_retries,
    })?;
    if config.nvidia_api_key.is_empty() {
        warn!("NVIDIA_API_KEY is not set; keywords fall back to pattern matches and rewrites return the input");
    }
    info!("LLM client initialized (model: {})", llm.model());

    info!(
        "ATS weights: keyword={} format={} experience={} skills={}",
        config.ats_weights.keyword_match,
        config.ats_weights.format_compliance,
        config.ats_weights.experience_relevance,
        config.ats_weights.skills_coverage
    );

    // Build app state
    let state = AppState::new(
        Arc::new(InMemoryResumeStore::new()),
        Arc::new(llm),
        config.clone(),
    );

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins(&config.allowed_origins)))
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parses configured origins into header values, skipping malformed entries.
fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring malformed CORS origin: {origin}");
                None
            }
        })
        .collect()
}
