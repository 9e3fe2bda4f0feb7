mod analysis;
mod config;
mod db;
mod entities;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod scoring;
mod state;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::AnalysisPipeline;
use crate::config::Config;
use crate::db::create_pool;
use crate::entities::build_extractor;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::{LlmSuggester, SuggestionChain, SuggestionGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    analysis::store::ensure_schema(&db).await?;

    // Entity strategy is fixed here for the life of the process.
    let entities = build_extractor(&config);
    info!("Entity extraction backend: {}", entities.backend());

    // Suggestion chain: external service first when a credential is
    // configured, deterministic rules otherwise.
    let primary = config
        .anthropic_api_key
        .clone()
        .map(|key| LlmSuggester::new(LlmClient::new(key)));
    if primary.is_none() {
        info!("No ANTHROPIC_API_KEY configured; suggestions use the rule-based path");
    }
    let suggester: Arc<dyn SuggestionGenerator> = Arc::new(SuggestionChain::new(primary));

    let pipeline = AnalysisPipeline::new(entities, suggester);

    // Build app state
    let state = AppState { db, pipeline };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
