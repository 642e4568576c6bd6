mod config;
mod dashboard;
mod errors;
mod gateway;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::GeminiGateway;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::InFlight;
use crate::state::AppState;
use crate::store::AppStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireAI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize model gateway
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_api_base.clone())?;
    let gateway = Arc::new(GeminiGateway::new(llm));
    info!("AI gateway initialized (model: {})", llm_client::MODEL);

    // In-memory store; everything is discarded on exit
    let mut store = AppStore::new();
    if config.seed_demo_jobs {
        store.seed_demo_jobs();
        info!("Seeded {} demo job postings", store.jobs().len());
    }

    let state = AppState {
        store: store.shared(),
        gateway,
        in_flight: InFlight::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
