mod config;
mod errors;
mod extraction;
mod facts;
mod interview;
mod llm_client;
mod models;
mod parser;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{read_document, PdfPageExtractor};
use crate::interview::responder::Responder;
use crate::interview::store::SessionStore;
use crate::llm_client::{LlmClient, OfflineGenerator, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mock Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize text generator: live LLM when a key is configured, canned answers otherwise
    let generator: Arc<dyn TextGenerator> = match &config.llm_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_timeout())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(llm)
        }
        None => {
            warn!("LLM_API_KEY not set; answers will come from the canned fallback table");
            Arc::new(OfflineGenerator)
        }
    };
    let responder = Arc::new(Responder::new(generator, config.llm_timeout()));

    let mut sessions = SessionStore::new(responder);
    if let Some(path) = &config.resume_path {
        // An unreadable preload file is fatal
        let document = read_document(path).await?;
        let record = parser::parse(&extraction::extract_text(&document, &PdfPageExtractor));
        info!("Preloaded resume from {}", path.display());
        sessions = sessions.with_resume(record);
    }

    // Drop abandoned sessions in the background
    let shutdown = CancellationToken::new();
    let sweeper = sessions.spawn_eviction(
        config.session_sweep(),
        config.session_idle(),
        shutdown.clone(),
    );

    // Build app state
    let state = AppState {
        sessions,
        config: config.clone(),
        page_extractor: Arc::new(PdfPageExtractor),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    shutdown.cancel();
    sweeper.await?;
    Ok(())
}
