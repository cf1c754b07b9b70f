//! ClauseCheck Server
//!
//! HTTP surface for contract analysis: PDF upload, analysis listing,
//! retrieval, deletion and health.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use clausecheck_analyzer::{Analyzer, AnalyzerError};
use clausecheck_llm::{LlmError, OpenAiProvider};
use clausecheck_store::{SqliteStore, StoreError};
use config::ServerConfig;
use extract::PdfTextExtractor;
use handlers::{create_router, AppState};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

pub use error::ApiError;
pub use extract::{ExtractError, TextExtractor};

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Database could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// LLM client could not be built
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Analyzer rejected its configuration
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the production application state from configuration
pub fn build_state(
    config: &ServerConfig,
) -> Result<AppState<OpenAiProvider, SqliteStore>, ServerError> {
    let store = SqliteStore::new(&config.database_path)?;

    let provider = OpenAiProvider::with_timeout(
        &config.llm.endpoint,
        &config.llm.model,
        config.llm.api_key()?,
        Duration::from_secs(config.llm.timeout_secs),
    )?;

    let analyzer = Analyzer::new(provider, config.analyzer.clone())?;

    Ok(AppState {
        analyzer: Arc::new(analyzer),
        store: Arc::new(Mutex::new(store)),
        extractor: Arc::new(PdfTextExtractor),
        recent_limit: config.recent_limit,
        probe_llm: config.health_probe_llm,
    })
}

/// Start the HTTP server
///
/// Opens the database, builds the LLM client and analyzer,
/// and starts the axum server.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting ClauseCheck server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Model: {} at {}", config.llm.model, config.llm.endpoint);

    let state = build_state(&config)?;
    let app = create_router(state, &config);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
