//! HTTP request handlers for the contract analysis service.
//!
//! Implements upload, listing, retrieval, deletion and health endpoints using axum.

use crate::config::{ServerConfig, MAX_RECENT_LIMIT};
use crate::error::ApiError;
use crate::extract::TextExtractor;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use chrono::Utc;
use clausecheck_analyzer::Analyzer;
use clausecheck_domain::traits::{AnalysisStore, LlmProvider};
use clausecheck_domain::{AnalysisId, AnalysisRecord};
use clausecheck_store::StoreError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared application state
pub struct AppState<L: LlmProvider, S: AnalysisStore> {
    /// Document analysis pipeline
    pub analyzer: Arc<Analyzer<L>>,
    /// Record store; every operation is one locked call
    pub store: Arc<Mutex<S>>,
    /// Upload to text conversion
    pub extractor: Arc<dyn TextExtractor>,
    /// Maximum number of records returned by `GET /analyses`, capped at 100
    pub recent_limit: usize,
    /// Whether `GET /health` sends a test prompt to the LLM
    pub probe_llm: bool,
}

impl<L: LlmProvider, S: AnalysisStore> Clone for AppState<L, S> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            store: Arc::clone(&self.store),
            extractor: Arc::clone(&self.extractor),
            recent_limit: self.recent_limit,
            probe_llm: self.probe_llm,
        }
    }
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "connected" when the store answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// "connected" when the LLM answered, "not_checked" when the probe is off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339 time of the check
    pub timestamp: String,
}

const HEALTH_PROBE_SYSTEM: &str = "You are a connectivity check. Reply briefly.";
const HEALTH_PROBE_PROMPT: &str = "Hello, this is a connection test.";

fn lock_store<S>(store: &Mutex<S>) -> Result<MutexGuard<'_, S>, ApiError> {
    store
        .lock()
        .map_err(|_| ApiError::Storage(StoreError::LockPoisoned))
}

/// GET / - Service banner
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Contract Clause Checker API".to_string(),
    })
}

/// POST /upload-contract - Analyze an uploaded PDF and store the result
async fn upload_contract<L, S>(
    State(state): State<AppState<L, S>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisRecord>, ApiError>
where
    L: LlmProvider + 'static,
    S: AnalysisStore<Error = StoreError> + Send + 'static,
{
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read file: {}", e)))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::Validation("No file uploaded".to_string()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        warn!("Rejected upload {:?}: not a PDF", filename);
        return Err(ApiError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(ApiError::Validation("Uploaded file is empty".to_string()));
    }

    info!("Received {} ({} bytes)", filename, bytes.len());

    let extractor = Arc::clone(&state.extractor);
    let text = tokio::task::spawn_blocking(move || extractor.extract_text(&bytes))
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid PDF: {}", e)))??;

    let outcome = state.analyzer.analyze(&text).await?;
    let record = AnalysisRecord::new(filename, outcome.findings);

    lock_store(&state.store)?.create(&record)?;

    info!(
        "Stored analysis {} with {} findings ({} chunks, {} unparsed, {} ms)",
        record.id,
        record.analysis_results.len(),
        outcome.metadata.chunk_count,
        outcome.metadata.unparsed_chunks,
        outcome.metadata.processing_time_ms
    );

    Ok(Json(record))
}

/// GET /analyses - Most recent analyses, newest first
async fn list_analyses<L, S>(
    State(state): State<AppState<L, S>>,
) -> Result<Json<Vec<AnalysisRecord>>, ApiError>
where
    L: LlmProvider + 'static,
    S: AnalysisStore<Error = StoreError> + Send + 'static,
{
    let limit = state.recent_limit.min(MAX_RECENT_LIMIT);
    let records = lock_store(&state.store)?.list_recent(limit)?;
    Ok(Json(records))
}

/// GET /analysis/:id - One analysis
async fn get_analysis<L, S>(
    State(state): State<AppState<L, S>>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisRecord>, ApiError>
where
    L: LlmProvider + 'static,
    S: AnalysisStore<Error = StoreError> + Send + 'static,
{
    let id = AnalysisId::from_string(&id).map_err(|_| ApiError::NotFound)?;
    let record = lock_store(&state.store)?.get_by_id(&id)?;
    record.map(Json).ok_or(ApiError::NotFound)
}

/// DELETE /analysis/:id - Remove one analysis
async fn delete_analysis<L, S>(
    State(state): State<AppState<L, S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError>
where
    L: LlmProvider + 'static,
    S: AnalysisStore<Error = StoreError> + Send + 'static,
{
    let id = AnalysisId::from_string(&id).map_err(|_| ApiError::NotFound)?;
    let deleted = lock_store(&state.store)?.delete_by_id(&id)?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }

    info!("Deleted analysis {}", id);
    Ok(Json(MessageResponse {
        message: "Analysis deleted successfully".to_string(),
    }))
}

/// GET /health - Store and LLM reachability
async fn health_check<L, S>(State(state): State<AppState<L, S>>) -> Response
where
    L: LlmProvider + 'static,
    S: AnalysisStore<Error = StoreError> + Send + 'static,
{
    let llm_status = if state.probe_llm {
        "connected"
    } else {
        "not_checked"
    };

    match probe(&state).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthCheckResponse {
                status: "healthy".to_string(),
                database: Some("connected".to_string()),
                llm: Some(llm_status.to_string()),
                error: None,
                timestamp: Utc::now().to_rfc3339(),
            }),
        )
            .into_response(),
        Err(message) => {
            error!("Health check failed: {}", message);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthCheckResponse {
                    status: "unhealthy".to_string(),
                    database: None,
                    llm: None,
                    error: Some(message),
                    timestamp: Utc::now().to_rfc3339(),
                }),
            )
                .into_response()
        }
    }
}

async fn probe<L, S>(state: &AppState<L, S>) -> Result<(), String>
where
    L: LlmProvider + 'static,
    S: AnalysisStore<Error = StoreError> + Send + 'static,
{
    {
        let store = state
            .store
            .lock()
            .map_err(|_| StoreError::LockPoisoned.to_string())?;
        store.ping().map_err(|e| e.to_string())?;
    }

    if state.probe_llm {
        state
            .analyzer
            .provider()
            .generate(HEALTH_PROBE_SYSTEM, HEALTH_PROBE_PROMPT)
            .await
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Create the axum router with all routes
pub fn create_router<L, S>(state: AppState<L, S>, config: &ServerConfig) -> AxumRouter
where
    L: LlmProvider + 'static,
    S: AnalysisStore<Error = StoreError> + Send + 'static,
{
    AxumRouter::new()
        .route("/", get(root))
        .route("/upload-contract", post(upload_contract::<L, S>))
        .route("/analyses", get(list_analyses::<L, S>))
        .route(
            "/analysis/:id",
            get(get_analysis::<L, S>).delete(delete_analysis::<L, S>),
        )
        .route("/health", get(health_check::<L, S>))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}
