//! shortlist-api - HTTP API server for the shortlist service

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use shortlist_core::ShortlistRequest;
use shortlist_db::{Database, ShortlistRepository};
use shortlist_inference::HfBackend;
use shortlist_pipeline::{
    HttpDocumentFetcher, PdfTextExtractor, PipelineConfig, ShortlistPipeline,
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    db: Database,
    pipeline: Arc<ShortlistPipeline>,
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Request body for `POST /api/v1/shortlist`.
#[derive(Debug, Deserialize)]
struct ShortlistApiRequest {
    /// Candidate PDF URLs, caller order. Deduplication is the caller's job.
    #[serde(rename = "pdfUrls")]
    pdf_urls: Vec<String>,
    /// Requested selection size.
    n: i64,
}

/// Response body for `POST /api/v1/shortlist`.
#[derive(Debug, Serialize)]
struct ShortlistApiResponse {
    shortlisted: Vec<String>,
}

/// Response body for `GET /api/v1/events/:id/shortlist`.
#[derive(Debug, Serialize)]
struct EventShortlistResponse {
    event_id: Uuid,
    entries: Vec<shortlist_core::ShortlistEntry>,
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(shortlist_core::Error),
}

impl From<shortlist_core::Error> for ApiError {
    fn from(err: shortlist_core::Error) -> Self {
        use shortlist_core::Error;
        match &err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            Error::TooManyDocuments { .. } | Error::InsufficientCandidates { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            // Generation, parse, lookup, and persistence failures are all
            // collaborator faults from the caller's point of view.
            _ => ApiError::Internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid input: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Run the shortlisting pipeline for one event's candidate set.
async fn run_shortlist(
    State(state): State<AppState>,
    payload: Result<Json<ShortlistApiRequest>, JsonRejection>,
) -> Result<Json<ShortlistApiResponse>, ApiError> {
    let Json(request) = payload?;

    if request.n <= 0 {
        return Err(ApiError::BadRequest(
            "Invalid input: n must be a positive integer".to_string(),
        ));
    }

    let result = state
        .pipeline
        .run(&ShortlistRequest {
            urls: request.pdf_urls,
            n: request.n as usize,
        })
        .await?;

    Ok(Json(ShortlistApiResponse {
        shortlisted: result.shortlisted,
    }))
}

/// Read the currently persisted shortlist for an event.
async fn get_event_shortlist(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventShortlistResponse>, ApiError> {
    let entries = state.db.shortlists.list_for_event(event_id).await?;
    Ok(Json(EventShortlistResponse { event_id, entries }))
}

// =============================================================================
// SERVER
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter (default: "shortlist_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shortlist_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("shortlist-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .init();
        }
        Some(guard)
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
        None
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/shortlist".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");

    // Run pending database migrations on startup
    info!("Running database migrations...");
    db.migrate().await?;
    info!("Database migrations complete");

    // Pipeline collaborators
    let fetcher = Arc::new(HttpDocumentFetcher::from_env()?);
    let extractor = Arc::new(PdfTextExtractor::new());
    let generator = Arc::new(HfBackend::from_env()?);
    info!(model = %generator.config().gen_model, "Inference backend ready");

    let pipeline_config = pipeline_config_from_env();
    info!(
        max_candidates = pipeline_config.max_candidates,
        min_text_chars = pipeline_config.min_text_chars,
        excerpt_chars = pipeline_config.excerpt_chars,
        "Pipeline configured"
    );

    let pipeline = Arc::new(ShortlistPipeline::new(
        fetcher,
        extractor,
        generator,
        Arc::new(db.registrations.clone()),
        Arc::new(db.shortlists.clone()),
        pipeline_config,
    ));

    let state = AppState { db, pipeline };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/shortlist", post(run_shortlist))
        .route("/api/v1/events/:id/shortlist", get(get_event_shortlist))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Request bodies are small JSON documents; 1 MB is generous.
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pipeline tuning from the environment, falling back to the centralized
/// defaults.
fn pipeline_config_from_env() -> PipelineConfig {
    let defaults = PipelineConfig::default();
    PipelineConfig {
        max_candidates: env_usize("SHORTLIST_MAX_CANDIDATES", defaults.max_candidates),
        min_text_chars: env_usize("SHORTLIST_MIN_TEXT_CHARS", defaults.min_text_chars),
        excerpt_chars: env_usize("SHORTLIST_EXCERPT_CHARS", defaults.excerpt_chars),
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
