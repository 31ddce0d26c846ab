use crate::config::Config;
use crate::engine::{OcrEngine, Upload};
use crate::engines;
use crate::error::OcrError;
use crate::preprocessing::Pipeline;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Multipart field carrying the uploaded image
const IMAGE_FIELD: &str = "image";
/// Returned in place of empty or whitespace-only OCR output
pub const NO_TEXT_FOUND: &str = "No text found!";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn OcrEngine>,
    pub pipeline: Pipeline,
    pub config: Arc<Config>,
}

/// Successful extraction
#[derive(Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub engine: String,
    pub ocr_host: Option<String>,
    pub language: String,
    pub resize_threshold_bytes: usize,
    pub max_side_px: u32,
    pub max_file_size_bytes: usize,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let engine = engines::from_config(&config)?;
    let addr = format!("{}:{}", config.host, config.port);

    let state = AppState {
        engine,
        pipeline: Pipeline::from_config(&config),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/extract", post(handle_extract))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle text extraction requests
async fn handle_extract(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, OcrError> {
    let start = Instant::now();

    // A body that is not multipart at all carries no upload either
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Rejected non-multipart body: {}", rejection);
        OcrError::MissingFile
    })?;

    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await? {
        if upload.is_some() || field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        // Without a filename parameter the part is a plain form value
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await?;
        upload = Some(Upload {
            filename,
            data: data.into(),
        });
    }

    let Upload { filename, data } = upload.ok_or(OcrError::MissingFile)?;
    if filename.is_empty() {
        return Err(OcrError::EmptyFilename);
    }

    let pipeline = state.pipeline.clone();
    let prepared = tokio::task::spawn_blocking(move || pipeline.process(data))
        .await
        .map_err(|e| OcrError::Internal(format!("Preprocessing task failed: {}", e)))??;

    if prepared.resized {
        tracing::info!(
            "Downsized {} from {} to {} bytes in {}ms",
            filename,
            prepared.original_size,
            prepared.data.len(),
            prepared.total_time_ms
        );
    }

    let result = state
        .engine
        .process(Upload {
            filename,
            data: prepared.data,
        })
        .await?;

    let text = if result.text.trim().is_empty() {
        NO_TEXT_FOUND.to_string()
    } else {
        result.text
    };

    tracing::info!(
        "OCR completed in {}ms via {}, text length: {}",
        start.elapsed().as_millis(),
        state.engine.name(),
        text.len()
    );

    Ok(Json(ExtractResponse { text }))
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    let ocr_host = reqwest::Url::parse(&state.config.ocr_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string));

    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.engine.name().to_string(),
        ocr_host,
        language: state.config.language.clone(),
        resize_threshold_bytes: state.pipeline.resize_threshold(),
        max_side_px: state.pipeline.max_side(),
        max_file_size_bytes: state.config.max_file_size,
    })
}
