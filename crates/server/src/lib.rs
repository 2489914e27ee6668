//! 见心AI HTTP server
//!
//! Serves the browser UI and the two endpoints it talks to: a status
//! endpoint telling the page whether analysis is available, and the
//! diagnose endpoint that forwards one screenshot to the inference
//! gateway and answers with the resulting shell state.

use anyhow::{Context, Result};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use diagnosis_core::{Mode, Screenshot, ShellState, StatusResponse};
use llm_bridge::{GeminiGateway, InferenceGateway, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Largest accepted request body, matching Gemini's inline data ceiling
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone)]
pub struct AppState {
    /// Absent when no credential was configured; analysis is then disabled
    gateway: Option<Arc<dyn InferenceGateway>>,
}

impl AppState {
    pub fn new(gateway: Option<Arc<dyn InferenceGateway>>) -> Self {
        Self { gateway }
    }

    /// Build the production state from startup settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let gateway: Option<Arc<dyn InferenceGateway>> = match settings.require_credential() {
            Ok(credential) => {
                let gateway = GeminiGateway::new(settings.gemini.clone(), credential.clone())
                    .context("Failed to create Gemini gateway")?;
                tracing::info!(model = gateway.model(), "Analysis enabled");
                Some(Arc::new(gateway))
            }
            Err(e) => {
                tracing::warn!("{} Analysis disabled until a key is configured", e);
                None
            }
        };

        Ok(Self::new(gateway))
    }

    pub fn analysis_enabled(&self) -> bool {
        self.gateway.is_some()
    }
}

/// Where to listen and what to serve
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub addr: String,
    /// Built frontend (trunk `dist/`), served for every non-API path
    pub static_dir: Option<PathBuf>,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            static_dir: None,
        }
    }
}

/// Assemble the router
pub fn app(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/status", get(status))
        .route("/api/diagnose", post(diagnose))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped
pub async fn serve(options: ServeOptions, settings: &Settings) -> Result<()> {
    let state = AppState::from_settings(settings)?;
    let app = app(state, options.static_dir.clone());

    let listener = tokio::net::TcpListener::bind(&options.addr)
        .await
        .with_context(|| format!("Failed to bind {}", options.addr))?;
    tracing::info!("Server listening on {}", options.addr);
    if let Some(dir) = &options.static_dir {
        tracing::info!("Serving frontend from {}", dir.display());
    }

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse::new(state.analysis_enabled()))
}

async fn diagnose(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> (StatusCode, Json<ShellState>) {
    let Some(gateway) = state.gateway.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ShellState::configuration_error()),
        );
    };

    let (image, mode) = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err((code, message)) => {
            tracing::debug!(status = %code, "Rejected upload: {}", message);
            return (code, Json(ShellState::input_error(message)));
        }
    };

    let outcome = gateway.diagnose(&image, mode).await;
    let code = if outcome.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    (code, Json(ShellState::from_outcome(outcome)))
}

/// Status and message for a form that could not be read
///
/// Bodies over [`MAX_UPLOAD_BYTES`] surface here as 413.
fn multipart_rejection(err: MultipartError) -> (StatusCode, String) {
    let code = err.status();
    if code == StatusCode::PAYLOAD_TOO_LARGE {
        let message = format!(
            "upload exceeds the {} MiB limit ({})",
            MAX_UPLOAD_BYTES / (1024 * 1024),
            err.body_text()
        );
        (code, message)
    } else {
        (code, err.body_text())
    }
}

fn bad_input(detail: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, detail.to_string())
}

/// Pull the `mode` and `image` fields out of the form
async fn read_upload(
    mut multipart: Multipart,
) -> Result<(Screenshot, Mode), (StatusCode, String)> {
    let mut mode = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_rejection)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("mode") => {
                let value = field.text().await.map_err(multipart_rejection)?;
                mode = Some(Mode::from_label(&value).map_err(bad_input)?);
            }
            Some("image") => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_rejection)?;
                image = Some(
                    Screenshot::from_upload(bytes.to_vec(), filename.as_deref())
                        .map_err(bad_input)?,
                );
            }
            _ => {}
        }
    }

    let mode = mode.ok_or_else(|| bad_input("missing form field 'mode'"))?;
    let image = image.ok_or_else(|| bad_input("missing form field 'image'"))?;
    Ok((image, mode))
}
