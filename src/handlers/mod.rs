pub mod live;
pub mod pages;
pub mod recorder;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::bench::BenchError;
use crate::store::StoreError;

// ─── Unified error type ──────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Bench(#[from] BenchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Recorder already running")]
    AlreadyRunning,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Bench(_) | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyRunning => StatusCode::CONFLICT,
        };
        let message = match &self {
            Self::Store(e) => format!("Store: {e}"),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }

        let body = serde_json::json!({
            "error":  message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Run a full benchmark pass off the async runtime.
pub async fn run_benchmark() -> Result<crate::bench::AllMetrics, AppError> {
    Ok(tokio::task::spawn_blocking(crate::bench::get_all_metrics).await??)
}
