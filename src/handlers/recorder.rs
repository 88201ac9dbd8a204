use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::recorder::RecorderHandle;
use crate::AppState;

use super::AppError;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RecorderConfig {
    /// Seconds between benchmark passes
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

fn default_interval() -> u64 {
    10
}

#[derive(Debug, Serialize)]
pub struct RecorderStatus {
    pub running: bool,
    pub message: String,
}

// ─── POST /recorder/start ────────────────────────────────────────

pub async fn start_recorder(
    State(state): State<Arc<AppState>>,
    Json(config): Json<RecorderConfig>,
) -> Result<Json<RecorderStatus>, AppError> {
    if config.interval_secs == 0 || config.interval_secs > 3600 {
        return Err(AppError::BadRequest(
            "interval_secs must be between 1 and 3600".into(),
        ));
    }

    spawn_recorder(&state, config.interval_secs).await?;

    Ok(Json(RecorderStatus {
        running: true,
        message: format!("Recording every {}s", config.interval_secs),
    }))
}

/// Start the background recorder unless one is already running.
/// Also used by `main` when autostart is configured.
pub async fn spawn_recorder(state: &AppState, interval_secs: u64) -> Result<(), AppError> {
    // Hold the handle lock across check-and-set so two starts cannot race
    let mut guard = state.recorder_handle.lock().await;

    if state.recorder_running.swap(true, Ordering::SeqCst) {
        return Err(AppError::AlreadyRunning);
    }

    // A previous recorder that stopped on its own may still be parked here
    if let Some(old) = guard.take() {
        old.shutdown().await;
    }

    *guard = Some(RecorderHandle::spawn(
        state.recorder_running.clone(),
        state.store.clone(),
        interval_secs,
    ));

    Ok(())
}

// ─── POST /recorder/stop ─────────────────────────────────────────

pub async fn stop_recorder(State(state): State<Arc<AppState>>) -> Json<RecorderStatus> {
    let mut guard = state.recorder_handle.lock().await;

    if !state.recorder_running.swap(false, Ordering::SeqCst) {
        return Json(RecorderStatus {
            running: false,
            message: "Recorder is not running".into(),
        });
    }

    // Any pass in flight is stored before we answer.
    if let Some(handle) = guard.take() {
        handle.shutdown().await;
    }
    tracing::info!("recorder stopped by request");

    Json(RecorderStatus {
        running: false,
        message: "Recorder stopped".into(),
    })
}

// ─── GET /recorder/status ────────────────────────────────────────

pub async fn recorder_status(State(state): State<Arc<AppState>>) -> Json<RecorderStatus> {
    let running = state.recorder_running.load(Ordering::SeqCst);
    Json(RecorderStatus {
        running,
        message: if running {
            "Recording".into()
        } else {
            "Idle".into()
        },
    })
}
