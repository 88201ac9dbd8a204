use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::bench::AllMetrics;
use crate::metrics::PercentileSet;
use crate::store::HistoryPoint;
use crate::AppState;

use super::{run_benchmark, AppError};

// ─── GET /metrics/live ───────────────────────────────────────────
/// Fresh numbers on every call; nothing is cached.

pub async fn live_metrics() -> Result<Json<AllMetrics>, AppError> {
    Ok(Json(run_benchmark().await?))
}

// ─── GET /metrics/history/:algorithm ─────────────────────────────
/// Stored `[timestamp, total_ms]` pairs. `/metrics/history/rsa` reads `RSA`.

pub async fn history_metrics(
    State(state): State<Arc<AppState>>,
    Path(algorithm): Path<String>,
) -> Result<Json<Vec<HistoryPoint>>, AppError> {
    let store = state.store.clone();
    let key = algorithm.to_uppercase();
    let points = tokio::task::spawn_blocking(move || store.history(&key)).await??;
    Ok(Json(points))
}

// ─── GET /metrics/summary/:algorithm ─────────────────────────────

pub async fn summary_metrics(
    State(state): State<Arc<AppState>>,
    Path(algorithm): Path<String>,
) -> Result<Json<PercentileSet>, AppError> {
    let store = state.store.clone();
    let key = algorithm.to_uppercase();
    let points = tokio::task::spawn_blocking(move || store.history(&key)).await??;
    Ok(Json(PercentileSet::from_history(&points)))
}

// ─── POST /metrics/record ────────────────────────────────────────
/// One benchmark pass, persisted and echoed back.

pub async fn record_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AllMetrics>, AppError> {
    let all = run_benchmark().await?;
    let store = state.store.clone();
    let saved = all.clone();
    tokio::task::spawn_blocking(move || {
        saved
            .iter()
            .try_for_each(|(alg, rec)| store.save_record(alg.history_key(), rec))
    })
    .await??;
    Ok(Json(all))
}

// ─── GET /health ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "running" })
}
