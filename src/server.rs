use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::metrics::stream;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes, middleware, and static serving.
pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        // ── Pages ───────────────────────────────────────────────
        .route("/", get(handlers::pages::home))
        .route("/insights", get(handlers::pages::insights))
        // ── Metrics ─────────────────────────────────────────────
        .route("/metrics/live", get(handlers::live::live_metrics))
        .route("/metrics/stream", get(stream::metrics_stream))
        .route(
            "/metrics/history/:algorithm",
            get(handlers::live::history_metrics),
        )
        .route(
            "/metrics/summary/:algorithm",
            get(handlers::live::summary_metrics),
        )
        .route("/metrics/record", post(handlers::live::record_metrics))
        // ── Recorder control ────────────────────────────────────
        .route(
            "/recorder/start",
            post(handlers::recorder::start_recorder),
        )
        .route("/recorder/stop", post(handlers::recorder::stop_recorder))
        .route(
            "/recorder/status",
            get(handlers::recorder::recorder_status),
        )
        .route("/health", get(handlers::live::health))
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
        // ── Browser assets ──────────────────────────────────────
        .nest_service("/static", ServeDir::new(static_dir))
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::store::MetricStore;

    fn app(dir: &tempfile::TempDir) -> (Router, Arc<AppState>) {
        let store = MetricStore::init(dir.path().join("metrics.db")).unwrap();
        let state = Arc::new(AppState::new(store, Duration::from_secs(3)));
        (create_router(state.clone(), dir.path()), state)
    }

    async fn call(router: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_running() {
        let dir = tempfile::tempdir().unwrap();
        let (router, _) = app(&dir);
        let (status, body) = call(router, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "running"}));
    }

    #[tokio::test]
    async fn timing_headers_present() {
        let dir = tempfile::tempdir().unwrap();
        let (router, _) = app(&dir);
        let resp = router.oneshot(get("/health")).await.unwrap();
        assert!(resp.headers().contains_key(&timing::RESPONSE_TIME_US));
        let st = resp.headers()[&timing::SERVER_TIMING].to_str().unwrap();
        assert!(st.starts_with("total;dur="));
    }

    #[tokio::test]
    async fn history_path_is_upper_cased() {
        let dir = tempfile::tempdir().unwrap();
        let (router, state) = app(&dir);
        for _ in 0..3 {
            state.store.save_metric("RSA", 50.0, 1.0, 2.0).unwrap();
        }

        let (status, body) = call(router.clone(), get("/metrics/history/rsa")).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][1], serde_json::json!(53.0));

        let (status, body) = call(router, get("/metrics/history/pqc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn summary_counts_history() {
        let dir = tempfile::tempdir().unwrap();
        let (router, state) = app(&dir);
        state.store.save_metric("ECDH", 0.2, 0.1, 0.0).unwrap();
        state.store.save_metric("ECDH", 0.4, 0.1, 0.0).unwrap();

        let (status, body) = call(router, get("/metrics/summary/ecdh")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn live_returns_three_algorithms() {
        let dir = tempfile::tempdir().unwrap();
        let (router, _) = app(&dir);
        let (status, body) = call(router, get("/metrics/live")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pqc"]["quantum_score"], 1);
        assert_eq!(body["rsa"]["quantum_score"], 0);
        assert_eq!(body["ecdh"]["decrypt_ms"], 0.0);
    }

    #[tokio::test]
    async fn record_persists_each_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let (router, state) = app(&dir);
        let (status, _) = call(router, post_json("/metrics/record", "")).await;
        assert_eq!(status, StatusCode::OK);
        for key in ["PQC", "RSA", "ECDH"] {
            assert_eq!(state.store.history(key).unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn recorder_rejects_bad_interval() {
        let dir = tempfile::tempdir().unwrap();
        let (router, _) = app(&dir);
        let (status, body) =
            call(router, post_json("/recorder/start", r#"{"interval_secs":0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn recorder_start_stop_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let (router, state) = app(&dir);

        let (status, body) = call(
            router.clone(),
            post_json("/recorder/start", r#"{"interval_secs":3600}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["running"], true);

        let (status, _) = call(router.clone(), post_json("/recorder/start", "{}")).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = call(router.clone(), get("/recorder/status")).await;
        assert_eq!(body["running"], true);

        let (_, body) = call(router.clone(), post_json("/recorder/stop", "")).await;
        assert_eq!(body["running"], false);

        // nothing lands after the stop response
        let rows_at_stop = state.store.history("RSA").unwrap().len();
        assert!(rows_at_stop <= 1);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(state.store.history("RSA").unwrap().len(), rows_at_stop);

        let (_, body) = call(router.clone(), get("/recorder/status")).await;
        assert_eq!(body["message"], "Idle");

        // a fresh start after a stop is not ended by the previous stop signal
        let (status, _) = call(
            router.clone(),
            post_json("/recorder/start", r#"{"interval_secs":3600}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let (_, body) = call(router.clone(), get("/recorder/status")).await;
        assert_eq!(body["running"], true);
        call(router, post_json("/recorder/stop", "")).await;
    }

    #[tokio::test]
    async fn insights_page_loads_script() {
        let dir = tempfile::tempdir().unwrap();
        let (router, _) = app(&dir);
        let resp = router.oneshot(get("/insights")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/static/app.js"));
    }
}
