use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub static RESPONSE_TIME_US: HeaderName = HeaderName::from_static("x-response-time-us");
pub static SERVER_TIMING: HeaderName = HeaderName::from_static("server-timing");

/// Adds two response headers to every request:
///
///   X-Response-Time-Us: total handler wall time in microseconds
///   Server-Timing: same value in the standard Server-Timing format
///
/// and logs one line per request, except static files and the SSE stream.
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let start = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = start.elapsed();
    let us = elapsed.as_micros() as u64;

    // ── Inject response headers ─────────────────────────────────
    if let Ok(val) = HeaderValue::from_str(&us.to_string()) {
        response.headers_mut().insert(RESPONSE_TIME_US.clone(), val);
    }

    let server_timing = format!("total;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
    if let Ok(val) = HeaderValue::from_str(&server_timing) {
        response.headers_mut().insert(SERVER_TIMING.clone(), val);
    }

    // ── Request log ─────────────────────────────────────────────
    if path.starts_with("/static/") || path.ends_with("/stream") {
        return response;
    }
    let status = response.status().as_u16();
    match status {
        500..=599 => tracing::error!(%method, %path, status, us, "request"),
        400..=499 => tracing::warn!(%method, %path, status, us, "request"),
        _ => tracing::info!(%method, %path, status, us, "request"),
    }

    response
}
