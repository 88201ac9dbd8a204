//! Benchmark dashboard comparing a simulated post-quantum KEM, RSA-2048 and
//! X25519: the timing harness in [`bench`], SQLite history in [`store`], and
//! the axum service around them.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

pub mod bench;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod recorder;
pub mod server;
pub mod store;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// SQLite-backed history; opens a connection per operation.
    pub store: store::MetricStore,

    /// Period of the live SSE feed.
    pub stream_interval: Duration,

    /// Flag checked by the recorder task on each tick.
    pub recorder_running: Arc<AtomicBool>,

    /// The spawned recorder task and its stop signal.
    pub recorder_handle: tokio::sync::Mutex<Option<recorder::RecorderHandle>>,
}

impl AppState {
    pub fn new(store: store::MetricStore, stream_interval: Duration) -> Self {
        Self {
            store,
            stream_interval,
            recorder_running: Arc::new(AtomicBool::new(false)),
            recorder_handle: tokio::sync::Mutex::new(None),
        }
    }
}
