use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use crate::bench;
use crate::store::MetricStore;

/// A spawned recorder task plus the signal that ends it. Each run gets its
/// own `Notify`, so a permit left over from one stop cannot end the next run.
pub struct RecorderHandle {
    pub task: tokio::task::JoinHandle<()>,
    pub stop: Arc<Notify>,
}

impl RecorderHandle {
    pub fn spawn(running: Arc<AtomicBool>, store: MetricStore, interval_secs: u64) -> Self {
        let stop = Arc::new(Notify::new());
        let task = tokio::spawn(run(running, stop.clone(), store, interval_secs));
        Self { task, stop }
    }

    /// Signal the task and wait until it has exited.
    pub async fn shutdown(self) {
        self.stop.notify_one();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "recorder task ended abnormally");
        }
    }
}

/// Periodically runs a full benchmark pass and stores the three records.
///
/// Stops once `running` is cleared; `stop` wakes it out of the tick wait.
/// A pass already underway finishes and is stored first, so a caller that
/// awaits the task has seen every row it will write.
pub async fn run(
    running: Arc<AtomicBool>,
    stop: Arc<Notify>,
    store: MetricStore,
    interval_secs: u64,
) {
    tracing::info!(interval_secs, "recorder started");

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut passes: u64 = 0;
    while running.load(Ordering::SeqCst) {
        tokio::select! {
            biased;
            _ = stop.notified() => break,
            _ = ticker.tick() => {}
        }
        if !running.load(Ordering::SeqCst) {
            break;
        }

        match record_once(store.clone()).await {
            Ok(()) => passes += 1,
            Err(e) => tracing::warn!(error = %e, "recorder pass failed"),
        }
    }

    running.store(false, Ordering::SeqCst);
    tracing::info!(passes, "recorder stopped");
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Bench(#[from] bench::BenchError),

    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Benchmark once and persist every record under its history key.
async fn record_once(store: MetricStore) -> Result<(), RecordError> {
    tokio::task::spawn_blocking(move || -> Result<(), RecordError> {
        let all = bench::get_all_metrics()?;
        for (alg, rec) in all.iter() {
            store.save_record(alg.history_key(), rec)?;
        }
        tracing::debug!("recorder pass stored");
        Ok(())
    })
    .await?
}
