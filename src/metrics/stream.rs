use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use crate::bench;
use crate::AppState;

// ─── GET /metrics/stream ─────────────────────────────────────────
/// Server-Sent Events endpoint.
/// Re-runs the full benchmark every `stream_interval` and pushes the
/// `AllMetrics` JSON. A failed pass becomes an `error` event; the stream
/// stays open.

pub async fn metrics_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let stream = IntervalStream::new(pass_ticker(state.stream_interval)).then(|_| async {
        let event = match tokio::task::spawn_blocking(bench::get_all_metrics).await {
            Ok(Ok(all)) => match serde_json::to_string(&all) {
                Ok(json) => Event::default().data(json),
                Err(e) => error_event(e.to_string()),
            },
            Ok(Err(e)) => error_event(e.to_string()),
            Err(e) => error_event(e.to_string()),
        };
        Ok(event)
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Ticker for benchmark passes. A pass can outlast the period; the next tick
/// then comes a full period after it instead of missed ticks bursting.
fn pass_ticker(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn error_event(message: String) -> Event {
    tracing::warn!(%message, "live stream pass failed");
    Event::default().event("error").data(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slow_passes_do_not_burst() {
        let ticker = pass_ticker(Duration::from_secs(3));
        assert_eq!(ticker.missed_tick_behavior(), MissedTickBehavior::Delay);
        assert_eq!(ticker.period(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn late_tick_is_followed_by_full_period() {
        let mut ticker = pass_ticker(Duration::from_secs(3));
        ticker.tick().await;

        // a pass that overruns two periods
        tokio::time::advance(Duration::from_secs(7)).await;
        ticker.tick().await;

        let before = tokio::time::Instant::now();
        ticker.tick().await;
        assert_eq!(before.elapsed(), Duration::from_secs(3));
    }
}
