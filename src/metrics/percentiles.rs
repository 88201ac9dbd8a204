use hdrhistogram::Histogram;
use serde::Serialize;

use crate::store::HistoryPoint;

/// HdrHistogram range: 1 μs → 10 min, 3 significant figures
const HIST_LOW: u64 = 1;
const HIST_HIGH: u64 = 600_000_000;
const HIST_SIGFIG: u8 = 3;

/// Percentile breakdown of an algorithm's stored `total_ms` history.
/// Values are recorded in microseconds and reported in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileSet {
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub p999_ms: f64,
    pub count: u64,
}

impl PercentileSet {
    /// Build from history rows. Returns zeroed values if there are none.
    pub fn from_history(points: &[HistoryPoint]) -> Self {
        let Ok(mut hist) = Histogram::<u64>::new_with_bounds(HIST_LOW, HIST_HIGH, HIST_SIGFIG)
        else {
            return Self::empty();
        };

        for p in points {
            // clamp to ≥ 1 μs; negative or NaN totals land on the floor
            let us = (p.total_ms() * 1000.0).round().max(1.0) as u64;
            hist.saturating_record(us);
        }

        Self::from_histogram(&hist)
    }

    /// Extract a full percentile set from an HdrHistogram.
    pub fn from_histogram(hist: &Histogram<u64>) -> Self {
        if hist.len() == 0 {
            return Self::empty();
        }

        let ms = |us: u64| us as f64 / 1000.0;
        Self {
            min_ms: ms(hist.min()),
            max_ms: ms(hist.max()),
            mean_ms: hist.mean() / 1000.0,
            p50_ms: ms(hist.value_at_percentile(50.0)),
            p95_ms: ms(hist.value_at_percentile(95.0)),
            p99_ms: ms(hist.value_at_percentile(99.0)),
            p999_ms: ms(hist.value_at_percentile(99.9)),
            count: hist.len(),
        }
    }

    /// All-zero placeholder for an algorithm with no stored rows.
    pub fn empty() -> Self {
        Self {
            min_ms: 0.0,
            max_ms: 0.0,
            mean_ms: 0.0,
            p50_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            p999_ms: 0.0,
            count: 0,
        }
    }
}
