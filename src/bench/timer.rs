use std::time::{Duration, Instant};

/// Repetitions used by `throughput` callers with cheap operations.
pub const DEFAULT_RUNS: u32 = 50;

/// Smallest interval we will divide by. `Instant` can legitimately report a
/// zero-length span on coarse clocks when the operation is trivial.
const MIN_INTERVAL: Duration = Duration::from_nanos(1);

/// Run `op` once and return its result together with the elapsed wall time
/// in milliseconds (monotonic clock).
pub fn timed<T>(op: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let value = op();
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    (value, ms)
}

/// Run `op` exactly once, discarding its result, and return milliseconds.
pub fn elapsed_ms<T>(op: impl FnOnce() -> T) -> f64 {
    timed(|| std::hint::black_box(op())).1
}

/// Run `op` `runs` times back to back and return operations per second.
///
/// `runs == 0` yields `0.0` without invoking `op`. For operations that can
/// fail use [`try_throughput`].
pub fn throughput<T>(mut op: impl FnMut() -> T, runs: u32) -> f64 {
    if runs == 0 {
        return 0.0;
    }

    let start = Instant::now();
    for _ in 0..runs {
        std::hint::black_box(op());
    }
    ops_per_sec(runs, start.elapsed())
}

/// Like [`throughput`], but stops at the first `Err` and returns it.
pub fn try_throughput<T, E>(mut op: impl FnMut() -> Result<T, E>, runs: u32) -> Result<f64, E> {
    if runs == 0 {
        return Ok(0.0);
    }

    let start = Instant::now();
    for _ in 0..runs {
        std::hint::black_box(op()?);
    }
    Ok(ops_per_sec(runs, start.elapsed()))
}

/// `runs / elapsed`. A zero interval is clamped to one nanosecond so the
/// result is always finite.
pub fn ops_per_sec(runs: u32, elapsed: Duration) -> f64 {
    let elapsed = if elapsed.is_zero() {
        tracing::debug!(runs, "zero-length throughput interval, clamping");
        MIN_INTERVAL
    } else {
        elapsed
    };
    f64::from(runs) / elapsed.as_secs_f64()
}
