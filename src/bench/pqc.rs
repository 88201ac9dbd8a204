use rand::rngs::OsRng;
use rand::RngCore;

use super::record::{Algorithm, MetricRecord, PhaseTimings};
use super::timer::{self, DEFAULT_RUNS};
use super::BenchError;

// Stand-in sizes for a lattice KEM. Random bytes only; no real KEM runs.
const KEYGEN_BYTES: usize = 32;
const CIPHERTEXT_BYTES: usize = 768;
const SHARED_SECRET_BYTES: usize = 32;

/// Simulated post-quantum KEM measurement.
pub fn pqc_metrics() -> Result<MetricRecord, BenchError> {
    measure(token_bytes)
}

/// Times each phase around `draw`; any failed draw, including one inside the
/// throughput loop, aborts the record.
fn measure(
    mut draw: impl FnMut(usize) -> Result<Vec<u8>, BenchError>,
) -> Result<MetricRecord, BenchError> {
    let (seed, keygen_ms) = timer::timed(|| draw(KEYGEN_BYTES));
    seed?;

    let (ct, encrypt_ms) = timer::timed(|| draw(CIPHERTEXT_BYTES));
    ct?;

    let (ss, decrypt_ms) = timer::timed(|| draw(SHARED_SECRET_BYTES));
    ss?;

    let throughput_ops = timer::try_throughput(|| draw(KEYGEN_BYTES), DEFAULT_RUNS)?;

    Ok(MetricRecord::new(
        Algorithm::Pqc,
        PhaseTimings {
            keygen_ms,
            encrypt_ms,
            decrypt_ms,
        },
        throughput_ops,
    ))
}

fn token_bytes(len: usize) -> Result<Vec<u8>, BenchError> {
    let mut buf = vec![0u8; len];
    OsRng.try_fill_bytes(&mut buf)?;
    Ok(buf)
}
