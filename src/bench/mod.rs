//! Timing harness for the three compared algorithms.
//!
//! Every measurement runs synchronously on the calling thread and builds a fresh
//! [`MetricRecord`]. Async callers should go through `spawn_blocking`.

pub mod ecdh;
pub mod pqc;
pub mod record;
pub mod rsa;
pub mod timer;

use serde::Serialize;

pub use record::{Algorithm, MetricRecord};

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("rsa: {0}")]
    Rsa(#[from] ::rsa::Error),

    #[error("random source: {0}")]
    Rng(#[from] rand::Error),

    #[error("x25519 exchange produced a non-contributory shared secret")]
    NonContributory,
}

/// Live response body: one record per algorithm, keyed `pqc` / `rsa` / `ecdh`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllMetrics {
    pub pqc: MetricRecord,
    pub rsa: MetricRecord,
    pub ecdh: MetricRecord,
}

impl AllMetrics {
    pub fn get(&self, algorithm: Algorithm) -> &MetricRecord {
        match algorithm {
            Algorithm::Pqc => &self.pqc,
            Algorithm::Rsa => &self.rsa,
            Algorithm::Ecdh => &self.ecdh,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &MetricRecord)> {
        Algorithm::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

/// Run PQC, then RSA, then ECDH. The first failure aborts the whole set.
pub fn get_all_metrics() -> Result<AllMetrics, BenchError> {
    let pqc = pqc::pqc_metrics()?;
    let rsa = rsa::rsa_metrics()?;
    let ecdh = ecdh::ecdh_metrics()?;

    tracing::debug!(
        pqc_ms = pqc.total_ms,
        rsa_ms = rsa.total_ms,
        ecdh_ms = ecdh.total_ms,
        "benchmark pass complete"
    );

    Ok(AllMetrics { pqc, rsa, ecdh })
}
