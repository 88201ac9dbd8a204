use rand::rngs::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey};

use super::record::{Algorithm, MetricRecord, PhaseTimings};
use super::timer::{self, DEFAULT_RUNS};
use super::BenchError;

/// X25519 key-exchange measurement. There is no decrypt phase.
pub fn ecdh_metrics() -> Result<MetricRecord, BenchError> {
    let ((secret, peer), keygen_ms) = timer::timed(|| {
        let secret = EphemeralSecret::random_from_rng(OsRng);
        let peer = PublicKey::from(&EphemeralSecret::random_from_rng(OsRng));
        (secret, peer)
    });

    let (shared, encrypt_ms) = timer::timed(|| secret.diffie_hellman(&peer));
    if !shared.was_contributory() {
        return Err(BenchError::NonContributory);
    }

    let throughput_ops = timer::throughput(|| EphemeralSecret::random_from_rng(OsRng), DEFAULT_RUNS);

    Ok(MetricRecord::new(
        Algorithm::Ecdh,
        PhaseTimings {
            keygen_ms,
            encrypt_ms,
            decrypt_ms: 0.0,
        },
        throughput_ops,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrypt_is_excluded() {
        let rec = ecdh_metrics().unwrap();
        assert_eq!(rec.decrypt_ms, 0.0);
        assert_eq!(rec.total_ms, rec.keygen_ms + rec.encrypt_ms);
    }

    #[test]
    fn fixed_profile() {
        let rec = ecdh_metrics().unwrap();
        assert_eq!(rec.algorithm, "ECDH X25519");
        assert_eq!((rec.public_key, rec.ciphertext, rec.quantum_score), (32, 0, 0));
        assert!(rec.throughput_ops.is_finite() && rec.throughput_ops > 0.0);
    }
}
