use rand::rngs::OsRng;
use rsa::{BigUint, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use super::record::{Algorithm, MetricRecord, PhaseTimings};
use super::timer;
use super::BenchError;

const KEY_BITS: usize = 2048;
const PUBLIC_EXPONENT: u32 = 65_537;
const PLAINTEXT: &[u8; 4] = b"test";

/// Key generation dominates; keep the repeated run short.
const THROUGHPUT_RUNS: u32 = 5;

/// Timed phases of one RSA run plus what decryption produced.
#[derive(Debug)]
pub struct RsaRun {
    pub phases: PhaseTimings,
    pub recovered: Vec<u8>,
}

/// RSA-2048 PKCS#1 v1.5 measurement.
pub fn rsa_metrics() -> Result<MetricRecord, BenchError> {
    let run = run_phases()?;
    let throughput_ops = timer::try_throughput(generate_key, THROUGHPUT_RUNS)?;
    Ok(MetricRecord::new(Algorithm::Rsa, run.phases, throughput_ops))
}

/// Keygen → encrypt → decrypt, each timed separately.
pub fn run_phases() -> Result<RsaRun, BenchError> {
    let (key, keygen_ms) = timer::timed(generate_key);
    let key = key?;
    let public = RsaPublicKey::from(&key);

    let (ct, encrypt_ms) = timer::timed(|| public.encrypt(&mut OsRng, Pkcs1v15Encrypt, PLAINTEXT));
    let ct = ct?;

    let (pt, decrypt_ms) = timer::timed(|| key.decrypt(Pkcs1v15Encrypt, &ct));
    let recovered = pt?;

    Ok(RsaRun {
        phases: PhaseTimings {
            keygen_ms,
            encrypt_ms,
            decrypt_ms,
        },
        recovered,
    })
}

fn generate_key() -> Result<RsaPrivateKey, BenchError> {
    let exp = BigUint::from(PUBLIC_EXPONENT);
    Ok(RsaPrivateKey::new_with_exp(&mut OsRng, KEY_BITS, &exp)?)
}
