use serde::Serialize;

// ─── Algorithms ──────────────────────────────────────────────────

/// The three algorithms the dashboard compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Pqc,
    Rsa,
    Ecdh,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Pqc, Algorithm::Rsa, Algorithm::Ecdh];

    /// Identifier rows are stored under (history lookups upper-case the path).
    pub fn history_key(self) -> &'static str {
        match self {
            Self::Pqc => "PQC",
            Self::Rsa => "RSA",
            Self::Ecdh => "ECDH",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Pqc => "Kyber (Simulated)",
            Self::Rsa => "RSA-2048",
            Self::Ecdh => "ECDH X25519",
        }
    }

    /// Nominal public key size in bytes. Not measured.
    pub fn public_key_bytes(self) -> u32 {
        match self {
            Self::Pqc => 800,
            Self::Rsa => 450,
            Self::Ecdh => 32,
        }
    }

    /// Nominal ciphertext size in bytes. Key exchange has none.
    pub fn ciphertext_bytes(self) -> u32 {
        match self {
            Self::Pqc => 768,
            Self::Rsa => 256,
            Self::Ecdh => 0,
        }
    }

    /// 1 = believed resistant to quantum attack.
    pub fn quantum_score(self) -> u8 {
        match self {
            Self::Pqc => 1,
            Self::Rsa | Self::Ecdh => 0,
        }
    }
}

// ─── Record ──────────────────────────────────────────────────────

/// Phase durations as measured by one algorithm run, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimings {
    pub keygen_ms: f64,
    pub encrypt_ms: f64,
    /// Zero for algorithms without a decrypt step.
    pub decrypt_ms: f64,
}

impl PhaseTimings {
    pub fn total_ms(&self) -> f64 {
        self.keygen_ms + self.encrypt_ms + self.decrypt_ms
    }
}

/// One algorithm run, normalized for comparison. Field names are the JSON
/// contract the browser relies on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub algorithm: String,
    pub keygen_ms: f64,
    pub encrypt_ms: f64,
    pub decrypt_ms: f64,
    pub total_ms: f64,
    pub public_key: u32,
    pub ciphertext: u32,
    pub quantum_score: u8,
    pub throughput_ops: f64,
}

impl MetricRecord {
    pub fn new(algorithm: Algorithm, phases: PhaseTimings, throughput_ops: f64) -> Self {
        Self {
            algorithm: algorithm.display_name().to_owned(),
            keygen_ms: phases.keygen_ms,
            encrypt_ms: phases.encrypt_ms,
            decrypt_ms: phases.decrypt_ms,
            total_ms: phases.total_ms(),
            public_key: algorithm.public_key_bytes(),
            ciphertext: algorithm.ciphertext_bytes(),
            quantum_score: algorithm.quantum_score(),
            throughput_ops,
        }
    }
}
