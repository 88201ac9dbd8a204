use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::bench::MetricRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// One point of an algorithm's history. Serializes as `[timestamp, total_ms]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint(pub String, pub f64);

impl HistoryPoint {
    pub fn total_ms(&self) -> f64 {
        self.1
    }
}

/// Handle to the SQLite metrics table.
///
/// Cheap to clone: it only holds the database path. Every operation opens
/// its own connection, which is closed when it drops at the end of the call
/// whether or not the operation succeeded.
#[derive(Debug, Clone)]
pub struct MetricStore {
    path: PathBuf,
}

impl MetricStore {
    /// Create the parent directory and schema. Call once before serving.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let store = Self { path };
        let conn = store.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS metrics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT,
                algorithm TEXT,
                keygen REAL,
                encrypt REAL,
                decrypt REAL,
                total REAL
            )",
            [],
        )?;

        tracing::info!(path = %store.path().display(), "metrics store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Insert one row; `total` is derived from the three phases.
    pub fn save_metric(
        &self,
        algorithm: &str,
        keygen_ms: f64,
        encrypt_ms: f64,
        decrypt_ms: f64,
    ) -> Result<(), StoreError> {
        let total_ms = keygen_ms + encrypt_ms + decrypt_ms;
        let timestamp = chrono::Utc::now().to_rfc3339();

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO metrics (timestamp, algorithm, keygen, encrypt, decrypt, total)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![timestamp, algorithm, keygen_ms, encrypt_ms, decrypt_ms, total_ms],
        )?;
        Ok(())
    }

    pub fn save_record(&self, algorithm: &str, rec: &MetricRecord) -> Result<(), StoreError> {
        self.save_metric(algorithm, rec.keygen_ms, rec.encrypt_ms, rec.decrypt_ms)
    }

    /// `(timestamp, total_ms)` pairs in insertion order.
    pub fn history(&self, algorithm: &str) -> Result<Vec<HistoryPoint>, StoreError> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT timestamp, total FROM metrics WHERE algorithm = ?1 ORDER BY id")?;
        let rows = stmt.query_map([algorithm], |row| Ok(HistoryPoint(row.get(0)?, row.get(1)?)))?;
        let points = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(points)
    }
}
