use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Runtime settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "pqc-dashboard", version, about = "PQC vs RSA vs X25519 benchmark dashboard")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "PQC_DASHBOARD_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// SQLite file holding historical metrics
    #[arg(long, env = "PQC_DASHBOARD_DB", default_value = "data/metrics.db")]
    pub db_path: PathBuf,

    /// Directory served under /static
    #[arg(long, env = "PQC_DASHBOARD_STATIC", default_value = "static")]
    pub static_dir: PathBuf,

    /// Seconds between pushes on /metrics/stream
    #[arg(
        long,
        env = "PQC_DASHBOARD_STREAM_INTERVAL",
        default_value_t = 3,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub stream_interval_secs: u64,

    /// Start the history recorder at boot with this period; 0 leaves it off
    #[arg(
        long,
        env = "PQC_DASHBOARD_RECORD_INTERVAL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u64).range(0..=3600)
    )]
    pub record_interval_secs: u64,
}

impl Config {
    pub fn stream_interval(&self) -> Duration {
        Duration::from_secs(self.stream_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["pqc-dashboard"]).unwrap();
        assert_eq!(cfg.listen, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(cfg.db_path, PathBuf::from("data/metrics.db"));
        assert_eq!(cfg.stream_interval(), Duration::from_secs(3));
        assert_eq!(cfg.record_interval_secs, 0);
    }

    #[test]
    fn flags_override() {
        let cfg = Config::try_parse_from([
            "pqc-dashboard",
            "--listen",
            "127.0.0.1:8080",
            "--record-interval-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(cfg.listen.port(), 8080);
        assert_eq!(cfg.record_interval_secs, 30);
    }

    #[test]
    fn zero_stream_interval_rejected() {
        assert!(Config::try_parse_from(["pqc-dashboard", "--stream-interval-secs", "0"]).is_err());
    }

    #[test]
    fn record_interval_is_bounded() {
        assert!(Config::try_parse_from(["pqc-dashboard", "--record-interval-secs", "3601"]).is_err());
        let cfg =
            Config::try_parse_from(["pqc-dashboard", "--record-interval-secs", "3600"]).unwrap();
        assert_eq!(cfg.record_interval_secs, 3600);
    }
}
