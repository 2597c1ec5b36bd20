// Environment-driven configuration
//
// Every setting has a default matching the demo flowgraph's wiring, so the
// service runs with no environment at all.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen address.
    pub bind_addr: String,
    /// ZMQ endpoint publishing RDS text (JSON ps/rt).
    pub rds_endpoint: String,
    /// ZMQ endpoint publishing the audio scope.
    pub audio_endpoint: String,
    /// ZMQ endpoint publishing the RDS baseband scope.
    pub rds_scope_endpoint: String,
    /// ZMQ endpoint publishing the symbol-sync constellation.
    pub constellation_endpoint: String,
    /// Flowgraph XML-RPC server.
    pub control_url: String,
    pub control_timeout: Duration,
    /// Optional JSON stations file overriding the built-in catalog.
    pub stations_file: Option<PathBuf>,
    pub text_hwm: usize,
    pub scope_hwm: usize,
    pub constellation_hwm: usize,
    /// Delay between reconnect attempts after a transport error.
    pub retry_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            rds_endpoint: env::var("RDS_ENDPOINT")
                .unwrap_or_else(|_| "tcp://127.0.0.1:5556".to_string()),
            audio_endpoint: env::var("AUDIO_ENDPOINT")
                .unwrap_or_else(|_| "tcp://127.0.0.1:5557".to_string()),
            rds_scope_endpoint: env::var("RDS_SCOPE_ENDPOINT")
                .unwrap_or_else(|_| "tcp://127.0.0.1:5558".to_string()),
            constellation_endpoint: env::var("CONSTELLATION_ENDPOINT")
                .unwrap_or_else(|_| "tcp://127.0.0.1:5559".to_string()),
            control_url: env::var("CONTROL_PLANE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            control_timeout: Duration::from_secs(parse_env("CONTROL_TIMEOUT_SECONDS", 10)),
            stations_file: env::var("STATIONS_FILE").ok().map(PathBuf::from),
            text_hwm: parse_env("TEXT_HWM", 10),
            scope_hwm: parse_env("SCOPE_HWM", 3),
            constellation_hwm: parse_env("CONSTELLATION_HWM", 3),
            retry_delay: Duration::from_millis(parse_env("INGEST_RETRY_MS", 250)),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
