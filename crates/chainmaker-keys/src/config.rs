use std::time::Duration;

/// Configuration for reaching the key daemon.
#[derive(Debug, Clone)]
pub struct KeysConfig {
    /// Base URL of the daemon's HTTP API.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:4767".into(),
            timeout: Duration::from_secs(10),
        }
    }
}
