//! Kind-specific probe parameters.

use serde::{Deserialize, Serialize};

/// What to probe and how, tagged by `kind` in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeSpec {
    /// ICMP reachability via the system `ping` binary.
    Ping { host: String },

    /// TCP connect to `host:port`.
    Tcp { host: String, port: u16 },

    /// HTTP(S) GET expecting a specific status code.
    Http {
        url: String,
        #[serde(default = "default_expected_status")]
        expected_status: u16,
    },

    /// Docker container in the running state.
    Container { container: String },

    /// systemd unit in the active state.
    Service { service: String },
}

fn default_expected_status() -> u16 {
    200
}

impl ProbeSpec {
    /// Human-readable kind label used in alerts.
    pub fn label(&self) -> String {
        match self {
            ProbeSpec::Ping { .. } => "Server (Ping)".to_string(),
            ProbeSpec::Tcp { port, .. } => format!("TCP:{}", port),
            ProbeSpec::Http { .. } => "HTTP/HTTPS".to_string(),
            ProbeSpec::Container { .. } => "Docker".to_string(),
            ProbeSpec::Service { .. } => "Systemd".to_string(),
        }
    }
}
