//! Probing subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeSpec (from config)
//!     → ProberFactory::build (once per target, at startup)
//!     → Arc<dyn Prober> stored on the Target
//!     → Scheduler calls probe() every tick under a hard deadline
//! ```
//!
//! # Design Decisions
//! - Probe failures are data (`ProbeResult { ok: false, .. }`), never errors
//! - Each prober maps its own failure modes to a short human-readable detail
//! - Subprocess probes are killed when their future is dropped

pub mod http;
pub mod ping;
pub mod process;
pub mod tcp;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::health::ProbeResult;
use crate::targets::ProbeSpec;

pub use http::HttpProber;
pub use ping::PingProber;
pub use process::{ContainerProber, ServiceProber};
pub use tcp::TcpProber;

/// Capability to check one target's reachability.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Run a single bounded check.
    async fn probe(&self) -> ProbeResult;
}

/// Builds the prober matching each target kind.
#[derive(Clone)]
pub struct ProberFactory {
    timeout: Duration,
    http: reqwest::Client,
}

impl ProberFactory {
    /// Create a factory whose probers honour `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .user_agent(concat!("endpoint-monitor/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { timeout, http })
    }

    pub fn build(&self, spec: &ProbeSpec) -> Arc<dyn Prober> {
        match spec {
            ProbeSpec::Ping { host } => Arc::new(PingProber::new(host.clone(), self.timeout)),
            ProbeSpec::Tcp { host, port } => {
                Arc::new(TcpProber::new(host.clone(), *port, self.timeout))
            }
            ProbeSpec::Http { url, expected_status } => Arc::new(HttpProber::new(
                self.http.clone(),
                url.clone(),
                *expected_status,
            )),
            ProbeSpec::Container { container } => {
                Arc::new(ContainerProber::new(container.clone(), self.timeout))
            }
            ProbeSpec::Service { service } => {
                Arc::new(ServiceProber::new(service.clone(), self.timeout))
            }
        }
    }
}
