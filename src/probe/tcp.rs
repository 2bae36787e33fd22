//! TCP connect probe.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::health::ProbeResult;
use crate::probe::Prober;

pub struct TcpProber {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProber {
    pub fn new(host: String, port: u16, timeout: Duration) -> Self {
        Self { host, port, timeout }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self) -> ProbeResult {
        let start = Instant::now();
        let connect = TcpStream::connect((self.host.as_str(), self.port));

        match timeout(self.timeout, connect).await {
            Ok(Ok(mut stream)) => {
                let latency = start.elapsed();
                let _ = stream.shutdown().await;
                ProbeResult::up(latency)
            }
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
                ProbeResult::down(format!("Connection refused on port {}", self.port))
            }
            Ok(Err(e)) => ProbeResult::down(e.to_string()),
            Err(_) => ProbeResult::down(format!("Timeout on port {}", self.port)),
        }
    }
}
