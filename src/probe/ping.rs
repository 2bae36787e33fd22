//! ICMP reachability through the system `ping` binary.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use crate::health::ProbeResult;
use crate::probe::Prober;

pub struct PingProber {
    host: String,
    timeout: Duration,
}

impl PingProber {
    pub fn new(host: String, timeout: Duration) -> Self {
        Self { host, timeout }
    }

    fn command(&self) -> Command {
        let count_flag = if cfg!(windows) { "-n" } else { "-c" };
        let mut cmd = Command::new("ping");
        cmd.args([count_flag, "1", "-W", "5", self.host.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Prober for PingProber {
    async fn probe(&self) -> ProbeResult {
        let start = Instant::now();
        let mut cmd = self.command();

        match timeout(self.timeout, cmd.status()).await {
            Ok(Ok(status)) if status.success() => ProbeResult::up(start.elapsed()),
            Ok(Ok(_)) => ProbeResult::down("Host unreachable"),
            Ok(Err(e)) => ProbeResult::down(e.to_string()),
            Err(_) => ProbeResult::down("Ping timeout"),
        }
    }
}
