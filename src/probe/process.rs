//! Probes that shell out to a local runtime: Docker containers and
//! systemd units.

use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use crate::health::ProbeResult;
use crate::probe::Prober;

async fn run(program: &str, args: &[&str], deadline: Duration) -> Result<Output, String> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(deadline, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!("{} timeout", program)),
    }
}

/// Checks `docker inspect` reports the container as running.
pub struct ContainerProber {
    container: String,
    timeout: Duration,
}

impl ContainerProber {
    pub fn new(container: String, timeout: Duration) -> Self {
        Self { container, timeout }
    }
}

#[async_trait]
impl Prober for ContainerProber {
    async fn probe(&self) -> ProbeResult {
        let start = Instant::now();
        let args = ["inspect", "-f", "{{.State.Running}}", self.container.as_str()];

        match run("docker", &args, self.timeout).await {
            Ok(output) if output.status.success() && is_running(&output.stdout) => {
                ProbeResult::up(start.elapsed())
            }
            Ok(_) => ProbeResult::down("Container not running"),
            Err(detail) => ProbeResult::down(detail),
        }
    }
}

fn is_running(stdout: &[u8]) -> bool {
    String::from_utf8_lossy(stdout).to_lowercase().contains("true")
}

/// Checks `systemctl is-active` for a unit.
pub struct ServiceProber {
    service: String,
    timeout: Duration,
}

impl ServiceProber {
    pub fn new(service: String, timeout: Duration) -> Self {
        Self { service, timeout }
    }
}

#[async_trait]
impl Prober for ServiceProber {
    async fn probe(&self) -> ProbeResult {
        let start = Instant::now();
        let args = ["is-active", self.service.as_str()];

        match run("systemctl", &args, self.timeout).await {
            Ok(output) if output.status.success() => ProbeResult::up(start.elapsed()),
            Ok(output) => ProbeResult::down(format!(
                "Status: {}",
                String::from_utf8_lossy(&output.stdout).trim()
            )),
            Err(detail) => ProbeResult::down(detail),
        }
    }
}
