//! HTTP(S) GET probe with expected status match.

use async_trait::async_trait;
use std::time::Instant;

use crate::health::ProbeResult;
use crate::probe::Prober;

pub struct HttpProber {
    client: reqwest::Client,
    url: String,
    expected_status: u16,
}

impl HttpProber {
    /// `client` carries the timeout and TLS policy.
    pub fn new(client: reqwest::Client, url: String, expected_status: u16) -> Self {
        Self {
            client,
            url,
            expected_status,
        }
    }
}

fn classify(e: &reqwest::Error) -> &'static str {
    if e.is_connect() {
        "connect"
    } else if e.is_redirect() {
        "redirect"
    } else if e.is_builder() {
        "builder"
    } else if e.is_body() || e.is_decode() {
        "body"
    } else if e.is_request() {
        "request"
    } else {
        "unknown"
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self) -> ProbeResult {
        let start = Instant::now();

        match self.client.get(&self.url).send().await {
            Ok(response) => {
                let latency = start.elapsed();
                let status = response.status().as_u16();
                if status == self.expected_status {
                    ProbeResult::up(latency)
                } else {
                    ProbeResult::down_after(latency, format!("HTTP {}", status))
                }
            }
            Err(e) if e.is_timeout() => ProbeResult::down("HTTP timeout"),
            Err(e) => {
                tracing::debug!(url = %self.url, error = %e, "HTTP probe error");
                ProbeResult::down(format!("HTTP error: {}", classify(&e)))
            }
        }
    }
}
