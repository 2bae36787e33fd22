//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use endpoint_monitor::health::ProbeResult;
use endpoint_monitor::notify::{Notifier, NotifyError};
use endpoint_monitor::probe::Prober;

/// Notifier that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages().iter().filter(|m| m.contains(needle)).count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        self.messages.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(NotifyError::Rejected("chat not found".into()))
        } else {
            Ok(())
        }
    }
}

/// Prober replaying a fixed list of outcomes; repeats the last one forever.
pub struct ScriptedProber {
    outcomes: Mutex<VecDeque<bool>>,
    last: Mutex<bool>,
    pub calls: AtomicUsize,
}

impl ScriptedProber {
    pub fn new(outcomes: &[bool]) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.iter().copied().collect()),
            last: Mutex::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(ok: bool) -> Self {
        Self::new(&[ok])
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self) -> ProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let ok = {
            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.outcomes.lock().unwrap().pop_front() {
                *last = next;
            }
            *last
        };
        if ok {
            ProbeResult::up(Duration::from_millis(3))
        } else {
            ProbeResult::down("Connection refused on port 443")
        }
    }
}

/// Prober that never completes.
pub struct HangingProber;

#[async_trait]
impl Prober for HangingProber {
    async fn probe(&self) -> ProbeResult {
        std::future::pending().await
    }
}

/// Prober that panics.
pub struct PanickingProber;

#[async_trait]
impl Prober for PanickingProber {
    async fn probe(&self) -> ProbeResult {
        panic!("prober exploded");
    }
}

/// Prober that sleeps and records how many probes overlap.
#[derive(Default)]
pub struct SlowProber {
    pub delay: Duration,
    pub fail: bool,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
}

impl SlowProber {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn failing(delay: Duration) -> Self {
        Self {
            delay,
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl Prober for SlowProber {
    async fn probe(&self) -> ProbeResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail {
            ProbeResult::down("Status: inactive")
        } else {
            ProbeResult::up(self.delay)
        }
    }
}

pub fn arc<P: Prober + 'static>(prober: P) -> Arc<dyn Prober> {
    Arc::new(prober)
}

/// Start a programmable HTTP backend on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Poll `check` until it holds or `deadline` passes.
pub async fn wait_until<F: Fn() -> bool>(deadline: Duration, check: F) -> bool {
    let start = tokio::time::Instant::now();
    while start.elapsed() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
