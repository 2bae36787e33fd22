//! Endpoint Monitor
//!
//! Periodically probes a fixed set of endpoints and posts a Telegram alert
//! whenever one genuinely goes down or comes back.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                        ENDPOINT MONITOR                       │
//!   │                                                               │
//!   │  ┌───────────┐   tick   ┌──────────┐  outcome  ┌───────────┐  │
//!   │  │ scheduler │────────▶│  probe    │─────────▶│  health   │  │
//!   │  │ (JoinSet) │          │ ping/tcp/ │           │  state    │  │
//!   │  └───────────┘          │ http/...  │           │  machine  │  │
//!   │        ▲                └──────────┘           └─────┬─────┘  │
//!   │        │                                              │ event  │
//!   │  ┌─────┴─────┐  snapshot ┌──────────┐             ┌───▼────┐  │
//!   │  │ targets   │◀─────────│ commands  │────────────▶│ notify │──┼──▶ Telegram
//!   │  │ registry  │           │ listener  │   report    └────────┘  │
//!   │  └───────────┘           └──────────┘                          │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use endpoint_monitor::config::{load_config, LoadedConfig};
use endpoint_monitor::lifecycle::{signals, Monitor, Shutdown};
use endpoint_monitor::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "endpoint-monitor")]
#[command(about = "Debounced up/down alerting for hosts, ports, URLs and services", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "monitor.toml")]
    config: PathBuf,

    /// Run a single check pass and exit.
    #[arg(long)]
    once: bool,

    /// Validate the configuration, list targets and exit.
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let LoadedConfig { mut config, ignored } = load_config(&cli.config)?;
    if cli.once {
        config.monitor.run_once = true;
    }

    if cli.check_config {
        println!("Configuration OK: {} targets", config.targets.len());
        for target in &config.targets {
            println!("  {:<30} {}", target.name, target.probe.label());
        }
        return Ok(());
    }

    logging::init_logging(&config.observability)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "endpoint-monitor starting"
    );
    for skipped in &ignored {
        tracing::warn!(key = skipped.key, value = %skipped.value, "Ignoring non-numeric override");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::info!(
        targets = config.targets.len(),
        check_interval_secs = config.monitor.check_interval_secs,
        probe_timeout_secs = config.monitor.probe_timeout_secs,
        failure_threshold = config.monitor.failure_threshold,
        run_once = config.monitor.run_once,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::install(shutdown.clone());

    let monitor = Monitor::from_config(config)?;
    monitor.run(&shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
