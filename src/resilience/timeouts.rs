//! Timeout enforcement.
//!
//! Every probe runs under a hard deadline. Exceeding it is a failed
//! outcome, not an error, so one hung target cannot stall a tick.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::health::ProbeResult;
use crate::probe::Prober;

/// Run `prober` and convert a missed deadline into a failed outcome.
pub async fn probe_with_deadline(prober: Arc<dyn Prober>, deadline: Duration) -> ProbeResult {
    match timeout(deadline, prober.probe()).await {
        Ok(result) => result,
        Err(_) => ProbeResult::down(format!("Probe timeout after {}s", deadline.as_secs_f64())),
    }
}
