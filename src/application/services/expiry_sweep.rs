//! Background task that periodically removes expired no-show
//! reservations.
//!
//! Runs in a tokio::spawn loop. The same sweep is also invoked from the
//! parked-vehicles read path, so a disabled task only delays cleanup
//! until that endpoint is next read.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Duration;
use tracing::{info, warn};

use super::LifecycleService;
use crate::support::shutdown::ShutdownSignal;

/// Start the no-show sweep background task.
///
/// Every `check_interval_secs` (default 60) reservations with
/// `arrived == false` and `exit_time` in the past are deleted.
pub fn start_expiry_sweep_task(
    lifecycle: Arc<LifecycleService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "🧹 No-show sweep task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match lifecycle.sweep_expired(Utc::now()).await {
                        Ok(0) => {}
                        Ok(removed) => info!(count = removed, "Removed expired no-show reservations"),
                        Err(e) => warn!(error = %e, "No-show sweep error"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("🧹 No-show sweep task shutting down");
                    break;
                }
            }
        }

        info!("🧹 No-show sweep task stopped");
    });
}
