//! Periodic stats reporter task.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Throttle as ThrottleConfig;
use crate::stats::{telemetry, Counters, Gauges};

/// Spawns the reporting loop on the current tokio runtime.
///
/// Each wake-up drains the counters and logs one statistics line; the
/// cancellation flag is checked at every wake-up, so cancelling the token
/// stops the task at the next boundary. The task only touches the shared
/// atomics and never the admission path itself.
///
/// With `debug` disabled the task finishes immediately and the counters
/// are left untouched for the host to snapshot on its own schedule.
pub fn spawn(
    shutdown_token: CancellationToken,
    name: String,
    cfg: &ThrottleConfig,
    counters: Arc<Counters>,
    gauges: Arc<Gauges>,
) -> tokio::task::JoinHandle<()> {
    let debug = cfg.debug;
    let interval_duration = cfg.report_interval;

    tokio::task::spawn(async move {
        if !debug {
            info!(name = %name, component = "reporter", "debug disabled, reporter not running");
            return;
        }

        let mut interval = tokio::time::interval(interval_duration);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // Skip the first immediate tick to match interval behavior
        interval.tick().await;

        info!(name = %name, component = "reporter", period = ?interval_duration, "started");

        loop {
            tokio::select! {
                _ = shutdown_token.cancelled() => {
                    info!(name = %name, component = "reporter", "stopped");
                    return;
                }
                _ = interval.tick() => {
                    let snapshot = counters.snapshot_and_reset();
                    telemetry::log_stats(&name, &snapshot, &gauges);
                }
            }
        }
    })
}
