// Package stats provides telemetry formatting for the periodic reporter.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::counters::{Gauges, StatsSnapshot};

/// Logs one reporting window worth of admission statistics.
pub fn log_stats(name: &str, snapshot: &StatsSnapshot, gauges: &Arc<Gauges>) {
    // Stay silent for idle windows.
    if snapshot.total() == 0 && snapshot.evicted == 0 && snapshot.swept_expired == 0 {
        return;
    }

    tracing::info!(
        name = %name,
        component = "reporter",
        limit_per_frame = gauges.limit_per_frame.load(Ordering::Relaxed),
        cooldown_ticks = gauges.cooldown_ticks.load(Ordering::Relaxed),
        tracked_keys = gauges.tracked_keys.load(Ordering::Relaxed),
        admitted = snapshot.admitted,
        cooldown_skips = snapshot.rejected_by_cooldown,
        budget_skips = snapshot.rejected_by_budget,
        skip_rate = format!("{:.1}%", snapshot.skip_rate()),
        evicted = snapshot.evicted,
        swept_expired = snapshot.swept_expired,
        "admission statistics"
    );
}
