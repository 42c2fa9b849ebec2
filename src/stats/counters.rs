//! Counters for admission statistics.
//

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use serde::Serialize;

/// Monotonic admission counters, shared with the reporter task.
///
/// Purely observational: nothing on the admission path ever reads these,
/// so a lagging reporter can never affect throttling decisions.
pub struct Counters {
    pub admitted: AtomicU64,
    pub rejected_by_cooldown: AtomicU64,
    pub rejected_by_budget: AtomicU64,
    pub evicted: AtomicU64,
    pub swept_expired: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self {
            admitted: AtomicU64::new(0),
            rejected_by_cooldown: AtomicU64::new(0),
            rejected_by_budget: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
            swept_expired: AtomicU64::new(0),
        }
    }

    /// Returns the accumulated values and resets them to zero.
    pub fn snapshot_and_reset(&self) -> StatsSnapshot {
        StatsSnapshot {
            admitted: self.admitted.swap(0, Ordering::Relaxed),
            rejected_by_cooldown: self.rejected_by_cooldown.swap(0, Ordering::Relaxed),
            rejected_by_budget: self.rejected_by_budget.swap(0, Ordering::Relaxed),
            evicted: self.evicted.swap(0, Ordering::Relaxed),
            swept_expired: self.swept_expired.swap(0, Ordering::Relaxed),
        }
    }

    /// Non-destructive read, mainly for tests and ad-hoc inspection.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected_by_cooldown: self.rejected_by_cooldown.load(Ordering::Relaxed),
            rejected_by_budget: self.rejected_by_budget.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            swept_expired: self.swept_expired.load(Ordering::Relaxed),
        }
    }
}

impl Default for Counters {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub admitted: u64,
    pub rejected_by_cooldown: u64,
    pub rejected_by_budget: u64,
    pub evicted: u64,
    pub swept_expired: u64,
}

impl StatsSnapshot {
    /// Total invocations that reached the admission decision.
    pub fn total(&self) -> u64 {
        self.admitted + self.rejected_by_cooldown + self.rejected_by_budget
    }

    /// Share of invocations that were skipped, in percent.
    pub fn skip_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        100.0 * (self.rejected_by_cooldown + self.rejected_by_budget) as f64 / total as f64
    }
}

/// Live tuning values mirrored for the reporter, updated by the throttler
/// at frame boundaries.
pub struct Gauges {
    pub limit_per_frame: AtomicU32,
    pub cooldown_ticks: AtomicU64,
    pub tracked_keys: AtomicU64,
}

impl Gauges {
    pub fn new(limit: u32, cooldown_ticks: u64) -> Self {
        Self {
            limit_per_frame: AtomicU32::new(limit),
            cooldown_ticks: AtomicU64::new(cooldown_ticks),
            tracked_keys: AtomicU64::new(0),
        }
    }
}
