//! Throttler: the host-facing admission entry point.
//

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::info;

use crate::cache::{new_cache, CooldownCache};
use crate::config::Throttle as ThrottleConfig;
use crate::model::{TickId, TickKey};
use crate::stats::{Counters, Gauges};

use super::budget::AdmissionBudget;
use super::feedback::FeedbackController;

/// Combines the per-frame budget, the cooldown cache and the feedback
/// loop behind a single `should_admit` call.
///
/// One throttler owns all of its state, so independent instances (one for
/// block ticks, one for entity steps) coexist without shared globals. All
/// mutating calls must come from the host's single simulation thread; the
/// counters and gauges are atomics precisely so the reporter task can read
/// them from elsewhere.
pub struct Throttler<K: TickKey> {
    cfg: ThrottleConfig,
    cache: Box<dyn CooldownCache<K>>,
    budget: AdmissionBudget,
    feedback: FeedbackController,
    counters: Arc<Counters>,
    gauges: Arc<Gauges>,
    /// Mirror of the feedback cooldown, read on every admission.
    cooldown_ticks: u64,
    last_seen_tick: Option<TickId>,
    frames_since_sweep: u64,
}

impl<K: TickKey + 'static> Throttler<K> {
    /// Builds a throttler from a (normalized) configuration section.
    pub fn new(mut cfg: ThrottleConfig) -> Self {
        cfg.normalize();

        let feedback = FeedbackController::new(&cfg);
        let limit = feedback.limit();
        let cooldown_ticks = feedback.cooldown_ticks();

        info!(
            component = "throttler",
            enabled = cfg.enabled,
            backend = ?cfg.cache_backend,
            initial_limit = limit,
            initial_cooldown = cooldown_ticks,
            target_frame_millis = cfg.target_frame_millis,
            feedback_step = cfg.feedback_step,
            "initialized"
        );

        Self {
            cache: new_cache(&cfg),
            budget: AdmissionBudget::new(limit),
            gauges: Arc::new(Gauges::new(limit, cooldown_ticks)),
            counters: Arc::new(Counters::new()),
            feedback,
            cooldown_ticks,
            last_seen_tick: None,
            frames_since_sweep: 0,
            cfg,
        }
    }

    /// Decides whether one invocation may proceed. Never fails; a denied
    /// invocation is simply not performed by the caller.
    ///
    /// Budget exhaustion dominates: once the frame is spent, no cache work
    /// happens for the rest of that tick id. A disabled throttler admits
    /// everything and touches no state.
    pub fn should_admit(&mut self, key: K, current_tick: TickId) -> bool {
        if !self.cfg.enabled {
            return true;
        }

        self.observe_tick(current_tick);

        if !self.budget.try_consume(current_tick) {
            self.counters.rejected_by_budget.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        if !self.cache.admit(key, current_tick, self.cooldown_ticks) {
            self.counters.rejected_by_cooldown.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        self.counters.admitted.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Drops a key whose subject was permanently destroyed. Deliverable at
    /// any time, including mid-frame; removing an absent key is a no-op.
    pub fn remove(&mut self, key: &K) {
        if !self.cfg.enabled {
            return;
        }
        if self.cache.remove(key) {
            self.counters.evicted.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Feeds the just-completed frame's duration into the feedback loop
    /// and applies the retuned knobs. Must be called between frames, after
    /// the frame's invocations and before the next frame's begin.
    pub fn on_frame_complete(&mut self, elapsed_millis: u64) {
        if !self.cfg.enabled {
            return;
        }

        self.feedback.on_frame_complete(elapsed_millis);
        self.budget.set_limit(self.feedback.limit());
        self.cooldown_ticks = self.feedback.cooldown_ticks();

        self.gauges
            .limit_per_frame
            .store(self.feedback.limit(), Ordering::Relaxed);
        self.gauges
            .cooldown_ticks
            .store(self.cooldown_ticks, Ordering::Relaxed);
        self.gauges
            .tracked_keys
            .store(self.cache.len() as u64, Ordering::Relaxed);
    }

    /// Restores the configured defaults and drops all tracked keys, as on
    /// controller (re)activation.
    pub fn reset(&mut self) {
        self.cache = new_cache(&self.cfg);
        self.feedback.reset(&self.cfg);
        self.budget.reset(self.feedback.limit());
        self.cooldown_ticks = self.feedback.cooldown_ticks();
        self.last_seen_tick = None;
        self.frames_since_sweep = 0;
        self.counters.snapshot_and_reset();

        self.gauges
            .limit_per_frame
            .store(self.feedback.limit(), Ordering::Relaxed);
        self.gauges
            .cooldown_ticks
            .store(self.cooldown_ticks, Ordering::Relaxed);
        self.gauges.tracked_keys.store(0, Ordering::Relaxed);

        info!(
            component = "throttler",
            limit = self.feedback.limit(),
            cooldown_ticks = self.cooldown_ticks,
            "reset to configured defaults"
        );
    }

    /// Shared counters handle for external reporting.
    pub fn stats(&self) -> Arc<Counters> {
        self.counters.clone()
    }

    /// Shared gauges handle for external reporting.
    pub fn gauges(&self) -> Arc<Gauges> {
        self.gauges.clone()
    }

    /// Current per-frame admission limit.
    pub fn limit(&self) -> u32 {
        self.budget.limit()
    }

    /// Current cooldown window in ticks.
    pub fn cooldown_ticks(&self) -> u64 {
        self.cooldown_ticks
    }

    /// Number of keys currently tracked by the cache backend.
    pub fn tracked_keys(&self) -> usize {
        self.cache.len()
    }

    /// Runs frame-boundary bookkeeping exactly once per tick-id change:
    /// counts frames toward the sweep cadence and triggers the bulk expiry
    /// when it is due (a no-op for the fixed backend).
    fn observe_tick(&mut self, current_tick: TickId) {
        if self.last_seen_tick == Some(current_tick) {
            return;
        }
        self.last_seen_tick = Some(current_tick);

        self.frames_since_sweep += 1;
        if self.frames_since_sweep >= self.cfg.sweep_interval_frames {
            self.frames_since_sweep = 0;
            let swept = self.cache.sweep(current_tick, self.cfg.max_key_age);
            if swept > 0 {
                self.counters
                    .swept_expired
                    .fetch_add(swept as u64, Ordering::Relaxed);
            }
        }
    }
}
