// Additive feedback controller retuning limit and cooldown from frame timing.

use crate::config::Throttle as ThrottleConfig;

/// Nudges the admission limit and cooldown window toward a target frame
/// duration, one step per frame.
///
/// Additive on purpose: the controller never overshoots by more than one
/// step, trading convergence speed for stability. The clamps are hard
/// invariants; a limit of zero would stall all admissions permanently and
/// a cooldown of zero would defeat wraparound-safe age comparisons.
pub struct FeedbackController {
    target_frame_millis: u64,
    step: u32,
    limit: u32,
    cooldown_ticks: u64,
    min_limit: u32,
    max_cooldown_ticks: u64,
}

impl FeedbackController {
    pub fn new(cfg: &ThrottleConfig) -> Self {
        Self {
            target_frame_millis: cfg.target_frame_millis,
            step: cfg.feedback_step,
            limit: cfg.initial_limit(),
            cooldown_ticks: cfg.initial_cooldown(),
            min_limit: cfg.min_limit_per_frame,
            max_cooldown_ticks: cfg.max_cooldown_ticks,
        }
    }

    /// Observes the just-completed frame and adjusts the knobs for the
    /// next one: over target tightens throttling, at or under loosens it.
    pub fn on_frame_complete(&mut self, elapsed_millis: u64) {
        if elapsed_millis > self.target_frame_millis {
            self.limit = self.limit.saturating_sub(self.step).max(self.min_limit);
            self.cooldown_ticks = self
                .cooldown_ticks
                .saturating_add(self.step as u64)
                .min(self.max_cooldown_ticks);
        } else {
            self.limit = self.limit.saturating_add(self.step);
            self.cooldown_ticks = self
                .cooldown_ticks
                .saturating_sub(self.step as u64)
                .max(1);
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn cooldown_ticks(&self) -> u64 {
        self.cooldown_ticks
    }

    /// Restores the configured starting point, as on (re)activation.
    pub fn reset(&mut self, cfg: &ThrottleConfig) {
        self.limit = cfg.initial_limit();
        self.cooldown_ticks = cfg.initial_cooldown();
    }
}
