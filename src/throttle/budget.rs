// Per-frame admission budget.

use crate::model::TickId;

/// Caps the count of admissions within one tick id regardless of key.
///
/// Checked before any cache probe on every invocation, so once a frame's
/// budget is spent the remaining invocations of that tick cost one branch
/// each and no cache work happens.
pub struct AdmissionBudget {
    limit: u32,
    remaining: u32,
    last_seen: Option<TickId>,
}

impl AdmissionBudget {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
            last_seen: None,
        }
    }

    /// Consumes one admission slot if the frame budget allows it.
    ///
    /// The first call carrying a new tick id resets `remaining` to the
    /// limit, exactly once; the budget is never replenished mid-frame.
    pub fn try_consume(&mut self, current_tick: TickId) -> bool {
        if self.last_seen != Some(current_tick) {
            self.last_seen = Some(current_tick);
            self.remaining = self.limit;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }

    /// Applies a new per-frame limit. The running frame keeps whatever
    /// allowance it has left; the new limit takes effect at the next
    /// tick-id change.
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Forgets everything, as on controller (re)activation.
    pub fn reset(&mut self, limit: u32) {
        self.limit = limit;
        self.remaining = limit;
        self.last_seen = None;
    }
}
