//! Cooldown cache: remembers when each key was last admitted.

pub mod fixed;
#[cfg(test)]
pub mod helper;
pub mod swept;

#[cfg(test)]
mod swept_test;

// Re-export main types
pub use fixed::FixedCache;
pub use swept::SweptCache;

use crate::config::{CacheBackend, Throttle};
use crate::model::{TickId, TickKey};

/// Cooldown cache interface.
///
/// All methods must be O(1); `sweep` is the exception, amortized by being
/// invoked on a cadence rather than per frame. Callers are backend-agnostic:
/// both implementations satisfy the same admit/remove contract.
pub trait CooldownCache<K: TickKey>: Send {
    /// Permits and records the key iff it is unseen, or its last admission
    /// is at least `cooldown_ticks` old. Denies without mutating otherwise.
    fn admit(&mut self, key: K, current_tick: TickId, cooldown_ticks: u64) -> bool;

    /// Drops the key after its subject was destroyed.
    /// Idempotent: removing an absent key returns false, it is not an error.
    fn remove(&mut self, key: &K) -> bool;

    /// Bulk-expires entries older than `max_age`, returning the removed
    /// count. A no-op for backends that evict inline.
    fn sweep(&mut self, current_tick: TickId, max_age: u64) -> usize;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Creates the configured cache backend.
pub fn new_cache<K: TickKey + 'static>(cfg: &Throttle) -> Box<dyn CooldownCache<K>> {
    match cfg.cache_backend {
        CacheBackend::Swept => Box::new(SweptCache::new(cfg.initial_reserve)),
        CacheBackend::Fixed => Box::new(FixedCache::new(cfg.fixed_capacity_power)),
    }
}
