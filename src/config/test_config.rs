use super::{CacheBackend, Throttle};
use std::time::Duration;

/// Creates a new test configuration.
pub fn new_test_throttle() -> Throttle {
    Throttle {
        enabled: true,
        debug: true,
        cache_backend: CacheBackend::Swept,
        initial_limit_per_frame: 40,
        initial_cooldown_ticks: 4,
        min_limit_per_frame: 16,
        max_cooldown_ticks: 512,
        target_frame_millis: 50,
        feedback_step: 1,
        fixed_capacity_power: 10,
        sweep_interval_frames: 100,
        max_key_age: 600,
        initial_reserve: 1000,
        report_interval: Duration::from_millis(50),
    }
}
