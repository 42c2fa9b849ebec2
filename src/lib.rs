//! tickgate: adaptive admission control for high-frequency simulation ticks.
//!
//! A host simulation loop feeds every candidate background invocation
//! (identified by an opaque key) through [`Throttler::should_admit`]. The
//! throttler caps how many invocations run per frame, suppresses repeats of
//! the same key inside a cooldown window, and retunes both knobs from the
//! measured frame duration reported via [`Throttler::on_frame_complete`].
//!
//! The cooldown cache comes in two interchangeable backends: an unbounded
//! swept map and a fixed open-addressing table with inline eviction. Both
//! are selected by configuration; callers only see the combined entry point.

pub mod cache;
pub mod config;
pub mod model;
pub mod stats;
pub mod throttle;
pub mod workers;

// Re-export the host-facing surface.
pub use config::{CacheBackend, Config, Throttle};
pub use model::{TickId, TickKey};
pub use stats::{Counters, Gauges, StatsSnapshot};
pub use throttle::Throttler;
