//! Admission statistics: counters, gauges and reporter telemetry.

pub mod counters;
pub mod telemetry;


// Re-export main types
pub use counters::{Counters, Gauges, StatsSnapshot};
