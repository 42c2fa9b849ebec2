// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

#[cfg(test)]
pub mod test_config;

/// Selects which cooldown cache backend a throttler is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Unbounded associative map, expired entries removed by periodic sweep.
    Swept,
    /// Fixed open-addressing slot array, eviction happens inline while probing.
    Fixed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub throttle: Throttle,
}

/// Throttle section: everything a single controller instance needs.
///
/// All values are normalized to safe defaults at load time; a malformed
/// file degrades the controller, it never disables it (see `normalize`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Throttle {
    pub enabled: bool,
    /// Enables the periodic stats reporter log line.
    pub debug: bool,
    #[serde(rename = "cache_backend")]
    pub cache_backend: CacheBackend,
    /// Starting per-frame admission limit; 0 derives `feedback_step * 10`.
    #[serde(rename = "initial_limit_per_frame")]
    pub initial_limit_per_frame: u32,
    /// Starting cooldown window in ticks; 0 derives `feedback_step * 4`.
    #[serde(rename = "initial_cooldown_ticks")]
    pub initial_cooldown_ticks: u64,
    /// Hard floor the feedback loop may never push the limit below.
    #[serde(rename = "min_limit_per_frame")]
    pub min_limit_per_frame: u32,
    /// Hard ceiling for the cooldown window.
    #[serde(rename = "max_cooldown_ticks")]
    pub max_cooldown_ticks: u64,
    #[serde(rename = "target_frame_millis")]
    pub target_frame_millis: u64,
    #[serde(rename = "feedback_step")]
    pub feedback_step: u32,
    /// Fixed backend only: capacity is `2^power` slots.
    #[serde(rename = "fixed_capacity_power")]
    pub fixed_capacity_power: u32,
    /// Swept backend only: frames between expiry sweeps.
    #[serde(rename = "sweep_interval_frames")]
    pub sweep_interval_frames: u64,
    /// Swept backend only: entries older than this are removed by the sweep.
    #[serde(rename = "max_key_age")]
    pub max_key_age: u64,
    /// Swept backend only: initial map reservation to avoid early rehashing.
    #[serde(rename = "initial_reserve")]
    pub initial_reserve: usize,
    /// Cadence of the stats reporter task.
    #[serde(rename = "report_interval", with = "humantime_serde")]
    pub report_interval: Duration,
}

pub const DEFAULT_TARGET_FRAME_MILLIS: u64 = 50;
pub const DEFAULT_SWEEP_INTERVAL_FRAMES: u64 = 100;
pub const DEFAULT_MAX_KEY_AGE: u64 = 600;
pub const DEFAULT_INITIAL_RESERVE: usize = 1000;
pub const DEFAULT_MIN_LIMIT_PER_FRAME: u32 = 16;
pub const DEFAULT_MAX_COOLDOWN_TICKS: u64 = 512;
pub const MIN_FIXED_CAPACITY_POWER: u32 = 10;
pub const MAX_FIXED_CAPACITY_POWER: u32 = 24;

impl Default for Throttle {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            cache_backend: CacheBackend::Swept,
            initial_limit_per_frame: 0,
            initial_cooldown_ticks: 0,
            min_limit_per_frame: DEFAULT_MIN_LIMIT_PER_FRAME,
            max_cooldown_ticks: DEFAULT_MAX_COOLDOWN_TICKS,
            target_frame_millis: DEFAULT_TARGET_FRAME_MILLIS,
            feedback_step: 1,
            fixed_capacity_power: 16,
            sweep_interval_frames: DEFAULT_SWEEP_INTERVAL_FRAMES,
            max_key_age: DEFAULT_MAX_KEY_AGE,
            initial_reserve: DEFAULT_INITIAL_RESERVE,
            report_interval: Duration::from_secs(5),
        }
    }
}

impl Throttle {
    /// Clamps every out-of-range value to its documented default.
    ///
    /// The controller must stay available under a malformed configuration,
    /// so nothing here is an error; each clamp is logged once.
    pub fn normalize(&mut self) {
        if self.target_frame_millis < 1 {
            self.clamped("target_frame_millis");
            self.target_frame_millis = DEFAULT_TARGET_FRAME_MILLIS;
        }
        if self.feedback_step < 1 {
            self.clamped("feedback_step");
            self.feedback_step = 1;
        }
        if self.sweep_interval_frames < 1 {
            self.clamped("sweep_interval_frames");
            self.sweep_interval_frames = DEFAULT_SWEEP_INTERVAL_FRAMES;
        }
        if self.max_key_age < 1 {
            self.clamped("max_key_age");
            self.max_key_age = DEFAULT_MAX_KEY_AGE;
        }
        if self.initial_reserve == 0 {
            self.clamped("initial_reserve");
            self.initial_reserve = DEFAULT_INITIAL_RESERVE;
        }
        if self.min_limit_per_frame < 1 {
            self.clamped("min_limit_per_frame");
            self.min_limit_per_frame = DEFAULT_MIN_LIMIT_PER_FRAME;
        }
        if self.max_cooldown_ticks < 1 {
            self.clamped("max_cooldown_ticks");
            self.max_cooldown_ticks = DEFAULT_MAX_COOLDOWN_TICKS;
        }
        if self.fixed_capacity_power < MIN_FIXED_CAPACITY_POWER
            || self.fixed_capacity_power > MAX_FIXED_CAPACITY_POWER
        {
            self.clamped("fixed_capacity_power");
            self.fixed_capacity_power = self
                .fixed_capacity_power
                .clamp(MIN_FIXED_CAPACITY_POWER, MAX_FIXED_CAPACITY_POWER);
        }
        if self.report_interval.is_zero() {
            self.clamped("report_interval");
            self.report_interval = Duration::from_secs(5);
        }
    }

    fn clamped(&self, field: &str) {
        warn!(
            component = "config",
            field, "value out of range, clamped to default"
        );
    }

    /// Starting admission limit: explicit value, or derived from the step
    /// (matching the controller's warm-up behavior), floored at the
    /// feedback minimum so the invariant `limit >= min_limit` holds from
    /// the first frame.
    pub fn initial_limit(&self) -> u32 {
        let limit = if self.initial_limit_per_frame > 0 {
            self.initial_limit_per_frame
        } else {
            self.feedback_step.saturating_mul(10)
        };
        limit.max(self.min_limit_per_frame)
    }

    /// Starting cooldown window: explicit value, or derived from the step.
    /// Always within `1..=max_cooldown_ticks`.
    pub fn initial_cooldown(&self) -> u64 {
        let cooldown = if self.initial_cooldown_ticks > 0 {
            self.initial_cooldown_ticks
        } else {
            (self.feedback_step as u64).saturating_mul(4)
        };
        cooldown.clamp(1, self.max_cooldown_ticks)
    }
}

impl Config {
    /// Loads the configuration struct from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        // Read file
        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        let mut cfg: Config = serde_yaml::from_str(&data)
            .with_context(|| format!("unmarshal yaml from {:?}", abs_path))?;

        cfg.throttle.normalize();

        Ok(cfg)
    }
}
