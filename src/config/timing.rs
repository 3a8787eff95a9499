//! Timing configuration: debounce window and garbage collection

use serde::Deserialize;
use std::time::Duration;

/// Longest accepted quiet window (1 minute)
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Longest accepted sweep cadence
pub const MAX_GC_INTERVAL_SECS: u64 = crate::gc::MAX_GC_INTERVAL.as_secs();

/// Longest accepted staleness horizon (7 days)
pub const MAX_STALE_AFTER_SECS: u64 = 7 * 86_400;

/// Timers driving the watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Quiet period before a tab's completions are reported (milliseconds)
    pub debounce_ms: u64,
    /// How often stale entries are swept (seconds)
    pub gc_interval_secs: u64,
    /// Age after which a pending request or notification is dropped (seconds)
    pub stale_after_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            gc_interval_secs: 60,
            stale_after_secs: 300,
        }
    }
}

/// Timing settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTiming {
    pub debounce_ms: Option<u64>,
    pub gc_interval_secs: Option<u64>,
    pub stale_after_secs: Option<u64>,
}

impl TimingConfig {
    /// Create from file config with defaults, bounded by [`Self::clamped`]
    pub fn from_file(file: Option<FileTiming>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            debounce_ms: file.debounce_ms.unwrap_or(defaults.debounce_ms),
            gc_interval_secs: file.gc_interval_secs.unwrap_or(defaults.gc_interval_secs),
            stale_after_secs: file.stale_after_secs.unwrap_or(defaults.stale_after_secs),
        }
        .clamped()
    }

    /// Pull every value into the range the timers can represent.
    ///
    /// A zero GC interval makes `tokio::time::interval` panic, and deadlines
    /// far in the future overflow `Instant` or the delay queue.
    pub fn clamped(self) -> Self {
        let bounded = Self {
            debounce_ms: self.debounce_ms.min(MAX_DEBOUNCE_MS),
            gc_interval_secs: self.gc_interval_secs.clamp(1, MAX_GC_INTERVAL_SECS),
            stale_after_secs: self.stale_after_secs.min(MAX_STALE_AFTER_SECS),
        };
        if bounded != self {
            eprintln!(
                "Warning: [timing] values out of range, using debounce_ms = {}, gc_interval_secs = {}, stale_after_secs = {}",
                bounded.debounce_ms, bounded.gc_interval_secs, bounded.stale_after_secs
            );
        }
        bounded
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn gc_interval(&self) -> Duration {
        Duration::from_secs(self.gc_interval_secs)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}
