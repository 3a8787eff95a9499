//! Wall clock anchored to tokio's monotonic clock
//!
//! Timestamps (request start, notification creation) are derived from
//! `tokio::time::Instant`, so a paused runtime in tests drives timers and
//! timestamps together. Outside tests this is just the system clock.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin_wall: DateTime<Utc>,
    origin: Instant,
}

impl Clock {
    /// Clock reading the current system time
    pub fn system() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Clock whose "now" is `wall` at construction time
    pub fn starting_at(wall: DateTime<Utc>) -> Self {
        Self {
            origin_wall: wall,
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = ChronoDuration::from_std(self.origin.elapsed()).unwrap_or_default();
        self.origin_wall + elapsed
    }

    /// Time elapsed since `earlier`, clamped at zero
    pub fn since(&self, earlier: DateTime<Utc>) -> Duration {
        (self.now() - earlier).to_std().unwrap_or_default()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
