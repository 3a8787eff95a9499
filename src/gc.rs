// Garbage collection of abandoned state
//
// Completion events can get lost (tab crash, extension reload mid-request) and
// users ignore notifications. Neither should grow memory forever, so a
// periodic sweep drops anything older than the staleness horizon.

use crate::notifier::NotificationRecords;
use crate::tracker::RequestTracker;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Default cadence of the sweep
pub const DEFAULT_GC_INTERVAL: Duration = Duration::from_secs(60);

/// Longest sweep cadence the watcher will schedule
pub const MAX_GC_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default age after which pending state is presumed abandoned
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(300); // 5 minutes

/// Counts of what a sweep removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub requests: usize,
    pub notifications: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.requests == 0 && self.notifications == 0
    }
}

pub fn sweep(
    tracker: &mut RequestTracker,
    records: &mut NotificationRecords,
    now: DateTime<Utc>,
    horizon: Duration,
) -> SweepReport {
    let report = SweepReport {
        requests: tracker.prune_older_than(horizon, now),
        notifications: records.prune_older_than(horizon, now),
    };

    if !report.is_empty() {
        tracing::debug!(
            requests = report.requests,
            notifications = report.notifications,
            "Swept stale entries"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::host::TabId;
    use crate::notifier::NotificationId;
    use crate::services::ServiceRegistry;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_stale_entries() {
        let clock = Clock::system();
        let mut tracker = RequestTracker::new(ServiceRegistry::builtin(), clock);
        let mut records = NotificationRecords::new();
        let url = "https://claude.ai/api/organizations/o/chat_conversations/c/completion";

        tracker.on_request_start("lost", TabId(1), url, "POST");
        records.insert(NotificationId::generate(clock.now(), 0), TabId(1));

        advance(Duration::from_secs(240)).await;
        tracker.on_request_start("fresh", TabId(2), url, "POST");
        records.insert(NotificationId::generate(clock.now(), 1), TabId(2));

        // Nothing is older than 5 minutes yet
        assert!(sweep(&mut tracker, &mut records, clock.now(), DEFAULT_STALE_AFTER).is_empty());

        advance(Duration::from_secs(61)).await;
        let report = sweep(&mut tracker, &mut records, clock.now(), DEFAULT_STALE_AFTER);
        assert_eq!(
            report,
            SweepReport {
                requests: 1,
                notifications: 1
            }
        );
        assert!(tracker.get("lost").is_none());
        assert!(tracker.get("fresh").is_some());
        assert_eq!(records.len(), 1);
    }
}
