// Request tracker - correlates request starts with their completion
//
// Only POSTs to a known service are tracked. Entries live from start until
// completion/error, or until the garbage collector decides the completion
// event was lost.

use crate::clock::Clock;
use crate::host::TabId;
use crate::services::{ServiceDefinition, ServiceRegistry};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A request we saw start and are waiting to see finish
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub tab_id: TabId,
    pub started: DateTime<Utc>,
    pub service: Arc<ServiceDefinition>,
}

/// What a completion resolves to once its start is found
#[derive(Debug, Clone)]
pub struct Completion {
    pub tab_id: TabId,
    pub elapsed: Duration,
    pub service: Arc<ServiceDefinition>,
}

#[derive(Debug)]
pub struct RequestTracker {
    registry: ServiceRegistry,
    clock: Clock,
    pending: HashMap<String, PendingRequest>,
}

impl RequestTracker {
    pub fn new(registry: ServiceRegistry, clock: Clock) -> Self {
        Self {
            registry,
            clock,
            pending: HashMap::new(),
        }
    }

    /// Track a request if it is a POST to a known service.
    ///
    /// Returns true when an entry was inserted. A repeated id replaces the
    /// earlier entry, so there is never more than one per id.
    pub fn on_request_start(
        &mut self,
        request_id: &str,
        tab_id: TabId,
        url: &str,
        method: &str,
    ) -> bool {
        if !method.eq_ignore_ascii_case("POST") {
            return false;
        }
        let Some(service) = self.registry.match_url(url) else {
            return false;
        };

        tracing::trace!(
            request_id,
            tab = %tab_id,
            service = %service.name,
            "Tracking request"
        );

        self.pending.insert(
            request_id.to_string(),
            PendingRequest {
                tab_id,
                started: self.clock.now(),
                service,
            },
        );
        true
    }

    /// Resolve a finished request. Unknown ids are not an error.
    pub fn on_request_complete(&mut self, request_id: &str) -> Option<Completion> {
        let pending = self.pending.remove(request_id)?;
        Some(Completion {
            tab_id: pending.tab_id,
            elapsed: self.clock.since(pending.started),
            service: pending.service,
        })
    }

    /// Forget a failed or aborted request
    pub fn on_request_error(&mut self, request_id: &str) {
        if self.pending.remove(request_id).is_some() {
            tracing::trace!(request_id, "Dropped failed request");
        }
    }

    /// Remove entries that started more than `horizon` before `now`
    pub fn prune_older_than(&mut self, horizon: Duration, now: DateTime<Utc>) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, p| {
            (now - p.started)
                .to_std()
                .map(|age| age <= horizon)
                .unwrap_or(true)
        });
        before - self.pending.len()
    }

}

#[cfg(test)]
impl RequestTracker {
    pub fn get(&self, request_id: &str) -> Option<&PendingRequest> {
        self.pending.get(request_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}
