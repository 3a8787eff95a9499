// Visibility gate and notifier
//
// When a tab's debounce window closes we ask the host whether the user is
// already looking at it. Visibility is judged at that moment, not when the
// request began. If the tab is hidden we build a notification and remember
// which tab it belongs to so a click can bring the tab back.

use crate::clock::Clock;
use crate::host::{HostError, TabHost, TabId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Prefix of every notification id we generate
const ID_PREFIX: &str = "turnbell-";

/// Default body text (title carries the service name)
pub const DEFAULT_BODY: &str = "Your response is ready.";

// ─────────────────────────────────────────────────────────────────────────────
// Notification identity
// ─────────────────────────────────────────────────────────────────────────────

/// Notification identifier: `turnbell-<unix-millis>-<seq>`
///
/// The creation time is recoverable from the id itself, which is what the
/// garbage collector ages records by. The sequence suffix keeps two
/// notifications raised in the same millisecond apart.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn generate(created: DateTime<Utc>, seq: u64) -> Self {
        Self(format!("{}{}-{}", ID_PREFIX, created.timestamp_millis(), seq))
    }

    /// Creation time embedded in the id, if this is one of ours
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let rest = self.0.strip_prefix(ID_PREFIX)?;
        let millis = rest.split('-').next()?.parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}

impl From<&str> for NotificationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What gets handed to the host's notification surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    /// Service name, e.g. "ChatGPT"
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Notifier
// ─────────────────────────────────────────────────────────────────────────────

/// Builds notifications with unique ids
#[derive(Debug)]
pub struct Notifier {
    clock: Clock,
    body: String,
    icon: Option<String>,
    next_seq: u64,
}

impl Notifier {
    pub fn new(clock: Clock, body: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            clock,
            body: body.into(),
            icon,
            next_seq: 0,
        }
    }

    pub fn build(&mut self, service_name: &str) -> Notification {
        let id = NotificationId::generate(self.clock.now(), self.next_seq);
        self.next_seq += 1;
        Notification {
            id,
            title: service_name.to_string(),
            body: self.body.clone(),
            icon: self.icon.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// Which tab each shown notification was raised for
#[derive(Debug, Default)]
pub struct NotificationRecords {
    entries: HashMap<NotificationId, TabId>,
}

impl NotificationRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NotificationId, tab_id: TabId) {
        if let Some(previous) = self.entries.insert(id.clone(), tab_id) {
            tracing::warn!(notification = %id, previous_tab = %previous, "Notification id reused");
        }
    }

    /// Remove and return the tab for a notification
    pub fn take(&mut self, id: &NotificationId) -> Option<TabId> {
        self.entries.remove(id)
    }

    /// Drop records whose embedded creation time is older than `horizon`.
    /// Ids without a readable timestamp cannot be aged and are dropped too.
    pub fn prune_older_than(&mut self, horizon: Duration, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| match id.created_at() {
            Some(created) => (now - created)
                .to_std()
                .map(|age| age <= horizon)
                .unwrap_or(true),
            None => false,
        });
        before - self.entries.len()
    }
}

#[cfg(test)]
impl NotificationRecords {
    pub fn get(&self, id: &NotificationId) -> Option<TabId> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Visibility gate
// ─────────────────────────────────────────────────────────────────────────────

/// Whether the user can currently see a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Active tab of the focused window
    Visible,
    /// Background tab, or its window is not focused
    Hidden,
    /// Tab was closed before we got to it
    TabGone,
}

pub async fn check_visibility<H>(host: &H, tab_id: TabId) -> Result<Visibility, HostError>
where
    H: TabHost + ?Sized,
{
    let tab = match host.tab(tab_id).await {
        Ok(tab) => tab,
        Err(HostError::TabNotFound(_)) => return Ok(Visibility::TabGone),
        Err(e) => return Err(e),
    };

    if !tab.active {
        return Ok(Visibility::Hidden);
    }

    if host.window_focused(tab.window).await? {
        Ok(Visibility::Visible)
    } else {
        Ok(Visibility::Hidden)
    }
}

/// Fire-time decision for one tab. Host failures are logged and mean "no".
pub async fn should_notify<H>(host: &H, tab_id: TabId, service_name: &str) -> bool
where
    H: TabHost + ?Sized,
{
    match check_visibility(host, tab_id).await {
        Ok(Visibility::Hidden) => true,
        Ok(Visibility::Visible) => {
            tracing::debug!(tab = %tab_id, service = service_name, "Tab in view, not notifying");
            false
        }
        Ok(Visibility::TabGone) => {
            tracing::debug!(tab = %tab_id, service = service_name, "Tab closed before notify");
            false
        }
        Err(e) => {
            tracing::warn!(tab = %tab_id, service = service_name, "Visibility check failed: {}", e);
            false
        }
    }
}
