// Events that flow from the host platform into the watcher
//
// The host forwards network lifecycle events (already scoped to the registry's
// URL patterns) and notification clicks. Using one tagged enum keeps the
// inbound channel single-typed and lets replay scripts carry the same shapes.

use crate::host::TabId;
use crate::notifier::NotificationId;
use serde::{Deserialize, Serialize};

/// Inbound event from the host platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")] // {"type": "request_started", ...}
pub enum HostEvent {
    /// A request is about to be sent
    RequestStarted {
        request_id: String,
        tab_id: TabId,
        url: String,
        method: String,
    },

    /// A request finished (response fully received)
    RequestCompleted { request_id: String },

    /// A request failed or was aborted
    RequestFailed {
        request_id: String,
        #[serde(default)]
        error: Option<String>,
    },

    /// The user clicked one of our notifications
    NotificationClicked { notification_id: NotificationId },
}

impl HostEvent {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestStarted { .. } => "request_started",
            Self::RequestCompleted { .. } => "request_completed",
            Self::RequestFailed { .. } => "request_failed",
            Self::NotificationClicked { .. } => "notification_clicked",
        }
    }
}
