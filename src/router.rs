// Notification click routing
//
// A click means "take me to the answer": bring the tab forward and focus its
// window. The notification is cleared afterwards whether or not the tab could
// be found, so stale notifications never linger in the tray.

use crate::host::{Browser, TabId};
use crate::notifier::NotificationId;

/// How a click was handled, mostly for logs and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Tab brought to the foreground
    Focused(TabId),
    /// Record existed but the tab could not be focused
    FocusFailed(TabId),
    /// No record for this notification (expired, or not ours)
    Unknown,
}

/// Focus the notification's tab (if known), then clear the notification.
///
/// `tab` is the record the caller already removed from its table.
pub async fn route_click(
    host: &dyn Browser,
    id: &NotificationId,
    tab: Option<TabId>,
) -> ClickOutcome {
    let outcome = match tab {
        Some(tab) => match host.focus_tab(tab).await {
            Ok(()) => {
                tracing::debug!(notification = %id, tab = %tab, "Focused tab from notification");
                ClickOutcome::Focused(tab)
            }
            Err(e) => {
                tracing::info!(notification = %id, tab = %tab, "Could not focus tab: {}", e);
                ClickOutcome::FocusFailed(tab)
            }
        },
        None => {
            tracing::debug!(notification = %id, "Click on unknown notification");
            ClickOutcome::Unknown
        }
    };

    if let Err(e) = host.clear(id).await {
        tracing::warn!(notification = %id, "Failed to clear notification: {}", e);
    }

    outcome
}
