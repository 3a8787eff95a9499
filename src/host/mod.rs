//! Host platform capabilities
//!
//! Everything the watcher needs from the browser lives behind these traits:
//! tab/window introspection, focusing, and desktop notifications. Network
//! observation is push-based instead: the host sends [`HostEvent`]s into the
//! watcher's inbound channel, scoped by the [`PatternSet`] the registry
//! hands out.
//!
//! All calls are fallible and none of the failures are fatal. Callers log a
//! [`HostError`] and abandon the one operation that hit it.
//!
//! [`HostEvent`]: crate::events::HostEvent

use crate::notifier::{Notification, NotificationId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

mod pattern;
pub mod simulated;

pub use pattern::{PatternError, PatternSet};

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Browser tab identifier (opaque integer assigned by the host)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Browser window identifier
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the host reports about a single tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabInfo {
    pub id: TabId,
    /// Window the tab currently lives in
    pub window: WindowId,
    /// Whether this is the selected tab of its window
    pub active: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures reported by the host platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Tab was closed (or never existed)
    TabNotFound(TabId),
    /// Window was closed (or never existed)
    WindowNotFound(WindowId),
    /// Host rejected the call for any other reason
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TabNotFound(tab) => write!(f, "No tab with id {}", tab),
            Self::WindowNotFound(window) => write!(f, "No window with id {}", window),
            Self::Rejected(msg) => write!(f, "Host rejected call: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

// ─────────────────────────────────────────────────────────────────────────────
// Capabilities
// ─────────────────────────────────────────────────────────────────────────────

/// Tab and window introspection plus focus control
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Look up a tab. Closed tabs yield `HostError::TabNotFound`.
    async fn tab(&self, tab: TabId) -> Result<TabInfo, HostError>;

    /// Whether the window currently holds input focus
    async fn window_focused(&self, window: WindowId) -> Result<bool, HostError>;

    /// Make the tab active within its window and give that window focus
    async fn focus_tab(&self, tab: TabId) -> Result<(), HostError>;
}

/// Desktop notification surface
#[async_trait]
pub trait NotificationHost: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<(), HostError>;

    async fn clear(&self, id: &NotificationId) -> Result<(), HostError>;
}

/// Everything the watcher needs from the host, usable as `Arc<dyn Browser>`
pub trait Browser: TabHost + NotificationHost {}

impl<T: TabHost + NotificationHost> Browser for T {}
