//! In-memory browser used by demo mode, replay, and tests
//!
//! Models just enough of a browser for the watcher: tabs grouped into windows,
//! one active tab per window, one focused window, a notification tray, and a
//! network subscription filtered by match patterns. Failures and per-tab
//! latency can be injected to exercise the error paths.

use super::{HostError, NotificationHost, PatternSet, TabHost, TabId, TabInfo, WindowId};
use crate::events::HostEvent;
use crate::notifier::{Notification, NotificationId};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct Window {
    active: Option<TabId>,
}

struct Subscription {
    patterns: PatternSet,
    tx: mpsc::Sender<HostEvent>,
    /// Requests that matched at start; only these report completion/failure
    in_scope: HashSet<String>,
}

#[derive(Default)]
struct State {
    tabs: HashMap<TabId, WindowId>,
    windows: HashMap<WindowId, Window>,
    focused: Option<WindowId>,
    shown: Vec<NotificationId>,
    created: Vec<Notification>,
    cleared: Vec<NotificationId>,
    fail_next: u32,
    slow_tabs: HashMap<TabId, Duration>,
    subscription: Option<Subscription>,
}

/// Cheaply cloneable handle to one simulated browser
#[derive(Clone, Default)]
pub struct SimulatedBrowser {
    state: Arc<Mutex<State>>,
}

impl SimulatedBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panic while holding the lock only happens in a failing test
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tabs and windows
    // ─────────────────────────────────────────────────────────────────────

    /// Open a tab. The first tab of a window becomes its active tab.
    pub fn open_tab(&self, tab: TabId, window: WindowId) {
        let mut state = self.lock();
        state.tabs.insert(tab, window);
        let win = state.windows.entry(window).or_default();
        if win.active.is_none() {
            win.active = Some(tab);
        }
    }

    pub fn close_tab(&self, tab: TabId) {
        let mut state = self.lock();
        if let Some(window) = state.tabs.remove(&tab) {
            if let Some(win) = state.windows.get_mut(&window) {
                if win.active == Some(tab) {
                    win.active = None;
                }
            }
        }
    }

    /// Make a tab the active one in its window (does not move focus)
    pub fn activate(&self, tab: TabId) {
        let mut state = self.lock();
        if let Some(window) = state.tabs.get(&tab).copied() {
            state.windows.entry(window).or_default().active = Some(tab);
        }
    }

    /// Give a window input focus, or `None` when the browser loses focus
    pub fn focus_window(&self, window: Option<WindowId>) {
        self.lock().focused = window;
    }

    pub fn is_active(&self, tab: TabId) -> bool {
        let state = self.lock();
        state
            .tabs
            .get(&tab)
            .and_then(|w| state.windows.get(w))
            .map(|w| w.active == Some(tab))
            .unwrap_or(false)
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.lock().focused
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fault injection
    // ─────────────────────────────────────────────────────────────────────

    /// Reject the next `n` host calls
    #[cfg(test)]
    pub fn fail_next_calls(&self, n: u32) {
        self.lock().fail_next = n;
    }

    /// Delay tab lookups for one tab
    #[cfg(test)]
    pub fn set_tab_latency(&self, tab: TabId, latency: Duration) {
        self.lock().slow_tabs.insert(tab, latency);
    }

    fn take_failure(&self) -> Result<(), HostError> {
        let mut state = self.lock();
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(HostError::Rejected("injected failure".to_string()));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Notification tray
    // ─────────────────────────────────────────────────────────────────────

    /// Every notification ever created, oldest first
    pub fn created(&self) -> Vec<Notification> {
        self.lock().created.clone()
    }

    /// Notifications currently in the tray
    pub fn shown(&self) -> Vec<NotificationId> {
        self.lock().shown.clone()
    }

    #[cfg(test)]
    pub fn cleared(&self) -> Vec<NotificationId> {
        self.lock().cleared.clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Network observation and user input
    // ─────────────────────────────────────────────────────────────────────

    /// Deliver network events for URLs matching `patterns` to `tx`
    pub fn subscribe(&self, patterns: PatternSet, tx: mpsc::Sender<HostEvent>) {
        self.lock().subscription = Some(Subscription {
            patterns,
            tx,
            in_scope: HashSet::new(),
        });
    }

    /// Simulate a request leaving the tab. Returns whether it was observed.
    pub async fn start_request(&self, request_id: &str, tab: TabId, url: &str, method: &str) -> bool {
        let tx = {
            let mut state = self.lock();
            let Some(sub) = state.subscription.as_mut() else {
                return false;
            };
            if !sub.patterns.matches(url) {
                return false;
            }
            sub.in_scope.insert(request_id.to_string());
            sub.tx.clone()
        };

        tx.send(HostEvent::RequestStarted {
            request_id: request_id.to_string(),
            tab_id: tab,
            url: url.to_string(),
            method: method.to_string(),
        })
        .await
        .is_ok()
    }

    pub async fn complete_request(&self, request_id: &str) -> bool {
        let Some(tx) = self.finish_in_scope(request_id) else {
            return false;
        };
        tx.send(HostEvent::RequestCompleted {
            request_id: request_id.to_string(),
        })
        .await
        .is_ok()
    }

    pub async fn fail_request(&self, request_id: &str, error: &str) -> bool {
        let Some(tx) = self.finish_in_scope(request_id) else {
            return false;
        };
        tx.send(HostEvent::RequestFailed {
            request_id: request_id.to_string(),
            error: Some(error.to_string()),
        })
        .await
        .is_ok()
    }

    fn finish_in_scope(&self, request_id: &str) -> Option<mpsc::Sender<HostEvent>> {
        let mut state = self.lock();
        let sub = state.subscription.as_mut()?;
        sub.in_scope.remove(request_id).then(|| sub.tx.clone())
    }

    /// Simulate the user clicking a notification in the tray
    pub async fn click_notification(&self, id: &NotificationId) -> bool {
        let tx = {
            let state = self.lock();
            if !state.shown.contains(id) {
                return false;
            }
            match state.subscription.as_ref() {
                Some(sub) => sub.tx.clone(),
                None => return false,
            }
        };
        tx.send(HostEvent::NotificationClicked {
            notification_id: id.clone(),
        })
        .await
        .is_ok()
    }
}

#[async_trait]
impl TabHost for SimulatedBrowser {
    async fn tab(&self, tab: TabId) -> Result<TabInfo, HostError> {
        let latency = self.lock().slow_tabs.get(&tab).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.take_failure()?;

        let state = self.lock();
        let window = *state.tabs.get(&tab).ok_or(HostError::TabNotFound(tab))?;
        let active = state
            .windows
            .get(&window)
            .map(|w| w.active == Some(tab))
            .unwrap_or(false);
        Ok(TabInfo {
            id: tab,
            window,
            active,
        })
    }

    async fn window_focused(&self, window: WindowId) -> Result<bool, HostError> {
        self.take_failure()?;
        let state = self.lock();
        if !state.windows.contains_key(&window) {
            return Err(HostError::WindowNotFound(window));
        }
        Ok(state.focused == Some(window))
    }

    async fn focus_tab(&self, tab: TabId) -> Result<(), HostError> {
        self.take_failure()?;
        let mut state = self.lock();
        let window = *state.tabs.get(&tab).ok_or(HostError::TabNotFound(tab))?;
        state.windows.entry(window).or_default().active = Some(tab);
        state.focused = Some(window);
        Ok(())
    }
}

#[async_trait]
impl NotificationHost for SimulatedBrowser {
    async fn create(&self, notification: &Notification) -> Result<(), HostError> {
        self.take_failure()?;
        tracing::debug!(
            notification = %notification.id,
            title = %notification.title,
            icon = ?notification.icon,
            "Simulated notification shown"
        );
        let mut state = self.lock();
        state.shown.push(notification.id.clone());
        state.created.push(notification.clone());
        Ok(())
    }

    async fn clear(&self, id: &NotificationId) -> Result<(), HostError> {
        self.take_failure()?;
        let mut state = self.lock();
        state.shown.retain(|shown| shown != id);
        state.cleared.push(id.clone());
        Ok(())
    }
}
