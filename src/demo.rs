// Demo and replay: drive the watcher with a scripted simulated browser
//
// A script is a list of timed steps against `SimulatedBrowser`: open and
// close tabs, move focus, start and finish network requests, click the
// latest notification. `turnbell demo` plays a built-in scenario and
// `turnbell replay <file>` plays one loaded from JSON Lines:
//
//   {"at_ms": 0, "action": "open_tab", "tab": 2, "window": 1}
//   {"at_ms": 100, "action": "start_request", "request_id": "r1", "tab": 2,
//    "url": "https://chatgpt.com/backend-api/conversation"}
//   {"at_ms": 3000, "action": "complete_request", "request_id": "r1"}
//
// Blank lines and lines starting with `#` are skipped.

use crate::clock::Clock;
use crate::config::Config;
use crate::host::simulated::SimulatedBrowser;
use crate::host::{TabId, WindowId};
use crate::services::ServiceRegistry;
use crate::watcher::{WatcherHandle, WatcherSettings, WatcherStats};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{sleep, sleep_until, Instant};

/// Extra wait after the last step so pending debounces can fire
const SETTLE_GRACE: Duration = Duration::from_millis(500);

const CHATGPT_URL: &str = "https://chatgpt.com/backend-api/conversation";
const CLAUDE_URL: &str = "https://claude.ai/api/organizations/demo/chat_conversations/c1/completion";
const CLAUDE_META_URL: &str = "https://claude.ai/api/organizations/demo/chat_conversations/c1/title";
const GEMINI_URL: &str = "https://gemini.google.com/_/BardChatUi/data/assistant.lamda.BardFrontendService/StreamGenerate";

fn post() -> String {
    "POST".to_string()
}

/// One thing the simulated user or network does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    OpenTab {
        tab: TabId,
        window: WindowId,
    },
    CloseTab {
        tab: TabId,
    },
    ActivateTab {
        tab: TabId,
    },
    /// `null` window means the browser lost focus entirely
    FocusWindow {
        window: Option<WindowId>,
    },
    StartRequest {
        request_id: String,
        tab: TabId,
        url: String,
        #[serde(default = "post")]
        method: String,
    },
    CompleteRequest {
        request_id: String,
    },
    FailRequest {
        request_id: String,
        #[serde(default)]
        error: Option<String>,
    },
    /// Click whichever notification was shown most recently
    ClickLatest,
}

/// An action and when to perform it, relative to script start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

impl Step {
    fn new(at_ms: u64, action: Action) -> Self {
        Self { at_ms, action }
    }
}

/// Parse a JSON Lines script. Steps must be in time order.
pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    let mut steps: Vec<Step> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step: Step = serde_json::from_str(line)
            .with_context(|| format!("Invalid step on line {}", index + 1))?;
        if let Some(previous) = steps.last() {
            if step.at_ms < previous.at_ms {
                bail!(
                    "Step on line {} at {}ms comes before the previous step at {}ms",
                    index + 1,
                    step.at_ms,
                    previous.at_ms
                );
            }
        }
        steps.push(step);
    }
    Ok(steps)
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read replay file {}", path.display()))?;
    parse_script(&text).with_context(|| format!("Failed to load {}", path.display()))
}

/// The built-in scenario
///
/// Window 1 (focused) holds a news tab in front plus ChatGPT and Claude tabs
/// behind it. Window 2 shows Gemini but is not focused.
///
/// - ChatGPT streams two long responses back to back: one notification.
/// - Claude fetches a title (short, ignored) and then a long response, but
///   the user switches to the Claude tab before it is reported: suppressed.
/// - Gemini finishes in the unfocused window: notified.
/// - The user clicks the last notification, which brings ChatGPT forward.
pub fn demo_script() -> Vec<Step> {
    use Action::*;

    let start = |at, id: &str, tab, url: &str| {
        Step::new(
            at,
            StartRequest {
                request_id: id.to_string(),
                tab: TabId(tab),
                url: url.to_string(),
                method: post(),
            },
        )
    };
    let complete = |at, id: &str| {
        Step::new(
            at,
            CompleteRequest {
                request_id: id.to_string(),
            },
        )
    };

    vec![
        Step::new(0, OpenTab { tab: TabId(1), window: WindowId(1) }),
        Step::new(0, OpenTab { tab: TabId(2), window: WindowId(1) }),
        Step::new(0, OpenTab { tab: TabId(3), window: WindowId(1) }),
        Step::new(0, OpenTab { tab: TabId(4), window: WindowId(2) }),
        Step::new(0, FocusWindow { window: Some(WindowId(1)) }),
        start(100, "gpt-1", 2, CHATGPT_URL),
        start(200, "claude-title", 3, CLAUDE_META_URL),
        start(500, "gemini-1", 4, GEMINI_URL),
        start(600, "gpt-2", 2, CHATGPT_URL),
        complete(700, "claude-title"),
        start(1000, "claude-1", 3, CLAUDE_URL),
        complete(2600, "gemini-1"),
        complete(3000, "gpt-1"),
        complete(3400, "gpt-2"),
        complete(3500, "claude-1"),
        Step::new(3800, ActivateTab { tab: TabId(3) }),
        Step::new(5000, ClickLatest),
    ]
}

async fn apply(browser: &SimulatedBrowser, action: &Action) {
    match action {
        Action::OpenTab { tab, window } => browser.open_tab(*tab, *window),
        Action::CloseTab { tab } => browser.close_tab(*tab),
        Action::ActivateTab { tab } => browser.activate(*tab),
        Action::FocusWindow { window } => browser.focus_window(*window),
        Action::StartRequest {
            request_id,
            tab,
            url,
            method,
        } => {
            if !browser.start_request(request_id, *tab, url, method).await {
                tracing::debug!(request_id = %request_id, url = %url, "Request not observed");
            }
        }
        Action::CompleteRequest { request_id } => {
            browser.complete_request(request_id).await;
        }
        Action::FailRequest { request_id, error } => {
            let error = error.as_deref().unwrap_or("net::ERR_FAILED");
            browser.fail_request(request_id, error).await;
        }
        Action::ClickLatest => match browser.shown().last() {
            Some(id) => {
                browser.click_notification(id).await;
            }
            None => tracing::info!("No notification to click"),
        },
    }
}

/// Play steps on their schedule. Returns false if shutdown interrupted.
async fn play(
    browser: &SimulatedBrowser,
    steps: &[Step],
    shutdown_rx: &mut oneshot::Receiver<()>,
) -> bool {
    let start = Instant::now();
    for step in steps {
        tokio::select! {
            biased;
            _ = &mut *shutdown_rx => return false,
            _ = sleep_until(start + Duration::from_millis(step.at_ms)) => {}
        }
        tracing::trace!(at_ms = step.at_ms, action = ?step.action, "Replay step");
        apply(browser, &step.action).await;
    }
    true
}

/// Run a script against a fresh simulated browser and a live watcher
pub async fn run_script(
    config: &Config,
    steps: Vec<Step>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> Result<(WatcherStats, SimulatedBrowser)> {
    let browser = SimulatedBrowser::new();
    let settings = WatcherSettings::from_config(config);
    let settle = settings.debounce + SETTLE_GRACE;

    let handle = WatcherHandle::spawn(
        Arc::new(browser.clone()),
        ServiceRegistry::from_config(&config.services),
        settings,
        Clock::system(),
    )
    .context("Service URL patterns did not compile")?;
    browser.subscribe(handle.subscription().clone(), handle.events());

    tracing::info!(steps = steps.len(), "Playing script");
    if play(&browser, &steps, &mut shutdown_rx).await {
        tokio::select! {
            _ = &mut shutdown_rx => {}
            _ = sleep(settle) => {}
        }
    } else {
        tracing::info!("Script interrupted");
    }

    let stats = handle.shutdown().await?;
    Ok((stats, browser))
}

/// Print what the run produced
pub fn print_summary(stats: &WatcherStats, browser: &SimulatedBrowser) {
    println!();
    println!("  Notifications raised: {}", stats.notifications);
    for notification in browser.created() {
        println!(
            "    {} {}: {}",
            notification.id, notification.title, notification.body
        );
    }
    println!(
        "  Requests tracked: {}  completed: {}  below threshold: {}",
        stats.requests_tracked, stats.completions, stats.short_requests
    );
    println!(
        "  Debounce decisions: {}  superseded: {}  clicks: {}",
        stats.decisions, stats.superseded, stats.clicks
    );
    if stats.swept_requests + stats.swept_notifications > 0 {
        println!(
            "  Swept: {} requests, {} notifications",
            stats.swept_requests, stats.swept_notifications
        );
    }
    println!();
}
