//! The coordinating event loop
//!
//! `Watcher` owns every piece of mutable state (pending requests, debounce
//! slots, notification records) and is the only thing that writes to them.
//! Its [`Watcher::run`] loop is a single task; each event is handled to
//! completion before the next is looked at, so nothing needs a lock.
//!
//! # Flow
//!
//! ```text
//! HostEvent → RequestTracker → classify → Debouncer ─(quiet window)→
//!     spawned visibility check → Signal::Notify → record + create
//! NotificationClicked → take record → spawned focus + clear
//! GC tick → sweep tracker and records
//! ```
//!
//! Host calls never run inside the loop. They are spawned, so a slow or hung
//! lookup for one tab cannot hold up any other tab, and results come back as
//! [`Signal`]s on an internal channel.

use crate::classifier;
use crate::clock::Clock;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::events::HostEvent;
use crate::gc;
use crate::host::{Browser, PatternError, PatternSet, TabId};
use crate::notifier::{self, NotificationId, NotificationRecords, Notifier, DEFAULT_BODY};
use crate::router;
use crate::services::ServiceRegistry;
use crate::tracker::RequestTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Capacity of the host event channel; senders wait when it is full
pub const EVENT_BUFFER: usize = 1000;

/// Tunables for the watcher loop
#[derive(Debug, Clone)]
pub struct WatcherSettings {
    pub debounce: Duration,
    pub gc_interval: Duration,
    pub stale_after: Duration,
    pub notification_body: String,
    pub notification_icon: Option<String>,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            gc_interval: gc::DEFAULT_GC_INTERVAL,
            stale_after: gc::DEFAULT_STALE_AFTER,
            notification_body: DEFAULT_BODY.to_string(),
            notification_icon: None,
        }
    }
}

impl WatcherSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.timing.debounce(),
            gc_interval: config.timing.gc_interval(),
            stale_after: config.timing.stale_after(),
            notification_body: config.notification.body.clone(),
            notification_icon: config.notification.icon.clone(),
        }
    }
}

/// Results reported back to the loop by spawned host calls
#[derive(Debug)]
enum Signal {
    /// Visibility check passed: the tab is hidden, raise a notification
    Notify { tab_id: TabId, service_name: String },
    /// The host refused to show a notification we already recorded
    NotificationFailed { id: NotificationId },
}

/// Counters collected over the watcher's lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatcherStats {
    pub requests_tracked: u64,
    pub completions: u64,
    pub short_requests: u64,
    pub superseded: u64,
    pub decisions: u64,
    pub notifications: u64,
    pub clicks: u64,
    pub swept_requests: u64,
    pub swept_notifications: u64,
}

pub struct Watcher {
    host: Arc<dyn Browser>,
    patterns: Vec<String>,
    tracker: RequestTracker,
    debouncer: Debouncer<TabId, String>,
    notifier: Notifier,
    records: NotificationRecords,
    clock: Clock,
    settings: WatcherSettings,
    events_rx: mpsc::Receiver<HostEvent>,
    signals_tx: mpsc::UnboundedSender<Signal>,
    signals_rx: mpsc::UnboundedReceiver<Signal>,
    stats: WatcherStats,
}

impl Watcher {
    pub fn new(
        host: Arc<dyn Browser>,
        registry: ServiceRegistry,
        settings: WatcherSettings,
        clock: Clock,
        events_rx: mpsc::Receiver<HostEvent>,
    ) -> Self {
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        Self {
            host,
            patterns: registry.url_patterns(),
            tracker: RequestTracker::new(registry, clock),
            debouncer: Debouncer::new(settings.debounce),
            notifier: Notifier::new(
                clock,
                settings.notification_body.clone(),
                settings.notification_icon.clone(),
            ),
            records: NotificationRecords::new(),
            clock,
            settings,
            events_rx,
            signals_tx,
            signals_rx,
            stats: WatcherStats::default(),
        }
    }

    /// URL patterns the host should scope its network subscription to
    pub fn subscription(&self) -> Result<PatternSet, PatternError> {
        PatternSet::compile(&self.patterns)
    }

    /// Run until shutdown is signalled or the host drops its event sender.
    ///
    /// Returns the counters gathered along the way.
    pub async fn run(mut self, mut shutdown_rx: oneshot::Receiver<()>) -> WatcherStats {
        let period = self
            .settings
            .gc_interval
            .clamp(Duration::from_secs(1), gc::MAX_GC_INTERVAL);
        let mut gc_timer = interval_at(Instant::now() + period, period);
        gc_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            services = self.patterns.len(),
            debounce_ms = self.settings.debounce.as_millis() as u64,
            "Watcher started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    tracing::info!("Watcher received shutdown signal");
                    break;
                }
                event = self.events_rx.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        tracing::info!("Host event channel closed");
                        break;
                    }
                },
                Some(signal) = self.signals_rx.recv() => self.handle_signal(signal),
                Some((tab_id, service_name)) = self.debouncer.next(), if !self.debouncer.is_empty() => {
                    self.on_quiet_window_elapsed(tab_id, service_name);
                }
                _ = gc_timer.tick() => self.collect_garbage(),
            }
        }

        tracing::debug!(stats = ?self.stats, "Watcher stopped");
        self.stats
    }

    // ─────────────────────────────────────────────────────────────────────
    // Host events
    // ─────────────────────────────────────────────────────────────────────

    fn handle_event(&mut self, event: HostEvent) {
        tracing::trace!(kind = event.kind(), "Host event");
        match event {
            HostEvent::RequestStarted {
                request_id,
                tab_id,
                url,
                method,
            } => {
                if self
                    .tracker
                    .on_request_start(&request_id, tab_id, &url, &method)
                {
                    self.stats.requests_tracked += 1;
                }
            }
            HostEvent::RequestCompleted { request_id } => self.on_request_complete(&request_id),
            HostEvent::RequestFailed { request_id, error } => {
                tracing::debug!(request_id = %request_id, error = ?error, "Request failed");
                self.tracker.on_request_error(&request_id);
            }
            HostEvent::NotificationClicked { notification_id } => {
                self.on_notification_clicked(notification_id)
            }
        }
    }

    fn on_request_complete(&mut self, request_id: &str) {
        let Some(completion) = self.tracker.on_request_complete(request_id) else {
            return;
        };
        self.stats.completions += 1;

        let Some(candidate) = classifier::classify(&completion) else {
            self.stats.short_requests += 1;
            return;
        };

        tracing::debug!(
            tab = %candidate.tab_id,
            service = %candidate.service_name,
            elapsed_ms = completion.elapsed.as_millis() as u64,
            "Long request finished"
        );

        if let Some(previous) = self
            .debouncer
            .schedule(candidate.tab_id, candidate.service_name)
        {
            self.stats.superseded += 1;
            tracing::trace!(tab = %candidate.tab_id, previous = %previous, "Debounce re-armed");
        }
    }

    fn on_notification_clicked(&mut self, id: NotificationId) {
        self.stats.clicks += 1;
        let tab = self.records.take(&id);
        let host = Arc::clone(&self.host);
        tokio::spawn(async move {
            router::route_click(host.as_ref(), &id, tab).await;
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Timers and internal signals
    // ─────────────────────────────────────────────────────────────────────

    fn on_quiet_window_elapsed(&mut self, tab_id: TabId, service_name: String) {
        self.stats.decisions += 1;
        let host = Arc::clone(&self.host);
        let signals = self.signals_tx.clone();
        tokio::spawn(async move {
            if notifier::should_notify(host.as_ref(), tab_id, &service_name).await {
                // Loop is gone only during shutdown
                let _ = signals.send(Signal::Notify {
                    tab_id,
                    service_name,
                });
            }
        });
    }

    fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Notify {
                tab_id,
                service_name,
            } => self.raise_notification(tab_id, &service_name),
            Signal::NotificationFailed { id } => {
                self.records.take(&id);
            }
        }
    }

    fn raise_notification(&mut self, tab_id: TabId, service_name: &str) {
        let notification = self.notifier.build(service_name);
        self.records.insert(notification.id.clone(), tab_id);
        self.stats.notifications += 1;

        tracing::info!(
            tab = %tab_id,
            service = service_name,
            notification = %notification.id,
            "Response ready in background tab"
        );

        let host = Arc::clone(&self.host);
        let signals = self.signals_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = host.create(&notification).await {
                tracing::warn!(notification = %notification.id, "Failed to show notification: {}", e);
                let _ = signals.send(Signal::NotificationFailed {
                    id: notification.id,
                });
            }
        });
    }

    fn collect_garbage(&mut self) {
        let report = gc::sweep(
            &mut self.tracker,
            &mut self.records,
            self.clock.now(),
            self.settings.stale_after,
        );
        self.stats.swept_requests += report.requests as u64;
        self.stats.swept_notifications += report.notifications as u64;
    }
}

/// A watcher running on its own task
pub struct WatcherHandle {
    events: mpsc::Sender<HostEvent>,
    subscription: PatternSet,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<WatcherStats>,
}

impl WatcherHandle {
    /// Build a watcher and spawn its loop
    pub fn spawn(
        host: Arc<dyn Browser>,
        registry: ServiceRegistry,
        settings: WatcherSettings,
        clock: Clock,
    ) -> Result<Self, PatternError> {
        let (events, events_rx) = mpsc::channel(EVENT_BUFFER);
        let watcher = Watcher::new(host, registry, settings, clock, events_rx);
        let subscription = watcher.subscription()?;

        let (shutdown, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(watcher.run(shutdown_rx));
        Ok(Self {
            events,
            subscription,
            shutdown,
            task,
        })
    }

    /// Sender for the host to deliver events on
    pub fn events(&self) -> mpsc::Sender<HostEvent> {
        self.events.clone()
    }

    /// Patterns the host should filter network traffic with
    pub fn subscription(&self) -> &PatternSet {
        &self.subscription
    }

    /// Stop the loop and wait for its final counters
    pub async fn shutdown(self) -> anyhow::Result<WatcherStats> {
        // Err means the loop already exited on its own
        let _ = self.shutdown.send(());
        Ok(self.task.await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::simulated::SimulatedBrowser;
    use crate::host::WindowId;
    use tokio::time::sleep;

    const CHATGPT: &str = "https://chatgpt.com/backend-api/conversation";
    const CLAUDE: &str = "https://claude.ai/api/organizations/o/chat_conversations/c/completion";

    /// Watcher running against a simulated browser.
    ///
    /// Tests drive time with `sleep` on a paused runtime: the clock only jumps
    /// once every task is idle, so each step fully settles first.
    struct Harness {
        browser: SimulatedBrowser,
        handle: WatcherHandle,
    }

    impl Harness {
        fn start(browser: SimulatedBrowser) -> Self {
            Self::with_settings(browser, WatcherSettings::default())
        }

        fn with_settings(browser: SimulatedBrowser, settings: WatcherSettings) -> Self {
            let handle = WatcherHandle::spawn(
                Arc::new(browser.clone()),
                ServiceRegistry::builtin(),
                settings,
                Clock::system(),
            )
            .unwrap();
            browser.subscribe(handle.subscription().clone(), handle.events());
            Self { browser, handle }
        }

        async fn stop(self) -> WatcherStats {
            self.handle.shutdown().await.unwrap()
        }
    }

    /// Tab 7 in the background: window 1 focused with tab 1 active
    fn background_tab_browser() -> SimulatedBrowser {
        let browser = SimulatedBrowser::new();
        browser.open_tab(TabId(1), WindowId(1));
        browser.open_tab(TabId(7), WindowId(1));
        browser.open_tab(TabId(8), WindowId(1));
        browser.focus_window(Some(WindowId(1)));
        browser
    }

    async fn sleep_ms(ms: u64) {
        sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_on_one_tab_notifies_once() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        // t=0: A starts, t=500: B starts
        b.start_request("A", TabId(7), CHATGPT, "POST").await;
        sleep_ms(500).await;
        b.start_request("B", TabId(7), CHATGPT, "POST").await;

        // t=2500: A completes (2500ms), t=3000: B completes (2500ms)
        sleep_ms(2000).await;
        b.complete_request("A").await;
        sleep_ms(500).await;
        b.complete_request("B").await;

        // A's trigger would have fired at t=3500; B replaced it
        sleep_ms(990).await;
        assert!(b.created().is_empty(), "nothing before t=4000");

        sleep_ms(20).await;
        let created = b.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "ChatGPT");
        assert_eq!(created[0].body, DEFAULT_BODY);

        // Quiet afterwards
        sleep_ms(10_000).await;
        assert_eq!(b.created().len(), 1);

        let stats = h.stop().await;
        assert_eq!(stats.completions, 2);
        assert_eq!(stats.superseded, 1);
        assert_eq!(stats.decisions, 1);
        assert_eq!(stats.notifications, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_reports_last_service() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("gpt", TabId(7), CHATGPT, "POST").await;
        b.start_request("claude", TabId(7), CLAUDE, "POST").await;
        sleep_ms(3000).await;
        b.complete_request("gpt").await;
        sleep_ms(200).await;
        b.complete_request("claude").await;
        sleep_ms(1500).await;

        let created = b.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "Claude");
        h.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_request_never_notifies() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("quick", TabId(7), CHATGPT, "POST").await;
        sleep_ms(1500).await;
        b.complete_request("quick").await;
        sleep_ms(10_000).await;

        assert!(b.created().is_empty());
        let stats = h.stop().await;
        assert_eq!(stats.short_requests, 1);
        assert_eq!(stats.decisions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_and_unknown_hosts_ignored() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("get", TabId(7), CHATGPT, "GET").await;
        // Outside the subscription, never even delivered
        assert!(!b.start_request("other", TabId(7), "https://example.com/api", "POST").await);
        sleep_ms(5000).await;
        b.complete_request("get").await;
        sleep_ms(2000).await;

        assert!(b.created().is_empty());
        let stats = h.stop().await;
        assert_eq!(stats.requests_tracked, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_tab_is_not_notified() {
        let browser = background_tab_browser();
        browser.activate(TabId(7));
        let h = Harness::start(browser);
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(3000).await;
        b.complete_request("r").await;
        sleep_ms(1500).await;

        assert!(b.created().is_empty());
        let stats = h.stop().await;
        assert_eq!(stats.decisions, 1);
        assert_eq!(stats.notifications, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_active_tab_in_unfocused_window_is_notified() {
        let browser = background_tab_browser();
        browser.activate(TabId(7));
        browser.focus_window(None);
        let h = Harness::start(browser);
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(3000).await;
        b.complete_request("r").await;
        sleep_ms(1500).await;

        assert_eq!(b.created().len(), 1);
        h.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_judged_at_fire_time() {
        // Tab 7 is in view when the request starts, user switches away later
        let browser = background_tab_browser();
        browser.activate(TabId(7));
        let h = Harness::start(browser);
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(2500).await;
        b.complete_request("r").await;
        sleep_ms(500).await;
        b.activate(TabId(1));
        sleep_ms(600).await;

        assert_eq!(b.created().len(), 1);
        h.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_tab_at_fire_time_is_dropped() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(2500).await;
        b.complete_request("r").await;
        b.close_tab(TabId(7));
        sleep_ms(1500).await;

        assert!(b.created().is_empty());
        h.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_request_never_notifies() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(2500).await;
        b.fail_request("r", "net::ERR_ABORTED").await;
        sleep_ms(5000).await;

        assert!(b.created().is_empty());
        let stats = h.stop().await;
        assert_eq!(stats.completions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tabs_are_independent() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("seven", TabId(7), CHATGPT, "POST").await;
        b.start_request("eight", TabId(8), CLAUDE, "POST").await;
        sleep_ms(2500).await;
        b.complete_request("seven").await;
        sleep_ms(300).await;
        b.complete_request("eight").await;
        sleep_ms(1500).await;

        let mut titles: Vec<_> = b.created().into_iter().map(|n| n.title).collect();
        titles.sort();
        assert_eq!(titles, vec!["ChatGPT", "Claude"]);
        h.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_does_not_block_other_tabs() {
        let browser = background_tab_browser();
        browser.set_tab_latency(TabId(7), Duration::from_secs(30));
        let h = Harness::start(browser);
        let b = &h.browser;

        b.start_request("seven", TabId(7), CHATGPT, "POST").await;
        b.start_request("eight", TabId(8), CHATGPT, "POST").await;
        sleep_ms(2500).await;
        b.complete_request("seven").await;
        b.complete_request("eight").await;
        sleep_ms(1500).await;

        assert_eq!(b.created().len(), 1, "tab 8 notified while tab 7 hangs");

        sleep_ms(30_000).await;
        assert_eq!(b.created().len(), 2);
        h.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_focuses_tab_and_clears() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(2500).await;
        b.complete_request("r").await;
        sleep_ms(1500).await;

        let id = b.created()[0].id.clone();
        b.focus_window(Some(WindowId(2)));
        assert!(b.click_notification(&id).await);
        sleep_ms(10).await;

        assert!(b.is_active(TabId(7)));
        assert_eq!(b.focused_window(), Some(WindowId(1)));
        assert!(b.shown().is_empty());
        assert_eq!(b.cleared(), vec![id]);

        let stats = h.stop().await;
        assert_eq!(stats.clicks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_after_tab_closed_only_clears() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(2500).await;
        b.complete_request("r").await;
        sleep_ms(1500).await;

        let id = b.created()[0].id.clone();
        b.close_tab(TabId(7));
        b.click_notification(&id).await;
        sleep_ms(10).await;

        assert!(b.shown().is_empty());
        assert_eq!(b.focused_window(), Some(WindowId(1)));
        assert!(b.is_active(TabId(1)));
        h.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_drops_request_whose_completion_was_lost() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("lost", TabId(7), CHATGPT, "POST").await;
        // Sweeps at 60s intervals; the 360s sweep sees a 360s-old entry
        sleep_ms(361_000).await;
        b.complete_request("lost").await;
        sleep_ms(2000).await;

        assert!(b.created().is_empty());
        let stats = h.stop().await;
        assert_eq!(stats.swept_requests, 1);
        assert_eq!(stats.completions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_keeps_young_requests() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("slow", TabId(7), CHATGPT, "POST").await;
        // Four minutes of generation is long but not abandoned
        sleep_ms(240_000).await;
        b.complete_request("slow").await;
        sleep_ms(1500).await;

        assert_eq!(b.created().len(), 1);
        let stats = h.stop().await;
        assert_eq!(stats.swept_requests, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gc_forgets_unclicked_notification() {
        let h = Harness::start(background_tab_browser());
        let b = &h.browser;

        b.start_request("r", TabId(7), CHATGPT, "POST").await;
        sleep_ms(2500).await;
        b.complete_request("r").await;
        sleep_ms(1500).await;
        let id = b.created()[0].id.clone();

        // Record is older than 5 minutes by the 360s sweep
        sleep_ms(360_000).await;
        b.click_notification(&id).await;
        sleep_ms(10).await;

        // No record left: tab stays in the background, notification cleared
        assert!(!b.is_active(TabId(7)));
        assert_eq!(b.cleared(), vec![id]);
        let stats = h.stop().await;
        assert_eq!(stats.swept_notifications, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_timers_do_not_kill_loop() {
        let settings = WatcherSettings {
            debounce: Duration::MAX,
            gc_interval: Duration::MAX,
            ..WatcherSettings::default()
        };
        let h = Harness::with_settings(background_tab_browser(), settings);
        let b = &h.browser;

        b.start_request("first", TabId(7), CHATGPT, "POST").await;
        sleep_ms(3000).await;
        b.complete_request("first").await;
        sleep_ms(10).await;

        // Still consuming events after the long trigger was armed
        b.start_request("second", TabId(8), CHATGPT, "POST").await;
        sleep_ms(3000).await;
        b.complete_request("second").await;
        sleep_ms(10).await;

        let stats = h.handle.shutdown().await.expect("loop should still be alive");
        assert_eq!(stats.requests_tracked, 2);
        assert_eq!(stats.completions, 2);
        assert_eq!(stats.decisions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_host_drops_sender() {
        let browser = SimulatedBrowser::new();
        let (events_tx, events_rx) = mpsc::channel(1);
        let watcher = Watcher::new(
            Arc::new(browser),
            ServiceRegistry::builtin(),
            WatcherSettings::default(),
            Clock::system(),
            events_rx,
        );
        let (_shutdown, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(watcher.run(shutdown_rx));

        drop(events_tx);
        let stats = task.await.unwrap();
        assert_eq!(stats, WatcherStats::default());
    }
}
