//! Schedule-or-replace primitive
//!
//! A [`Debouncer`] holds at most one pending trigger per key. Scheduling a key
//! that already has one cancels it and re-arms the quiet window from now, so a
//! burst of events for the same key fires once, after the last event, with the
//! last value (trailing edge, no maximum delay).
//!
//! Firing is poll-driven: the owner awaits [`Debouncer::next`] inside its own
//! event loop, so expiry is handled on the same task as every other state
//! change and never races a replacement.

use futures::future::poll_fn;
use futures::ready;
use std::collections::HashMap;
use std::hash::Hash;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio_util::time::{delay_queue, DelayQueue};

/// Longest window accepted; the delay queue cannot hold deadlines much past this
pub const MAX_WINDOW: Duration = Duration::from_secs(365 * 24 * 60 * 60);

struct Slot<V> {
    timer: delay_queue::Key,
    value: V,
}

pub struct Debouncer<K, V> {
    window: Duration,
    queue: DelayQueue<K>,
    slots: HashMap<K, Slot<V>>,
}

impl<K, V> Debouncer<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.min(MAX_WINDOW),
            queue: DelayQueue::new(),
            slots: HashMap::new(),
        }
    }

    /// Arm (or re-arm) the trigger for `key`.
    ///
    /// Returns the value of the trigger that was cancelled, if any.
    pub fn schedule(&mut self, key: K, value: V) -> Option<V> {
        let replaced = self.cancel(&key);
        let timer = self.queue.insert(key.clone(), self.window);
        self.slots.insert(key, Slot { timer, value });
        replaced
    }

    /// Cancel a pending trigger without firing it
    pub fn cancel(&mut self, key: &K) -> Option<V> {
        let slot = self.slots.remove(key)?;
        self.queue.remove(&slot.timer);
        Some(slot.value)
    }

    /// Poll for the next trigger whose quiet window has elapsed.
    ///
    /// `Ready(None)` means nothing is scheduled.
    pub fn poll_expired(&mut self, cx: &mut Context<'_>) -> Poll<Option<(K, V)>> {
        if self.slots.is_empty() {
            return Poll::Ready(None);
        }
        loop {
            match ready!(self.queue.poll_expired(cx)) {
                Some(expired) => {
                    let key = expired.into_inner();
                    if let Some(slot) = self.slots.remove(&key) {
                        return Poll::Ready(Some((key, slot.value)));
                    }
                }
                None => return Poll::Ready(None),
            }
        }
    }

    /// Wait for the next trigger to fire. Resolves to `None` immediately when
    /// nothing is scheduled, so loops should guard on [`Self::is_empty`].
    pub async fn next(&mut self) -> Option<(K, V)> {
        poll_fn(|cx| self.poll_expired(cx)).await
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[cfg(test)]
    pub fn is_pending(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use tokio::time::{advance, Instant};

    const WINDOW: Duration = Duration::from_millis(1000);

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_window() {
        let mut d = Debouncer::new(WINDOW);
        let start = Instant::now();

        assert!(d.schedule(7, "ChatGPT").is_none());
        assert!(d.is_pending(&7));

        let fired = d.next().await;
        assert_eq!(fired, Some((7, "ChatGPT")));
        assert_eq!(start.elapsed(), WINDOW);
        assert!(d.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_window_is_capped() {
        let mut d = Debouncer::new(Duration::MAX);

        assert!(d.schedule(7, "ChatGPT").is_none());
        assert!(d.is_pending(&7));
        assert!(d.next().now_or_never().is_none());

        advance(MAX_WINDOW).await;
        assert_eq!(d.next().await, Some((7, "ChatGPT")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_value() {
        let mut d = Debouncer::new(WINDOW);
        let start = Instant::now();

        d.schedule(7, "ChatGPT");
        advance(Duration::from_millis(500)).await;
        assert_eq!(d.schedule(7, "Claude"), Some("ChatGPT"));
        advance(Duration::from_millis(900)).await;
        assert_eq!(d.schedule(7, "Gemini"), Some("Claude"));
        assert_eq!(d.len(), 1);

        let fired = d.next().await;
        assert_eq!(fired, Some((7, "Gemini")));
        // Re-armed at t=1400, so fires at t=2400
        assert_eq!(start.elapsed(), Duration::from_millis(2400));

        // Nothing else pending
        assert_eq!(d.next().now_or_never(), Some(None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let mut d = Debouncer::new(WINDOW);

        d.schedule(1, "a");
        advance(Duration::from_millis(300)).await;
        d.schedule(2, "b");

        assert_eq!(d.next().await, Some((1, "a")));
        assert!(d.is_pending(&2));
        assert_eq!(d.next().await, Some((2, "b")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_ready_before_window() {
        let mut d = Debouncer::new(WINDOW);
        d.schedule(3, ());
        advance(Duration::from_millis(999)).await;
        assert!(d.next().now_or_never().is_none());
        advance(Duration::from_millis(1)).await;
        assert_eq!(d.next().await, Some((3, ())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let mut d = Debouncer::new(WINDOW);
        d.schedule(5, "x");
        assert_eq!(d.cancel(&5), Some("x"));
        assert_eq!(d.cancel(&5), None);
        assert!(d.is_empty());
        assert_eq!(d.next().now_or_never(), Some(None));
    }
}
