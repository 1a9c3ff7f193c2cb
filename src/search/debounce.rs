//! Trailing debounce for typed queries.
//!
//! The debouncer holds at most one pending value. Every push replaces the
//! value and restarts the quiet interval; the value is released only after
//! the interval passes without another push. Callers pass the current time
//! in, so the event loop tick drives it.

use std::time::{Duration, Instant};

/// Default quiet interval before a query settles.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A trailing debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    /// Quiet interval required before the pending value is released.
    delay: Duration,
    /// The latest value and the time it was pushed.
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet interval.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured quiet interval.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value, restarting the quiet interval.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if the quiet interval has elapsed.
    ///
    /// Returns each pushed burst at most once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);

        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Check if a value is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will settle, if nothing else is pushed.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_nothing_pending_initially() {
        let mut debouncer: Debouncer<String> = Debouncer::default();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(Instant::now()), None);
        assert_eq!(debouncer.delay(), DEFAULT_DEBOUNCE);
    }

    #[test]
    fn test_burst_settles_once_with_last_value() {
        let mut debouncer = Debouncer::new(ms(300));
        let start = Instant::now();
        let mut settled = Vec::new();

        // Five keystrokes, 60ms apart, all within 300ms
        for (i, text) in ["h", "he", "hel", "hell", "hello"].iter().enumerate() {
            let at = start + ms(60 * i as u64);
            debouncer.push(text.to_string(), at);
            settled.extend(debouncer.poll(at));
        }

        // Tick every 50ms for a second
        for step in 0..20 {
            settled.extend(debouncer.poll(start + ms(240 + 50 * step)));
        }

        assert_eq!(settled, vec!["hello".to_string()]);
    }

    #[test]
    fn test_not_released_before_delay() {
        let mut debouncer = Debouncer::new(ms(300));
        let start = Instant::now();
        debouncer.push("a", start);

        assert_eq!(debouncer.poll(start + ms(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + ms(300)), Some("a"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_push_restarts_timer() {
        let mut debouncer = Debouncer::new(ms(300));
        let start = Instant::now();
        debouncer.push("a", start);
        debouncer.push("ab", start + ms(250));

        assert_eq!(debouncer.poll(start + ms(400)), None);
        assert_eq!(debouncer.deadline(), Some(start + ms(550)));
        assert_eq!(debouncer.poll(start + ms(550)), Some("ab"));
    }

    #[test]
    fn test_separate_bursts_settle_separately() {
        let mut debouncer = Debouncer::new(ms(100));
        let start = Instant::now();

        debouncer.push(1, start);
        assert_eq!(debouncer.poll(start + ms(100)), Some(1));

        debouncer.push(2, start + ms(500));
        assert_eq!(debouncer.poll(start + ms(550)), None);
        assert_eq!(debouncer.poll(start + ms(600)), Some(2));
    }

    #[test]
    fn test_flush_and_cancel() {
        let mut debouncer = Debouncer::new(ms(300));
        let start = Instant::now();

        debouncer.push("x", start);
        assert_eq!(debouncer.flush(), Some("x"));
        assert_eq!(debouncer.flush(), None);

        debouncer.push("y", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + ms(1000)), None);
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_zero_delay_settles_on_next_poll() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        let start = Instant::now();
        debouncer.push("now", start);
        assert_eq!(debouncer.poll(start), Some("now"));
    }
}
