//! Quiet-window coalescing for continuous input.
//!
//! The clock is passed in, never read: callers hand `Instant`s from their
//! event loop, tests hand synthetic ones.

use std::time::{Duration, Instant};

/// Keeps only the most recent value and releases it once no new value has
/// arrived for `window`.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Queue `value`, replacing any pending one. Returns the replaced value.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending.replace((value, now)).map(|(v, _)| v)
    }

    /// Release the pending value if the window has elapsed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.window);
        if due { self.take() } else { None }
    }

    /// Release the pending value regardless of the window.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|(v, _)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn test_last_value_wins() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);

        assert_eq!(d.push("#111", t0), None);
        assert_eq!(d.push("#222", t0 + Duration::from_millis(50)), Some("#111"));
        assert_eq!(d.push("#333", t0 + Duration::from_millis(100)), Some("#222"));

        // window restarts on every push
        assert_eq!(d.poll(t0 + Duration::from_millis(250)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(300)), Some("#333"));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_cancel_drops() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.push(1, t0);
        assert_eq!(d.deadline(), Some(t0 + WINDOW));
        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.poll(t0 + WINDOW * 2), None);
    }
}
