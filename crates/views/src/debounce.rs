//! Trailing-edge debounce for rapid input (the search box). Time is passed
//! in so tests never sleep.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, pending: None }
    }

    /// Register a new value; any earlier pending value is superseded and the
    /// quiet period restarts.
    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Fires the latest value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, submitted)) if now.duration_since(*submitted) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn does_not_fire_inside_the_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.submit("mil", t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(100)), None);
        assert!(d.is_pending());
    }

    #[test]
    fn fires_the_latest_value_after_the_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.submit("mil", t0);
        d.submit("mill", t0 + Duration::from_millis(200));
        // First submission's deadline passes, but it was superseded.
        assert_eq!(d.poll(t0 + Duration::from_millis(400)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(500)), Some("mill"));
        assert!(!d.is_pending());
    }

    #[test]
    fn fires_only_once_per_submission() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.submit(1, t0);
        assert_eq!(d.poll(t0 + DELAY), Some(1));
        assert_eq!(d.poll(t0 + DELAY * 2), None);
    }
}
