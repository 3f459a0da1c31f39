use std::time::{Duration, Instant};

/// Admits at most one event per window and drops the rest.
///
/// Nothing is queued: an event that arrives inside the window is simply
/// refused, and the next admitted event is whichever arrives first after the
/// window has elapsed.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window: Duration,
    last_executed: Option<Instant>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_executed: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn last_executed(&self) -> Option<Instant> {
        self.last_executed
    }

    /// Record and admit the event at `now` if the window has elapsed.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        let open = match self.last_executed {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.window,
        };
        if open {
            self.last_executed = Some(now);
        }
        open
    }

    pub fn reset(&mut self) {
        self.last_executed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(50);

    #[test]
    fn burst_inside_window_admits_one() {
        let mut limiter = RateLimiter::new(WINDOW);
        let t0 = Instant::now();

        let admitted = (0..20)
            .filter(|i| limiter.try_acquire(t0 + Duration::from_millis(*i * 2)))
            .count();
        assert_eq!(admitted, 1);
        assert_eq!(limiter.last_executed(), Some(t0));
    }

    #[test]
    fn window_reopens_after_elapsing() {
        let mut limiter = RateLimiter::new(WINDOW);
        let t0 = Instant::now();

        assert!(limiter.try_acquire(t0));
        assert!(!limiter.try_acquire(t0 + Duration::from_millis(49)));
        assert!(limiter.try_acquire(t0 + Duration::from_millis(50)));
        assert!(!limiter.try_acquire(t0 + Duration::from_millis(60)));
        assert!(limiter.try_acquire(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn dropped_events_do_not_extend_the_window() {
        let mut limiter = RateLimiter::new(WINDOW);
        let t0 = Instant::now();

        assert!(limiter.try_acquire(t0));
        for ms in [10, 20, 30, 40] {
            assert!(!limiter.try_acquire(t0 + Duration::from_millis(ms)));
        }
        assert!(limiter.try_acquire(t0 + Duration::from_millis(51)));
    }

    #[test]
    fn reset_opens_immediately() {
        let mut limiter = RateLimiter::new(WINDOW);
        let t0 = Instant::now();
        assert!(limiter.try_acquire(t0));
        limiter.reset();
        assert!(limiter.try_acquire(t0 + Duration::from_millis(1)));
    }
}
