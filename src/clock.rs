//! Injected time source and the one-shot timer used by the intro reveal.
//!
//! Sessions never read wall-clock time directly; tests drive a
//! `ManualClock` instead.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time since some fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Fires at most once per `schedule`. Cancelling drops the deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShotTimer {
    deadline: Option<Duration>,
}

impl OneShotTimer {
    pub fn schedule(&mut self, at: Duration) {
        self.deadline = Some(at);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let view = clock.clone();
        clock.advance(Duration::from_millis(250));
        assert_eq!(view.now(), Duration::from_millis(250));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut t = OneShotTimer::default();
        t.schedule(Duration::from_secs(2));
        assert!(!t.poll(Duration::from_secs(1)));
        assert!(t.poll(Duration::from_secs(2)));
        assert!(!t.poll(Duration::from_secs(3)));
        assert!(!t.is_pending());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut t = OneShotTimer::default();
        t.schedule(Duration::from_secs(1));
        t.cancel();
        assert!(!t.poll(Duration::from_secs(10)));
    }
}
