//! Time sources for the timed page animations.
//!
//! Animations never sleep or register callbacks. They are polled with the
//! current time from a [`Clock`] and work out for themselves which steps are
//! due, which lets tests drive them with a [`ManualClock`].

use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// Elapsed time since some fixed epoch.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction.
#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Next-due bookkeeping for a single repeating tick.
///
/// Each step is scheduled from the previous due time rather than from the
/// poll time, so a late poll replays missed steps one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    due: Duration,
}

impl Timer {
    /// First step due at `due`.
    pub fn at(due: Duration) -> Self {
        Self { due }
    }

    pub fn due(&self) -> Duration {
        self.due
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.due
    }

    /// Pushes the next step `delay` after the current due time.
    pub fn schedule(&mut self, delay: Duration) {
        self.due += delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance_ms(250);
        clock.advance_ms(250);
        assert_eq!(clock.now(), Duration::from_millis(500));
    }

    #[test]
    fn timer_catches_up_step_by_step() {
        let mut timer = Timer::at(Duration::from_millis(100));
        let now = Duration::from_millis(350);
        let mut steps = 0;

        while timer.is_due(now) {
            steps += 1;
            timer.schedule(Duration::from_millis(100));
        }

        assert_eq!(steps, 3);
        assert_eq!(timer.due(), Duration::from_millis(400));
    }

    #[test]
    fn monotonic_clock_is_non_decreasing() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
