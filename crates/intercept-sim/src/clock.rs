//! Monotonic time sources for the guidance engine.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A monotonic time source. Readings are offsets from an arbitrary epoch.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
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
        self.epoch.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test or replay driver can keep one
/// handle and hand another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `secs` seconds.
    pub fn advance(&self, secs: f64) {
        self.advance_by(Duration::from_secs_f64(secs));
    }

    pub fn advance_by(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }

    /// Set the reading directly. May move backwards.
    pub fn set(&self, reading: Duration) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = reading;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(0.25);
        assert_eq!(clock.now(), Duration::from_millis(250));
        clock.set(Duration::from_secs(3));
        assert_eq!(handle.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
