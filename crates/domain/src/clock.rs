//! Clock abstraction.
//!
//! The workflow's "not in the past" and lifecycle-window checks depend on
//! the current time, so the clock is injected and swappable under test.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn utc_now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a settable instant, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock to the given instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock poisoned") = now;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn utc_now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_settable_and_advanceable() {
        let start = Utc::now();
        let clock = FixedClock::at(start);
        assert_eq!(clock.utc_now(), start);

        clock.advance(Duration::days(3));
        assert_eq!(clock.utc_now(), start + Duration::days(3));

        clock.set(start);
        assert_eq!(clock.utc_now(), start);
    }

    #[test]
    fn fixed_clock_clones_share_time() {
        let clock = FixedClock::at(Utc::now());
        let other = clock.clone();
        clock.advance(Duration::hours(1));
        assert_eq!(clock.utc_now(), other.utc_now());
    }
}
