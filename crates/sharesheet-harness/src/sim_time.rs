//! Virtual time for deterministic simulation.
//!
//! [`SimInstant`] is an offset from the start of the simulation. It satisfies
//! [`sharesheet_app::Moment`], so the screen's delayed effects run against it
//! exactly as they do against a real clock. [`SimClock`] is the shared,
//! manually advanced source of "now".

use std::{
    ops::{Add, Sub},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

/// Point in virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// Start of the simulation.
    pub const EPOCH: Self = Self(Duration::ZERO);

    /// Instant `ms` milliseconds after the epoch.
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    /// Time since the epoch.
    pub fn since_epoch(self) -> Duration {
        self.0
    }
}

impl Add<Duration> for SimInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

/// Shared virtual clock.
///
/// Clones observe the same time. Stored as whole microseconds so reads never
/// lock.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    micros: Arc<AtomicU64>,
}

impl SimClock {
    /// Clock at the epoch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> SimInstant {
        SimInstant(Duration::from_micros(self.micros.load(Ordering::SeqCst)))
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.micros.fetch_add(by.as_micros() as u64, Ordering::SeqCst);
    }

    /// Move time forward to `to`. Never moves backwards.
    pub fn advance_to(&self, to: SimInstant) {
        self.micros.fetch_max(to.0.as_micros() as u64, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let clock = SimClock::new();
        let other = clock.clone();

        clock.advance(Duration::from_millis(750));
        assert_eq!(other.now(), SimInstant::from_millis(750));
    }

    #[test]
    fn advance_to_is_monotonic() {
        let clock = SimClock::new();
        clock.advance_to(SimInstant::from_millis(100));
        clock.advance_to(SimInstant::from_millis(40));

        assert_eq!(clock.now(), SimInstant::from_millis(100));
    }

    #[test]
    fn difference_saturates() {
        let a = SimInstant::from_millis(10);
        let b = SimInstant::from_millis(30);

        assert_eq!(b - a, Duration::from_millis(20));
        assert_eq!(a - b, Duration::ZERO);
    }
}
