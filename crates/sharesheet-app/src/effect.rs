//! Keyed one-shot delayed effects.
//!
//! An [`EffectScheduler`] is a single slot holding at most one pending task.
//! The task is identified by a trigger key; it fires at most once per key and
//! is abandoned when a different key replaces it or it is cancelled.
//!
//! Time is injected so the scheduler runs unchanged on a real clock and on a
//! virtual simulation clock.

use std::{fmt::Debug, ops::Add, time::Duration};

/// Point in time usable by the presentation layer.
///
/// Implemented for any monotonic instant that can be advanced by a
/// [`Duration`]: `std::time::Instant`, `tokio::time::Instant` or a virtual
/// simulation instant.
pub trait Moment: Copy + Ord + Debug + Send + Sync + Add<Duration, Output = Self> {}

impl<T> Moment for T where T: Copy + Ord + Debug + Send + Sync + Add<Duration, Output = T> {}

#[derive(Debug, Clone)]
struct Pending<K, I> {
    key: K,
    due: I,
}

/// Single-slot scheduler for a keyed one-shot effect.
///
/// - Launching the key that is already pending, or that already fired, is a
///   no-op: tasks do not stack and never refire.
/// - Launching a different key abandons the pending task and schedules anew.
/// - [`poll`](Self::poll) fires the pending task once its deadline passed.
#[derive(Debug, Clone)]
pub struct EffectScheduler<K, I> {
    pending: Option<Pending<K, I>>,
    fired: Option<K>,
}

impl<K, I> Default for EffectScheduler<K, I> {
    fn default() -> Self {
        Self { pending: None, fired: None }
    }
}

impl<K, I> EffectScheduler<K, I>
where
    K: Clone + PartialEq + Debug,
    I: Moment,
{
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the effect for `key` to fire `delay` after `now`.
    ///
    /// Returns `true` if a new task was scheduled.
    pub fn launch(&mut self, key: K, now: I, delay: Duration) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.key == key) || self.fired.as_ref() == Some(&key) {
            return false;
        }

        if let Some(stale) = self.pending.take() {
            tracing::trace!(stale = ?stale.key, next = ?key, "pending effect superseded");
        }

        self.pending = Some(Pending { key, due: now + delay });
        true
    }

    /// Abandon the pending task, if any. Returns its key.
    pub fn cancel(&mut self) -> Option<K> {
        self.pending.take().map(|p| p.key)
    }

    /// Fire the pending task if its deadline is at or before `now`.
    ///
    /// Returns the key of the fired task.
    pub fn poll(&mut self, now: I) -> Option<K> {
        if !self.pending.as_ref().is_some_and(|p| p.due <= now) {
            return None;
        }

        let key = self.pending.take().map(|p| p.key)?;
        self.fired = Some(key.clone());
        Some(key)
    }

    /// Forget the fired key so it may be launched again.
    pub fn rearm(&mut self) {
        self.fired = None;
    }

    /// Whether a task is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Key of the waiting task.
    pub fn pending_key(&self) -> Option<&K> {
        self.pending.as_ref().map(|p| &p.key)
    }

    /// Deadline of the waiting task.
    pub fn deadline(&self) -> Option<I> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Key of the last task that fired.
    pub fn last_fired(&self) -> Option<&K> {
        self.fired.as_ref()
    }
}
