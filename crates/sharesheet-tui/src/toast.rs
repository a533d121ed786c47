//! Notification queue.
//!
//! Shows one notification at a time, oldest first. The head's display time
//! starts when it reaches the front, and it times out after its
//! [`NotificationDuration`](sharesheet_app::NotificationDuration).

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use sharesheet_app::{Notification, NotificationResult, ScreenEvent};

/// FIFO of notifications waiting to be shown.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    queue: VecDeque<Notification>,
    shown_since: Option<Instant>,
}

impl NotificationQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `notification`; shown immediately if nothing else is.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        if self.queue.is_empty() {
            self.shown_since = Some(now);
        }
        tracing::debug!(key = %notification.key, queued = self.queue.len(), "notification queued");
        self.queue.push_back(notification);
    }

    /// Notification on screen.
    pub fn current(&self) -> Option<&Notification> {
        self.queue.front()
    }

    /// Number of notifications shown or waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time left before the current notification times out.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let current = self.queue.front()?;
        let since = self.shown_since?;
        let elapsed = now.saturating_duration_since(since);
        Some(current.duration.as_duration().saturating_sub(elapsed))
    }

    /// Time out the current notification if it has been shown long enough.
    pub fn expire(&mut self, now: Instant) -> Option<ScreenEvent> {
        if self.remaining(now)? > Duration::ZERO {
            return None;
        }
        self.resolve(NotificationResult::Dismissed, now)
    }

    /// End the current notification with `result` and show the next one.
    pub fn resolve(&mut self, result: NotificationResult, now: Instant) -> Option<ScreenEvent> {
        let notification = self.queue.pop_front()?;
        self.shown_since = (!self.queue.is_empty()).then_some(now);
        tracing::debug!(key = %notification.key, ?result, "notification resolved");
        Some(ScreenEvent::NotificationResolved { key: notification.key, result })
    }
}

#[cfg(test)]
mod tests {
    use sharesheet_app::{NotificationDuration, Revision};

    use super::*;

    fn notification(key: u64, duration: NotificationDuration) -> Notification {
        Notification {
            key: Revision::new(key),
            message: format!("error {key}"),
            action_label: None,
            duration,
        }
    }

    fn resolved_key(event: Option<ScreenEvent>) -> Option<(u64, NotificationResult)> {
        match event {
            Some(ScreenEvent::NotificationResolved { key, result }) => Some((key.get(), result)),
            _ => None,
        }
    }

    #[test]
    fn long_notification_times_out_after_ten_seconds() {
        let t0 = Instant::now();
        let mut queue = NotificationQueue::new();
        queue.push(notification(3, NotificationDuration::Long), t0);

        assert!(queue.expire(t0 + Duration::from_secs(9)).is_none());
        assert_eq!(
            resolved_key(queue.expire(t0 + Duration::from_secs(10))),
            Some((3, NotificationResult::Dismissed))
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn next_notification_starts_its_own_timer() {
        let t0 = Instant::now();
        let mut queue = NotificationQueue::new();
        queue.push(notification(1, NotificationDuration::Short), t0);
        queue.push(notification(2, NotificationDuration::Short), t0);

        let t1 = t0 + Duration::from_secs(1);
        assert_eq!(
            resolved_key(queue.resolve(NotificationResult::ActionPerformed, t1)),
            Some((1, NotificationResult::ActionPerformed))
        );
        assert_eq!(queue.current().map(|n| n.key.get()), Some(2));
        assert_eq!(queue.remaining(t1), Some(Duration::from_secs(4)));
    }

    #[test]
    fn resolving_empty_queue_is_none() {
        let mut queue = NotificationQueue::new();
        assert!(queue.resolve(NotificationResult::Dismissed, Instant::now()).is_none());
        assert!(queue.remaining(Instant::now()).is_none());
    }
}
