//! Error notifications.
//!
//! [`NotificationController`] turns each distinct `ErrorAddingFile` instance
//! into exactly one transient [`Notification`]. Display, timeout and queueing
//! belong to the host; the controller only triggers and interprets the
//! user's response.

use std::time::Duration;

use crate::{EffectScheduler, FileEntry, Moment, Revision, ShareState, StateSnapshot, Strings};

/// How long the host keeps a notification on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationDuration {
    /// About four seconds.
    Short,
    /// About ten seconds.
    Long,
}

impl NotificationDuration {
    /// Display time.
    pub fn as_duration(self) -> Duration {
        match self {
            Self::Short => Duration::from_secs(4),
            Self::Long => Duration::from_secs(10),
        }
    }
}

/// How a shown notification ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationResult {
    /// Timed out or swiped away.
    Dismissed,
    /// The user activated the action.
    ActionPerformed,
}

/// A transient message for the host to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Revision of the error state that triggered it.
    pub key: Revision,
    /// Message text.
    pub message: String,
    /// Action label. `None` if there is nothing to act on.
    pub action_label: Option<String>,
    /// Display time.
    pub duration: NotificationDuration,
}

impl Notification {
    /// Build the notification for an `ErrorAddingFile` occurrence.
    ///
    /// The message names `error_file` when known. The action is offered only
    /// when other files are staged.
    pub fn for_add_error(
        key: Revision,
        files: &[FileEntry],
        error_file: Option<&FileEntry>,
        strings: &Strings,
    ) -> Self {
        let message = match error_file {
            Some(file) => strings.error_file_message(&file.name),
            None => strings.error_generic.clone(),
        };
        let action_label = (!files.is_empty()).then(|| strings.error_action.clone());

        Self { key, message, action_label, duration: NotificationDuration::Long }
    }
}

#[derive(Debug, Clone)]
struct Outstanding {
    key: Revision,
    has_action: bool,
}

/// Notifications remembered while awaiting a response. A host that never
/// resolves them loses the oldest first.
pub const MAX_OUTSTANDING: usize = 16;

/// One-shot notification trigger keyed by error-state instance.
#[derive(Debug, Clone)]
pub struct NotificationController<I> {
    trigger: EffectScheduler<Revision, I>,
    outstanding: Vec<Outstanding>,
    strings: Strings,
}

impl<I: Moment> NotificationController<I> {
    /// Create a controller rendering messages with `strings`.
    pub fn new(strings: Strings) -> Self {
        Self { trigger: EffectScheduler::new(), outstanding: Vec::new(), strings }
    }

    /// React to a newly observed state.
    ///
    /// Returns a notification the first time a given `ErrorAddingFile`
    /// instance is seen; observing the same instance again yields nothing.
    pub fn on_state(&mut self, snapshot: &StateSnapshot, now: I) -> Option<Notification> {
        let ShareState::ErrorAddingFile { files, error_file } = snapshot.state() else {
            self.trigger.cancel();
            return None;
        };

        self.trigger.launch(snapshot.revision(), now, Duration::ZERO);
        let key = self.trigger.poll(now)?;

        let notification = Notification::for_add_error(key, files, error_file.as_ref(), &self.strings);
        tracing::debug!(%key, message = %notification.message, action = ?notification.action_label, "notification triggered");

        if self.outstanding.len() == MAX_OUTSTANDING {
            let dropped = self.outstanding.remove(0);
            tracing::debug!(key = %dropped.key, "oldest unresolved notification forgotten");
        }
        self.outstanding.push(Outstanding { key, has_action: notification.action_label.is_some() });
        Some(notification)
    }

    /// Interpret the user's response to notification `key`.
    ///
    /// Returns `true` if the acknowledge intent should be sent. Unknown or
    /// already resolved keys are ignored.
    pub fn resolve(&mut self, key: Revision, result: NotificationResult) -> bool {
        let Some(index) = self.outstanding.iter().position(|o| o.key == key) else {
            tracing::warn!(%key, ?result, "resolution for unknown notification ignored");
            return false;
        };

        let outstanding = self.outstanding.remove(index);
        result == NotificationResult::ActionPerformed && outstanding.has_action
    }

    /// Number of notifications awaiting a response.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn file(name: &str) -> FileEntry {
        FileEntry::from_bytes(name, 100, format!("file://{name}"))
    }

    fn error_state(rev: u64, files: Vec<FileEntry>, error_file: Option<FileEntry>) -> StateSnapshot {
        StateSnapshot::new(Revision::new(rev), ShareState::ErrorAddingFile { files, error_file })
    }

    #[test]
    fn named_file_without_action() {
        let mut controller = NotificationController::new(Strings::default());
        let snapshot = error_state(1, vec![], Some(file("photo.jpg")));

        let n = controller.on_state(&snapshot, Instant::now()).expect("notification");
        assert!(n.message.contains("photo.jpg"));
        assert_eq!(n.action_label, None);
        assert_eq!(n.duration, NotificationDuration::Long);
    }

    #[test]
    fn generic_message_with_action() {
        let strings = Strings::default();
        let mut controller = NotificationController::new(strings.clone());
        let snapshot = error_state(1, vec![file("a")], None);

        let n = controller.on_state(&snapshot, Instant::now()).expect("notification");
        assert_eq!(n.message, strings.error_generic);
        assert_eq!(n.action_label, Some(strings.error_action));

        assert!(controller.resolve(n.key, NotificationResult::ActionPerformed));
        assert!(!controller.resolve(n.key, NotificationResult::ActionPerformed));
    }

    #[test]
    fn same_instance_fires_once() {
        let mut controller = NotificationController::new(Strings::default());
        let snapshot = error_state(4, vec![], None);
        let now = Instant::now();

        assert!(controller.on_state(&snapshot, now).is_some());
        assert!(controller.on_state(&snapshot, now).is_none());
        assert!(controller.on_state(&snapshot.clone(), now).is_none());
    }

    #[test]
    fn new_instance_fires_again() {
        let mut controller = NotificationController::new(Strings::default());
        let now = Instant::now();

        assert!(controller.on_state(&error_state(1, vec![], None), now).is_some());
        controller.on_state(&StateSnapshot::new(Revision::new(2), ShareState::NoFiles), now);
        assert!(controller.on_state(&error_state(3, vec![], None), now).is_some());
        assert_eq!(controller.outstanding(), 2);
    }

    #[test]
    fn unresolved_notifications_are_bounded() {
        let mut controller = NotificationController::new(Strings::default());
        let now = Instant::now();
        let total = MAX_OUTSTANDING as u64 + 4;

        for rev in 1..=total {
            assert!(controller.on_state(&error_state(rev, vec![file("a")], None), now).is_some());
        }
        assert_eq!(controller.outstanding(), MAX_OUTSTANDING);

        // the oldest were forgotten, the newest still resolve
        assert!(!controller.resolve(Revision::new(1), NotificationResult::ActionPerformed));
        assert!(controller.resolve(Revision::new(total), NotificationResult::ActionPerformed));
        assert_eq!(controller.outstanding(), MAX_OUTSTANDING - 1);
    }

    #[test]
    fn dismissal_sends_nothing() {
        let mut controller = NotificationController::new(Strings::default());
        let n = controller
            .on_state(&error_state(1, vec![file("a")], None), Instant::now())
            .expect("notification");

        assert!(!controller.resolve(n.key, NotificationResult::Dismissed));
        assert_eq!(controller.outstanding(), 0);
    }

    #[test]
    fn action_ignored_when_not_offered() {
        let mut controller = NotificationController::new(Strings::default());
        let n = controller
            .on_state(&error_state(1, vec![], Some(file("x"))), Instant::now())
            .expect("notification");

        assert!(!controller.resolve(n.key, NotificationResult::ActionPerformed));
    }
}
