//! Integration tests for the share screen driven by a state stream.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - Sheet phase and animation commands follow the published states
//! - Notifications fire once per error instance
//! - Intents reach the orchestrator only when the state allows them

use std::time::{Duration, Instant};

use sharesheet_app::{
    Bridge, FileEntry, NotificationResult, Orchestrator, Route, ScreenAction, ScreenConfig,
    ScreenEvent, ShareScreen, ShareState, SheetPhase, StateStream, StateSubscription,
};

const REVEAL: Duration = Duration::from_millis(750);

#[derive(Default)]
struct Intents {
    notification_actions: usize,
    adds: usize,
    removed: Vec<String>,
}

impl Orchestrator for Intents {
    fn on_primary_action(&mut self) {
        self.adds += 1;
    }

    fn on_file_remove(&mut self, file: &FileEntry) {
        self.removed.push(file.name.clone());
    }

    fn on_remove_all(&mut self) {}

    fn on_notification_action(&mut self) {
        self.notification_actions += 1;
    }

    fn on_sheet_button(&mut self) {}

    fn navigate_to(&mut self, _route: Route) {}
}

/// Screen wired to a stream, collecting every action it produced.
struct Fixture {
    stream: StateStream,
    states: StateSubscription,
    screen: ShareScreen<Instant>,
    bridge: Bridge<Intents>,
    actions: Vec<ScreenAction>,
    t0: Instant,
}

impl Fixture {
    fn new() -> Self {
        let mut stream = StateStream::default();
        let states = stream.subscribe();
        Self {
            stream,
            states,
            screen: ShareScreen::new(ScreenConfig::default()),
            bridge: Bridge::new(Intents::default()),
            actions: Vec::new(),
            t0: Instant::now(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    /// Publish `state` and deliver everything queued at `ms`.
    fn publish(&mut self, state: ShareState, ms: u64) {
        self.stream.publish(state).expect("valid state");
        self.deliver(ms);
    }

    fn deliver(&mut self, ms: u64) {
        for snapshot in self.states.drain() {
            self.event(ScreenEvent::StateChanged(snapshot), ms);
        }
    }

    fn event(&mut self, event: ScreenEvent, ms: u64) {
        let now = self.at(ms);
        for action in self.screen.handle(event, now) {
            self.bridge.dispatch(&action);
            self.actions.push(action);
        }
    }

    fn expands(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, ScreenAction::AnimateSheet(SheetPhase::Expanded)))
            .count()
    }

    fn notifications(&self) -> Vec<&sharesheet_app::Notification> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                ScreenAction::ShowNotification(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}

fn file(name: &str) -> FileEntry {
    FileEntry::from_bytes(name, 4096, format!("content://media/{name}"))
}

#[test]
fn quick_add_and_remove_never_expands() {
    let mut fx = Fixture::new();
    fx.deliver(0);

    fx.publish(ShareState::FilesAdded { files: vec![file("a")] }, 0);
    fx.event(ScreenEvent::Tick, 300);
    fx.publish(ShareState::NoFiles, 400);
    for ms in (500..3000).step_by(100) {
        fx.event(ScreenEvent::Tick, ms);
    }

    // Oracle
    assert_eq!(fx.expands(), 0);
    assert_eq!(fx.screen.sheet_phase(), SheetPhase::Collapsed);
    assert!(!fx.screen.sheet_visible());
}

#[test]
fn held_files_expand_exactly_once() {
    let mut fx = Fixture::new();
    fx.deliver(0);

    fx.publish(ShareState::FilesAdded { files: vec![file("a")] }, 0);
    for ms in (50..5000).step_by(50) {
        fx.event(ScreenEvent::Tick, ms);
    }
    fx.publish(ShareState::FilesAdded { files: vec![file("a"), file("b")] }, 5000);
    for ms in (5050..8000).step_by(50) {
        fx.event(ScreenEvent::Tick, ms);
    }

    // Oracle
    assert_eq!(fx.expands(), 1);
    assert_eq!(fx.screen.sheet_phase(), SheetPhase::Expanded);
}

#[test]
fn expansion_waits_for_reveal_delay() {
    let mut fx = Fixture::new();
    fx.deliver(0);
    fx.publish(ShareState::FilesAdded { files: vec![file("a")] }, 0);

    fx.event(ScreenEvent::Tick, 749);
    assert_eq!(fx.expands(), 0);
    assert!(fx.screen.reveal_pending());
    assert_eq!(fx.screen.next_deadline(), Some(fx.t0 + REVEAL));

    fx.event(ScreenEvent::Tick, 750);
    assert_eq!(fx.expands(), 1);
}

#[test]
fn named_error_without_action() {
    let mut fx = Fixture::new();
    fx.deliver(0);
    fx.publish(ShareState::ErrorAddingFile { files: vec![], error_file: Some(file("x.pdf")) }, 0);

    let shown = fx.notifications();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].message.contains("x.pdf"));
    assert_eq!(shown[0].action_label, None);

    let key = shown[0].key;
    fx.event(
        ScreenEvent::NotificationResolved { key, result: NotificationResult::ActionPerformed },
        100,
    );
    assert_eq!(fx.bridge.orchestrator().notification_actions, 0);
}

#[test]
fn generic_error_action_reaches_orchestrator() {
    let mut fx = Fixture::new();
    let strings = ScreenConfig::default().strings;
    fx.deliver(0);
    fx.publish(ShareState::ErrorAddingFile { files: vec![file("a")], error_file: None }, 0);

    let shown = fx.notifications();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, strings.error_generic);
    assert_eq!(shown[0].action_label.as_deref(), Some(strings.error_action.as_str()));

    let key = shown[0].key;
    fx.event(
        ScreenEvent::NotificationResolved { key, result: NotificationResult::ActionPerformed },
        200,
    );

    // Oracle
    assert_eq!(fx.bridge.orchestrator().notification_actions, 1);
    assert_eq!(fx.bridge.dispatched(), 1);
}

#[test]
fn redelivered_error_instance_notifies_once() {
    let mut fx = Fixture::new();
    fx.deliver(0);
    fx.publish(ShareState::ErrorAddingFile { files: vec![file("a")], error_file: None }, 0);

    // a second subscriber replays the same instance
    let mut late = fx.stream.subscribe();
    for snapshot in late.drain() {
        fx.event(ScreenEvent::StateChanged(snapshot), 10);
    }
    // identical payload is not republished
    fx.publish(ShareState::ErrorAddingFile { files: vec![file("a")], error_file: None }, 20);

    assert_eq!(fx.notifications().len(), 1);

    // a new instance notifies again
    fx.publish(ShareState::FilesAdded { files: vec![file("a")] }, 30);
    fx.publish(ShareState::ErrorAddingFile { files: vec![file("a")], error_file: None }, 40);
    assert_eq!(fx.notifications().len(), 2);
}

#[test]
fn locked_states_keep_sheet_open() {
    let mut fx = Fixture::new();
    fx.deliver(0);
    fx.publish(ShareState::FilesAdded { files: vec![file("a")] }, 0);
    fx.event(ScreenEvent::Tick, 800);
    fx.event(ScreenEvent::SheetSettled(SheetPhase::Collapsed), 900);
    assert_eq!(fx.screen.sheet_phase(), SheetPhase::Collapsed);

    fx.publish(ShareState::Starting { files: vec![file("a")], progress_percent: 10 }, 1000);
    assert_eq!(fx.screen.sheet_phase(), SheetPhase::Expanded);
    assert!(!fx.screen.gestures_enabled());
    assert!(fx.screen.fab().is_none());

    fx.event(ScreenEvent::SheetSettled(SheetPhase::Collapsed), 1100);
    assert_eq!(fx.screen.sheet_phase(), SheetPhase::Expanded);

    fx.event(ScreenEvent::PrimaryActionPressed, 1200);
    fx.event(ScreenEvent::FileRemovePressed(file("a")), 1200);
    assert_eq!(fx.bridge.orchestrator().adds, 0);
    assert!(fx.bridge.orchestrator().removed.is_empty());
}

#[test]
fn user_collapsed_sheet_stays_collapsed() {
    let mut fx = Fixture::new();
    fx.deliver(0);
    fx.publish(ShareState::FilesAdded { files: vec![file("a")] }, 0);
    fx.event(ScreenEvent::Tick, 800);
    assert_eq!(fx.expands(), 1);

    fx.event(ScreenEvent::SheetSettled(SheetPhase::Expanded), 1040);
    fx.event(ScreenEvent::SheetSettled(SheetPhase::Collapsed), 1500);

    // new instances of dismissible states
    fx.publish(ShareState::FilesAdded { files: vec![file("a"), file("b")] }, 1600);
    fx.publish(
        ShareState::ErrorAddingFile { files: vec![file("a"), file("b")], error_file: Some(file("c")) },
        1700,
    );
    fx.publish(ShareState::Complete { files: vec![file("a"), file("b")] }, 1800);
    fx.publish(ShareState::ErrorStarting { files: vec![file("a")], message: None }, 1900);
    for ms in (1950..4000).step_by(50) {
        fx.event(ScreenEvent::Tick, ms);
    }

    // Oracle
    assert_eq!(fx.expands(), 1);
    assert_eq!(fx.screen.sheet_phase(), SheetPhase::Collapsed);
    assert!(fx.screen.gestures_enabled());
    assert!(!fx.screen.reveal_pending());
    assert_eq!(fx.screen.next_deadline(), None);
}

#[test]
fn removal_routes_staged_file() {
    let mut fx = Fixture::new();
    fx.deliver(0);
    fx.publish(ShareState::FilesAdded { files: vec![file("a"), file("b")] }, 0);

    fx.event(ScreenEvent::FileRemovePressed(file("b")), 100);
    fx.event(ScreenEvent::PrimaryActionPressed, 100);

    assert_eq!(fx.bridge.orchestrator().removed, vec!["b".to_string()]);
    assert_eq!(fx.bridge.orchestrator().adds, 1);
}

#[test]
fn empty_state_after_clearing() {
    let mut fx = Fixture::new();
    fx.deliver(0);
    fx.publish(ShareState::FilesAdded { files: vec![file("a")] }, 0);
    assert!(!fx.screen.surface().is_empty());

    fx.publish(ShareState::NoFiles, 50);
    let surface = fx.screen.surface();
    let empty = surface.empty_state().expect("empty state");
    assert!(!empty.banner.body.is_empty());
    assert!(fx.screen.fab().is_some());
}
