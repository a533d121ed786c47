//! End-to-end tests running the generic Runtime on virtual time.
//!
//! # Test Strategy
//!
//! Each test scripts what the host and the user do, runs the real
//! `Runtime` with a `SimDriver` and a `ShareFlow`, and checks the standard
//! invariants on every rendered frame.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - Sheet animations happen at the expected virtual times
//! - Notifications and intents reach the right side
//! - The driver is released when the script ends

use std::time::Duration;

use sharesheet_app::{
    FileEntry, NotificationResult, Runtime, ScreenConfig, ScreenEvent, ShareState, SheetPhase,
    StateKind,
};
use sharesheet_harness::{
    Intent, InvariantRegistry, ShareFlow, SimClock, SimDriver, SimInstant, Step,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn runtime(flow: ShareFlow, driver: SimDriver) -> Runtime<SimDriver, ShareFlow> {
    let states = flow.subscribe();
    Runtime::new(driver, flow, states, ScreenConfig::default())
}

#[tokio::test]
async fn reveal_fires_after_delay() {
    let clock = SimClock::new();
    let flow = ShareFlow::new(ShareFlow::sample_pool(2));
    let driver = SimDriver::new(clock.clone())
        .with_stream(flow.stream())
        .with_invariants(InvariantRegistry::standard());
    driver.script([
        Step::Advance(ms(100)),
        Step::Event(ScreenEvent::PrimaryActionPressed),
        Step::Advance(ms(2000)),
    ]);

    let mut runtime = runtime(flow, driver);
    runtime.run().await.expect("run");

    // Oracle
    let commands = runtime.driver().sheet_commands();
    assert_eq!(commands, vec![(SimInstant::from_millis(850), SheetPhase::Expanded)]);
    assert_eq!(runtime.screen().sheet_phase(), SheetPhase::Expanded);
    assert_eq!(runtime.bridge().orchestrator().intents(), &[Intent::AddFiles]);
    assert!(runtime.driver().stopped());
}

#[tokio::test]
async fn quick_clear_never_expands() {
    let flow = ShareFlow::new(ShareFlow::sample_pool(1));
    let driver = SimDriver::default()
        .with_stream(flow.stream())
        .with_invariants(InvariantRegistry::standard());
    driver.script([
        Step::Event(ScreenEvent::PrimaryActionPressed),
        Step::Advance(ms(400)),
        Step::Event(ScreenEvent::RemoveAllPressed),
        Step::Advance(ms(3000)),
    ]);

    let mut runtime = runtime(flow, driver);
    runtime.run().await.expect("run");

    // Oracle
    let expands = runtime
        .driver()
        .sheet_commands()
        .into_iter()
        .filter(|(_, phase)| *phase == SheetPhase::Expanded)
        .count();
    assert_eq!(expands, 0);
    assert_eq!(runtime.screen().state().kind(), StateKind::NoFiles);
}

#[tokio::test]
async fn notification_action_restarts_share() {
    let pool = vec![
        FileEntry::from_bytes("notes.txt", 300, "sim://notes"),
        FileEntry::from_bytes("locked.db", 9000, "sim://locked").with_error("permission denied"),
    ];
    let flow = ShareFlow::new(pool);
    let driver = SimDriver::default()
        .with_stream(flow.stream())
        .with_invariants(InvariantRegistry::standard())
        .responding_to_notifications(NotificationResult::ActionPerformed);
    driver.script([
        Step::Event(ScreenEvent::PrimaryActionPressed),
        Step::Advance(ms(1000)),
        Step::Event(ScreenEvent::PrimaryActionPressed),
        Step::Advance(ms(1000)),
    ]);

    let mut runtime = runtime(flow, driver);
    runtime.run().await.expect("run");

    // Oracle
    let shown = runtime.driver().notifications();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].1.message.contains("locked.db"));
    assert!(shown[0].1.action_label.is_some());

    let flow = runtime.bridge().orchestrator();
    assert_eq!(flow.intents().last(), Some(&Intent::NotificationAction));
    assert_eq!(flow.state().kind(), StateKind::Starting);
    assert_eq!(runtime.screen().sheet_phase(), SheetPhase::Expanded);
    assert!(runtime.screen().fab().is_none());
}

#[tokio::test]
async fn scripted_states_drive_the_sheet() {
    let flow = ShareFlow::new(Vec::new());
    let files = vec![FileEntry::from_bytes("a.png", 10, "sim://a")];
    let driver = SimDriver::default()
        .with_stream(flow.stream())
        .with_invariants(InvariantRegistry::standard());
    driver.script([
        Step::Publish(ShareState::Sharing { files: files.clone(), address: "x.onion".into() }),
        Step::Advance(ms(10)),
        Step::Event(ScreenEvent::SheetSettled(SheetPhase::Collapsed)),
        Step::Advance(ms(10)),
        Step::Publish(ShareState::Complete { files }),
        Step::Advance(ms(10)),
    ]);

    let mut runtime = runtime(flow, driver);
    runtime.run().await.expect("run");

    // Oracle
    let phases: Vec<_> = runtime.driver().sheet_commands().into_iter().map(|(_, p)| p).collect();
    assert_eq!(phases, vec![SheetPhase::Expanded, SheetPhase::Expanded]);
    assert!(runtime.screen().gestures_enabled());
    assert!(runtime.driver().renders() > 0);
}

#[tokio::test]
async fn invalid_scripted_state_is_an_error() {
    let flow = ShareFlow::new(Vec::new());
    let driver = SimDriver::default().with_stream(flow.stream());
    driver.script([Step::Publish(ShareState::FilesAdded { files: Vec::new() })]);

    let mut runtime = runtime(flow, driver);
    assert!(runtime.run().await.is_err());
}
