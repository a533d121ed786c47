//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`sharesheet_app::Runtime`] orchestration code runs in both production
//! and simulation.
//!
//! Input comes from a script of [`Step`]s. The simulated host settles every
//! sheet animation immediately and can answer notifications automatically.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use sharesheet_app::{
    Dp, Driver, Notification, NotificationResult, Px, ScreenError, ScreenEvent, ShareScreen,
    ShareState, SheetPhase, Viewport,
};

use crate::{
    InvariantRegistry, ScreenSnapshot, ScreenTrace, SharedStream, SimClock, SimInstant,
    Violation, flow::lock_stream, invariants::describe,
};

/// Error type for simulation driver.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimDriverError {
    /// A scripted state was rejected by the stream.
    #[error("scripted state rejected: {0}")]
    Publish(#[from] ScreenError),

    /// A script publishes states but no stream was attached.
    #[error("script publishes states but no stream is attached")]
    NoStream,

    /// A rendered frame broke an invariant.
    #[error("invariant violated: {}", describe(.0))]
    Invariant(Vec<Violation>),
}

/// One scripted input.
#[derive(Debug, Clone)]
pub enum Step {
    /// Let virtual time pass.
    Advance(Duration),
    /// Deliver a host event.
    Event(ScreenEvent),
    /// Publish a state on the attached stream.
    Publish(ShareState),
}

/// Shared state for event injection and inspection.
#[derive(Default)]
struct SharedState {
    script: VecDeque<Step>,
    host_events: VecDeque<ScreenEvent>,
    trace: ScreenTrace,
    sheet_commands: Vec<(SimInstant, SheetPhase)>,
    notifications: Vec<(SimInstant, Notification)>,
    renders: usize,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`sharesheet_app::Runtime`]
/// orchestration code runs in both the terminal and simulation tests.
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    clock: SimClock,
    stream: Option<SharedStream>,
    invariants: Option<InvariantRegistry>,
    notification_response: Option<NotificationResult>,
    viewport: Viewport,
    peek_height: Dp,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new(SimClock::new())
    }
}

impl SimDriver {
    /// Create a driver reading time from `clock`.
    pub fn new(clock: SimClock) -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedState::default())),
            clock,
            stream: None,
            invariants: None,
            notification_response: None,
            viewport: Viewport::default(),
            peek_height: Dp(60.0),
        }
    }

    /// Publish [`Step::Publish`] states on `stream`.
    #[must_use]
    pub fn with_stream(mut self, stream: SharedStream) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Answer every notification with `result` as soon as it is shown.
    #[must_use]
    pub fn responding_to_notifications(mut self, result: NotificationResult) -> Self {
        self.notification_response = Some(result);
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append steps to the script.
    pub fn script(&self, steps: impl IntoIterator<Item = Step>) {
        self.lock().script.extend(steps);
    }

    /// Inject a host event for the next poll.
    pub fn inject_event(&self, event: ScreenEvent) {
        self.lock().host_events.push_back(event);
    }

    /// Check if there are pending steps or events.
    pub fn has_pending(&self) -> bool {
        let state = self.lock();
        !state.script.is_empty() || !state.host_events.is_empty()
    }

    /// Frames and notifications observed so far.
    pub fn trace(&self) -> ScreenTrace {
        self.lock().trace.clone()
    }

    /// Sheet animations requested, with the time they were requested.
    pub fn sheet_commands(&self) -> Vec<(SimInstant, SheetPhase)> {
        self.lock().sheet_commands.clone()
    }

    /// Notifications shown, with the time they were shown.
    pub fn notifications(&self) -> Vec<(SimInstant, Notification)> {
        self.lock().notifications.clone()
    }

    /// Number of renders.
    pub fn renders(&self) -> usize {
        self.lock().renders
    }

    /// Whether the runtime released the driver.
    pub fn stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Offset the host reports once the sheet rests in `phase`.
    fn resting_offset(&self, phase: SheetPhase) -> Px {
        let screen = self.viewport.to_px(self.viewport.height());
        match phase {
            SheetPhase::Expanded => Px(screen.0 / 2.0),
            SheetPhase::Collapsed => screen - self.viewport.to_px(self.peek_height),
        }
    }

    fn publish(&self, state: ShareState) -> Result<(), SimDriverError> {
        let stream = self.stream.as_ref().ok_or(SimDriverError::NoStream)?;
        lock_stream(stream).publish(state)?;
        Ok(())
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = SimInstant;

    async fn poll_event(
        &mut self,
        screen: &ShareScreen<SimInstant>,
    ) -> Result<Vec<ScreenEvent>, Self::Error> {
        let mut state = self.lock();

        // Host reactions to the previous cycle come first
        if !state.host_events.is_empty() {
            return Ok(state.host_events.drain(..).collect());
        }

        let mut events = Vec::new();
        // Inputs since the last advance happen now; time moves on next poll
        let mut acted = false;
        loop {
            match state.script.pop_front() {
                None => {
                    events.push(ScreenEvent::Quit);
                    break;
                },
                Some(Step::Event(event)) => {
                    events.push(event);
                    acted = true;
                },
                Some(Step::Publish(share_state)) => {
                    self.publish(share_state)?;
                    acted = true;
                },
                Some(Step::Advance(by)) if acted => {
                    state.script.push_front(Step::Advance(by));
                    break;
                },
                Some(Step::Advance(by)) => {
                    let target = self.clock.now() + by;
                    // Stop at the next deadline so effects fire on time
                    match screen.next_deadline() {
                        Some(due) if due > self.clock.now() && due < target => {
                            self.clock.advance_to(due);
                            state.script.push_front(Step::Advance(target - due));
                        },
                        _ => self.clock.advance_to(target),
                    }
                    break;
                },
            }
        }

        Ok(events)
    }

    fn now(&self) -> SimInstant {
        self.clock.now()
    }

    fn render(&mut self, screen: &ShareScreen<SimInstant>) -> Result<(), Self::Error> {
        let mut state = self.lock();
        state.renders += 1;
        state.trace.push_frame(ScreenSnapshot::capture(screen));

        if let Some(registry) = &self.invariants {
            registry.check_all(&state.trace).map_err(SimDriverError::Invariant)?;
        }
        Ok(())
    }

    fn animate_sheet(&mut self, target: SheetPhase) -> Result<(), Self::Error> {
        let now = self.clock.now();
        let offset = self.resting_offset(target);

        let mut state = self.lock();
        state.sheet_commands.push((now, target));
        state.host_events.push_back(ScreenEvent::SheetOffset(offset));
        state.host_events.push_back(ScreenEvent::SheetSettled(target));
        Ok(())
    }

    fn show_notification(&mut self, notification: Notification) -> Result<(), Self::Error> {
        let now = self.clock.now();
        let response = self.notification_response;

        let mut state = self.lock();
        state.trace.record_notification(notification.key);
        if let Some(result) = response {
            state
                .host_events
                .push_back(ScreenEvent::NotificationResolved { key: notification.key, result });
        }
        state.notifications.push((now, notification));
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
