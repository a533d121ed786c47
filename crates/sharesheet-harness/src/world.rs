//! Synchronous simulation world.
//!
//! [`SimWorld`] wires a [`ShareScreen`] to a [`ShareFlow`] and a simulated
//! host without any async runtime, applies one [`Operation`] at a time, and
//! checks the standard invariants after every step. Randomized tests drive
//! it with generated operation sequences.

use std::{collections::VecDeque, time::Duration};

use sharesheet_app::{
    Bridge, Dp, FileEntry, Notification, Px, ScreenAction, ScreenConfig, ScreenEvent, ShareScreen,
    SheetPhase, StateSubscription, Viewport,
};

use crate::{
    InvariantRegistry, Operation, ScreenSnapshot, ScreenTrace, ShareFlow, SimClock, SimInstant,
    Violation,
};

/// Screen, workflow and host stepped together on virtual time.
pub struct SimWorld {
    clock: SimClock,
    screen: ShareScreen<SimInstant>,
    bridge: Bridge<ShareFlow>,
    states: StateSubscription,
    /// Host events not yet delivered.
    host: VecDeque<ScreenEvent>,
    /// Notifications shown and not yet answered, oldest first.
    shown: VecDeque<Notification>,
    sheet_commands: Vec<(SimInstant, SheetPhase)>,
    trace: ScreenTrace,
    registry: InvariantRegistry,
}

impl SimWorld {
    /// World with the default configuration and `flow` as orchestrator.
    pub fn new(flow: ShareFlow) -> Self {
        Self::with_config(flow, ScreenConfig::default())
    }

    /// World with an explicit configuration.
    pub fn with_config(flow: ShareFlow, config: ScreenConfig) -> Self {
        let states = flow.subscribe();
        let mut world = Self {
            clock: SimClock::new(),
            screen: ShareScreen::new(config),
            bridge: Bridge::new(flow),
            states,
            host: VecDeque::new(),
            shown: VecDeque::new(),
            sheet_commands: Vec::new(),
            trace: ScreenTrace::new(),
            registry: InvariantRegistry::standard(),
        };
        world.settle();
        world
    }

    /// Apply one operation and check invariants.
    pub fn apply(&mut self, op: &Operation) -> Result<(), Vec<Violation>> {
        tracing::trace!(?op, now = ?self.clock.now(), "apply");

        match op {
            Operation::Wait { ms } => self.wait(Duration::from_millis(u64::from(*ms))),
            Operation::AddFiles => self.deliver(ScreenEvent::PrimaryActionPressed),
            Operation::RemoveFile { index } => {
                let files = self.screen.state().files();
                if let Some(file) = pick(files, *index).cloned() {
                    self.deliver(ScreenEvent::FileRemovePressed(file));
                }
            },
            Operation::RemoveAll => self.deliver(ScreenEvent::RemoveAllPressed),
            Operation::SheetButton => self.deliver(ScreenEvent::SheetButtonPressed),
            Operation::Drag { expand } => {
                // The host's gesture system honors the lock
                if self.screen.gestures_enabled() {
                    let phase = if *expand { SheetPhase::Expanded } else { SheetPhase::Collapsed };
                    self.deliver(ScreenEvent::SheetSettled(phase));
                }
            },
            Operation::HostCollapse => self.deliver(ScreenEvent::SheetSettled(SheetPhase::Collapsed)),
            Operation::Resolve { result } => {
                if let Some(notification) = self.shown.pop_front() {
                    self.deliver(ScreenEvent::NotificationResolved {
                        key: notification.key,
                        result: *result,
                    });
                }
            },
            Operation::ToggleMenu => self.deliver(ScreenEvent::MenuToggled),
            Operation::SelectMenu { route } => self.deliver(ScreenEvent::MenuSelected(*route)),
            Operation::Rotate { height_dp } => {
                if let Ok(viewport) = Viewport::new(Dp(f32::from(*height_dp)), 2.0) {
                    self.deliver(ScreenEvent::ViewportChanged(viewport));
                }
            },
            Operation::FlowAdvance => {
                self.bridge.orchestrator_mut().advance();
                self.settle();
            },
            Operation::FlowFail => {
                self.bridge.orchestrator_mut().fail_start(Some("tor failed to start".into()));
                self.settle();
            },
        }

        self.check()
    }

    /// Apply every operation, stopping at the first violation.
    pub fn run(&mut self, ops: &[Operation]) -> Result<(), Vec<Violation>> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Screen under test.
    pub fn screen(&self) -> &ShareScreen<SimInstant> {
        &self.screen
    }

    /// Workflow under test.
    pub fn flow(&self) -> &ShareFlow {
        self.bridge.orchestrator()
    }

    /// Observed frames and notifications.
    pub fn trace(&self) -> &ScreenTrace {
        &self.trace
    }

    /// Sheet animations requested so far.
    pub fn sheet_commands(&self) -> &[(SimInstant, SheetPhase)] {
        &self.sheet_commands
    }

    /// Current virtual time.
    pub fn now(&self) -> SimInstant {
        self.clock.now()
    }

    /// Let `by` pass, ticking at every deadline on the way.
    fn wait(&mut self, by: Duration) {
        let target = self.clock.now() + by;
        while let Some(due) = self.screen.next_deadline().filter(|due| *due <= target) {
            self.clock.advance_to(due);
            self.deliver(ScreenEvent::Tick);
        }
        self.clock.advance_to(target);
        self.deliver(ScreenEvent::Tick);
    }

    /// Deliver `event`, then everything it causes.
    fn deliver(&mut self, event: ScreenEvent) {
        self.host.push_back(event);
        self.settle();
    }

    /// Run until no host event or published state is pending.
    fn settle(&mut self) {
        loop {
            let event = match self.states.try_next() {
                Some(snapshot) => ScreenEvent::StateChanged(snapshot),
                None => match self.host.pop_front() {
                    Some(event) => event,
                    None => break,
                },
            };

            let now = self.clock.now();
            for action in self.screen.handle(event, now) {
                self.execute(action, now);
            }
        }
    }

    fn execute(&mut self, action: ScreenAction, now: SimInstant) {
        match action {
            ScreenAction::Render => self.trace.push_frame(ScreenSnapshot::capture(&self.screen)),
            ScreenAction::AnimateSheet(target) => {
                self.sheet_commands.push((now, target));
                let offset = match target {
                    SheetPhase::Expanded => Px(0.0),
                    SheetPhase::Collapsed => {
                        let viewport = self.screen.viewport();
                        viewport.to_px(viewport.height())
                            - viewport.to_px(Dp(self.screen.config().sheet.peek_height_dp))
                    },
                };
                self.host.push_back(ScreenEvent::SheetOffset(offset));
                self.host.push_back(ScreenEvent::SheetSettled(target));
            },
            ScreenAction::ShowNotification(notification) => {
                self.trace.record_notification(notification.key);
                self.shown.push_back(notification);
            },
            ScreenAction::Quit => {},
            intent => {
                self.bridge.dispatch(&intent);
            },
        }
    }

    fn check(&mut self) -> Result<(), Vec<Violation>> {
        self.trace.push_frame(ScreenSnapshot::capture(&self.screen));
        self.registry.check_all(&self.trace)
    }
}

fn pick(files: &[FileEntry], index: u8) -> Option<&FileEntry> {
    if files.is_empty() {
        return None;
    }
    files.get(usize::from(index) % files.len())
}
