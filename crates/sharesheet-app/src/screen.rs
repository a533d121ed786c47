//! Share screen state machine.
//!
//! This module defines [`ShareScreen`], which composes the sheet
//! coordinator, notification controller, action menu and offset translation
//! into one pure state machine: it consumes [`crate::ScreenEvent`] inputs and
//! produces [`crate::ScreenAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Holds the latest observed [`StateSnapshot`], ignoring replays.
//! - Forwards state changes and ticks to the timed components.
//! - Gates user intents on the current state's capabilities.
//! - Exposes everything a host needs to draw: sheet phase and visibility,
//!   gesture lock, action button, primary surface, bottom inset, menu.

use crate::{
    ActionMenu, Dp, Fab, MenuItem, Moment, NotificationController, PrimarySurface, Px,
    ScreenAction, ScreenConfig, ScreenEvent, ShareState, SheetCommand, SheetCoordinator,
    SheetPhase, StateSnapshot, Viewport, bottom_inset,
};

/// Share screen state machine.
///
/// Generic over the instant type so the same code runs with real time and
/// virtual time. No I/O dependencies.
///
/// A screen observes one [`crate::StateStream`] for its whole lifetime:
/// snapshots whose revision does not exceed the last one seen are replays
/// and are dropped. A replacement stream restarts at revision 1, so attach
/// it to a fresh screen.
#[derive(Debug, Clone)]
pub struct ShareScreen<I> {
    config: ScreenConfig,
    snapshot: StateSnapshot,
    sheet: SheetCoordinator<I>,
    notifications: NotificationController<I>,
    menu: ActionMenu,
    viewport: Viewport,
    /// Last reported sheet offset. `0` is fully open.
    sheet_offset: Px,
}

impl<I: Moment> ShareScreen<I> {
    /// Create a screen showing `NoFiles` until the first snapshot arrives.
    pub fn new(config: ScreenConfig) -> Self {
        Self {
            sheet: SheetCoordinator::new(config.reveal_delay()),
            notifications: NotificationController::new(config.strings.clone()),
            menu: ActionMenu::new(config.debug_menu),
            snapshot: StateSnapshot::initial(),
            viewport: Viewport::default(),
            sheet_offset: Px::default(),
            config,
        }
    }

    /// Process an event observed at `now` and return actions.
    pub fn handle(&mut self, event: ScreenEvent, now: I) -> Vec<ScreenAction> {
        match event {
            ScreenEvent::StateChanged(snapshot) => self.on_state(snapshot, now),
            ScreenEvent::Tick => {
                let commands = self.sheet.poll(now);
                if commands.is_empty() {
                    return vec![];
                }
                let mut actions = sheet_actions(commands);
                actions.push(ScreenAction::Render);
                actions
            },
            ScreenEvent::SheetOffset(offset) => {
                self.sheet_offset = offset;
                vec![ScreenAction::Render]
            },
            ScreenEvent::SheetSettled(phase) => {
                let mut actions = sheet_actions(self.sheet.on_settled(phase, now));
                actions.push(ScreenAction::Render);
                actions
            },
            ScreenEvent::ViewportChanged(viewport) => {
                self.viewport = viewport;
                vec![ScreenAction::Render]
            },
            ScreenEvent::PrimaryActionPressed => {
                if self.fab().is_none() {
                    tracing::debug!(state = ?self.state().kind(), "add files ignored, button hidden");
                    return vec![];
                }
                vec![ScreenAction::AddFiles]
            },
            ScreenEvent::FileRemovePressed(file) => {
                let state = self.state();
                if !state.allows_modifying_files() || !state.files().contains(&file) {
                    tracing::debug!(file = %file.name, state = ?state.kind(), "remove ignored");
                    return vec![];
                }
                vec![ScreenAction::RemoveFile { file }]
            },
            ScreenEvent::RemoveAllPressed => {
                let state = self.state();
                if !state.allows_modifying_files() || state.files().is_empty() {
                    tracing::debug!(state = ?state.kind(), "remove all ignored");
                    return vec![];
                }
                vec![ScreenAction::RemoveAll]
            },
            ScreenEvent::SheetButtonPressed => {
                if !self.sheet.visible() {
                    return vec![];
                }
                vec![ScreenAction::SheetButton]
            },
            ScreenEvent::NotificationResolved { key, result } => {
                if self.notifications.resolve(key, result) {
                    vec![ScreenAction::NotificationAction]
                } else {
                    vec![]
                }
            },
            ScreenEvent::MenuToggled => {
                self.menu.toggle();
                vec![ScreenAction::Render]
            },
            ScreenEvent::MenuDismissed => {
                self.menu.dismiss();
                vec![ScreenAction::Render]
            },
            ScreenEvent::MenuSelected(route) => match self.menu.select(route) {
                Some(route) => vec![ScreenAction::Navigate { route }, ScreenAction::Render],
                None => {
                    tracing::warn!(?route, "menu entry not offered");
                    vec![ScreenAction::Render]
                },
            },
            ScreenEvent::Quit => vec![ScreenAction::Quit],
        }
    }

    fn on_state(&mut self, snapshot: StateSnapshot, now: I) -> Vec<ScreenAction> {
        if snapshot.revision() <= self.snapshot.revision() {
            tracing::trace!(revision = %snapshot.revision(), "stale snapshot ignored");
            return vec![];
        }

        let mut actions = sheet_actions(self.sheet.on_state(&snapshot, now));
        if let Some(notification) = self.notifications.on_state(&snapshot, now) {
            actions.push(ScreenAction::ShowNotification(notification));
        }
        if snapshot.state().is_no_files() {
            self.sheet_offset = Px::default();
        }

        self.snapshot = snapshot;
        actions.push(ScreenAction::Render);
        actions
    }

    /// Current state.
    pub fn state(&self) -> &ShareState {
        self.snapshot.state()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    /// Configuration in use.
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Top bar title.
    pub fn title(&self) -> &str {
        &self.config.strings.app_name
    }

    /// Sheet phase.
    pub fn sheet_phase(&self) -> SheetPhase {
        self.sheet.phase()
    }

    /// Whether the detail sheet is shown.
    pub fn sheet_visible(&self) -> bool {
        self.sheet.visible()
    }

    /// Whether the host should let the user drag the sheet.
    pub fn gestures_enabled(&self) -> bool {
        self.sheet.gestures_enabled()
    }

    /// Whether the entrance reveal is waiting for its delay.
    pub fn reveal_pending(&self) -> bool {
        self.sheet.reveal_pending()
    }

    /// Primary action button. `None` when the state forbids modifying files.
    pub fn fab(&self) -> Option<Fab> {
        self.state().allows_modifying_files().then(|| Fab::for_phase(self.sheet.phase()))
    }

    /// Space covered by the sheet, recomputed from the current viewport.
    pub fn bottom_inset(&self) -> Dp {
        bottom_inset(self.sheet_offset, &self.viewport)
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Primary content area.
    pub fn surface(&self) -> PrimarySurface {
        PrimarySurface::render(&self.snapshot, self.bottom_inset(), &self.config.strings)
    }

    /// Whether the overflow menu is open.
    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Overflow menu entries.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.menu.items(&self.config.strings)
    }

    /// Notifications awaiting a response.
    pub fn outstanding_notifications(&self) -> usize {
        self.notifications.outstanding()
    }

    /// Earliest instant at which a [`ScreenEvent::Tick`] has work to do.
    pub fn next_deadline(&self) -> Option<I> {
        self.sheet.next_deadline()
    }
}

fn sheet_actions(commands: Vec<SheetCommand>) -> Vec<ScreenAction> {
    commands.into_iter().map(|c| ScreenAction::AnimateSheet(c.target())).collect()
}
