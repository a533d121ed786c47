//! Screen-to-orchestrator translation layer.
//!
//! The [`Bridge`] wraps the application's [`Orchestrator`] and forwards the
//! intent subset of [`crate::ScreenAction`] to it. The screen never learns
//! what an intent does: the orchestrator reacts by publishing new states.
//!
//! # Responsibilities
//!
//! - Routes each intent to exactly one orchestrator callback.
//! - Ignores host commands, which belong to the driver.
//! - Counts dispatched intents for diagnostics.

use crate::{FileEntry, Route, ScreenAction};

/// Receiver of user intents.
///
/// Implemented by whatever owns the sharing workflow. Callbacks are
/// fire-and-forget; outcomes come back as published states.
pub trait Orchestrator: Send {
    /// Add files pressed.
    fn on_primary_action(&mut self);

    /// Remove one staged file.
    fn on_file_remove(&mut self, file: &FileEntry);

    /// Clear all staged files.
    fn on_remove_all(&mut self);

    /// The error notification's action was activated.
    fn on_notification_action(&mut self);

    /// The detail sheet's button was pressed.
    fn on_sheet_button(&mut self);

    /// Navigate to a menu destination.
    fn navigate_to(&mut self, route: Route);
}

/// Bridge between the screen and its orchestrator.
#[derive(Debug)]
pub struct Bridge<O> {
    orchestrator: O,
    dispatched: u64,
}

impl<O: Orchestrator> Bridge<O> {
    /// Wrap `orchestrator`.
    pub fn new(orchestrator: O) -> Self {
        Self { orchestrator, dispatched: 0 }
    }

    /// Forward `action` if it is an intent.
    ///
    /// Returns `true` if the orchestrator was called.
    pub fn dispatch(&mut self, action: &ScreenAction) -> bool {
        match action {
            ScreenAction::AddFiles => self.orchestrator.on_primary_action(),
            ScreenAction::RemoveFile { file } => self.orchestrator.on_file_remove(file),
            ScreenAction::RemoveAll => self.orchestrator.on_remove_all(),
            ScreenAction::SheetButton => self.orchestrator.on_sheet_button(),
            ScreenAction::NotificationAction => self.orchestrator.on_notification_action(),
            ScreenAction::Navigate { route } => self.orchestrator.navigate_to(*route),
            ScreenAction::Render
            | ScreenAction::Quit
            | ScreenAction::AnimateSheet(_)
            | ScreenAction::ShowNotification(_) => return false,
        }

        self.dispatched += 1;
        tracing::debug!(?action, dispatched = self.dispatched, "intent dispatched");
        true
    }

    /// Number of intents forwarded so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Wrapped orchestrator.
    pub fn orchestrator(&self) -> &O {
        &self.orchestrator
    }

    /// Wrapped orchestrator, mutably.
    pub fn orchestrator_mut(&mut self) -> &mut O {
        &mut self.orchestrator
    }
}
