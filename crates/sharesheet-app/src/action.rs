//! Screen side-effects and intents.
//!
//! This module defines the [`ScreenAction`] enum, which represents
//! instructions produced by the [`crate::ShareScreen`] state machine for the
//! runtime to execute: host commands (render, animate, notify) and intents
//! for the orchestrator.

use crate::{FileEntry, Notification, Route, SheetPhase};

/// Actions produced by the screen state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Render the screen.
    Render,

    /// Quit the application.
    Quit,

    /// Animate the detail sheet to a phase.
    AnimateSheet(SheetPhase),

    /// Show a transient notification.
    ShowNotification(Notification),

    /// User asked to add files.
    AddFiles,

    /// User asked to remove one staged file.
    RemoveFile {
        /// File to remove.
        file: FileEntry,
    },

    /// User asked to clear all staged files.
    RemoveAll,

    /// User pressed the detail sheet's button (start or stop sharing).
    SheetButton,

    /// User activated the error notification's action.
    NotificationAction,

    /// User picked a menu destination.
    Navigate {
        /// Destination.
        route: Route,
    },
}

impl ScreenAction {
    /// Whether this action is an intent for the orchestrator.
    pub fn is_intent(&self) -> bool {
        match self {
            Self::AddFiles
            | Self::RemoveFile { .. }
            | Self::RemoveAll
            | Self::SheetButton
            | Self::NotificationAction
            | Self::Navigate { .. } => true,
            Self::Render | Self::Quit | Self::AnimateSheet(_) | Self::ShowNotification(_) => false,
        }
    }
}
