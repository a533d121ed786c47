//! Screen input events.
//!
//! This module defines [`ScreenEvent`], the complete set of inputs that drive
//! the [`crate::ShareScreen`] state machine.
//!
//! Events originate from three sources:
//! - The state stream (new [`crate::StateSnapshot`]s).
//! - The host surface (ticks, sheet offset and settling, viewport changes).
//! - User interactions (buttons, menu, notification responses).

use crate::{FileEntry, NotificationResult, Px, Revision, Route, SheetPhase, StateSnapshot, Viewport};

/// Events processed by the screen state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// A new state was published.
    StateChanged(StateSnapshot),

    /// Periodic tick.
    Tick,

    /// The sheet's top edge moved.
    SheetOffset(Px),

    /// The sheet finished animating or being dragged.
    SheetSettled(SheetPhase),

    /// Screen size or density changed.
    ViewportChanged(Viewport),

    /// Primary action button pressed.
    PrimaryActionPressed,

    /// Remove control on a file row pressed.
    FileRemovePressed(FileEntry),

    /// Remove-all control pressed.
    RemoveAllPressed,

    /// The detail sheet's own button pressed.
    SheetButtonPressed,

    /// A notification ended.
    NotificationResolved {
        /// Revision of the error state it was shown for.
        key: Revision,
        /// How it ended.
        result: NotificationResult,
    },

    /// Overflow menu button pressed.
    MenuToggled,

    /// Tapped outside the open menu.
    MenuDismissed,

    /// Menu entry selected.
    MenuSelected(Route),

    /// Close the screen.
    Quit,
}
