//! Detail sheet coordination.
//!
//! [`SheetCoordinator`] decides when the detail sheet expands or collapses as
//! a function of [`crate::ShareState`] transitions. It never handles drags:
//! the host's gesture system owns them, guided by the read-only
//! [`gestures_enabled`](SheetCoordinator::gestures_enabled) flag, and reports
//! where the sheet settled.
//!
//! # Timing
//!
//! - Entering `NoFiles` forces the sheet collapsed and abandons any pending
//!   reveal.
//! - Opening a session (first non-`NoFiles` state) schedules the reveal: the
//!   sheet expands after the reveal delay, keyed by the revision that opened
//!   the session. Later states in the same session keep that key, so the
//!   reveal is neither restarted nor duplicated.
//! - A non-collapsable state found collapsed is corrected to expanded,
//!   keyed by the state revision.

use std::time::Duration;

use crate::{EffectScheduler, Moment, Revision, StateSnapshot};

/// Phase of the detail sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetPhase {
    /// Only the peek strip is visible.
    #[default]
    Collapsed,
    /// Fully open.
    Expanded,
}

/// Animation command for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetCommand {
    /// Animate the sheet open.
    Expand,
    /// Animate the sheet to its peek height.
    Collapse,
}

impl SheetCommand {
    /// Phase the sheet ends in.
    pub fn target(self) -> SheetPhase {
        match self {
            Self::Expand => SheetPhase::Expanded,
            Self::Collapse => SheetPhase::Collapsed,
        }
    }
}

/// Emphasis color of the primary action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabColor {
    /// Sheet collapsed.
    Primary,
    /// Sheet expanded.
    Accent,
}

/// Primary action button ("add files").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fab {
    /// Background color, derived from the sheet phase only.
    pub color: FabColor,
}

impl Fab {
    /// Button for the given sheet phase.
    pub fn for_phase(phase: SheetPhase) -> Self {
        let color = match phase {
            SheetPhase::Collapsed => FabColor::Primary,
            SheetPhase::Expanded => FabColor::Accent,
        };
        Self { color }
    }
}

/// Expand/collapse state machine for the detail sheet.
#[derive(Debug, Clone)]
pub struct SheetCoordinator<I> {
    phase: SheetPhase,
    /// Current state has a sheet (non-`NoFiles`).
    session_open: bool,
    /// Current state permits dismissal.
    collapsable: bool,
    reveal_delay: Duration,
    /// Keyed by the revision that opened the session.
    reveal: EffectScheduler<Revision, I>,
    /// Keyed by the revision that found the sheet collapsed.
    correction: EffectScheduler<Revision, I>,
    revision: Revision,
}

impl<I: Moment> SheetCoordinator<I> {
    /// Create a collapsed coordinator with no session.
    pub fn new(reveal_delay: Duration) -> Self {
        Self {
            phase: SheetPhase::Collapsed,
            session_open: false,
            collapsable: false,
            reveal_delay,
            reveal: EffectScheduler::new(),
            correction: EffectScheduler::new(),
            revision: Revision::INITIAL,
        }
    }

    /// React to a newly observed state.
    pub fn on_state(&mut self, snapshot: &StateSnapshot, now: I) -> Vec<SheetCommand> {
        let state = snapshot.state();
        self.revision = snapshot.revision();
        self.collapsable = state.collapsable();

        if !state.has_sheet() {
            let was_open = std::mem::replace(&mut self.session_open, false);
            if let Some(key) = self.reveal.cancel() {
                tracing::debug!(%key, "session closed before reveal, expand abandoned");
            }
            self.correction.cancel();

            if was_open || self.phase != SheetPhase::Collapsed {
                return self.command(SheetCommand::Collapse);
            }
            return Vec::new();
        }

        if !self.session_open {
            self.session_open = true;
            self.reveal.launch(snapshot.revision(), now, self.reveal_delay);
            tracing::debug!(revision = %snapshot.revision(), delay = ?self.reveal_delay, "reveal scheduled");
        }

        self.check_collapsed(now);
        self.poll(now)
    }

    /// Track where the host's sheet settled after an animation or drag.
    ///
    /// Reports arriving while no sheet is shown (a late end of an animation
    /// started before the session closed) are ignored.
    pub fn on_settled(&mut self, phase: SheetPhase, now: I) -> Vec<SheetCommand> {
        if !self.session_open {
            tracing::trace!(?phase, "settle report without sheet ignored");
            return Vec::new();
        }
        if phase == self.phase {
            return Vec::new();
        }
        self.phase = phase;

        if phase == SheetPhase::Collapsed && !self.collapsable {
            tracing::warn!(revision = %self.revision, "sheet collapsed while locked, correcting");
            self.correction.rearm();
        }

        self.check_collapsed(now);
        self.poll(now)
    }

    /// Fire due effects.
    pub fn poll(&mut self, now: I) -> Vec<SheetCommand> {
        let mut commands = Vec::new();

        if self.correction.poll(now).is_some()
            && self.session_open
            && !self.collapsable
            && self.phase == SheetPhase::Collapsed
        {
            commands.extend(self.command(SheetCommand::Expand));
        }

        if let Some(key) = self.reveal.poll(now)
            && self.phase == SheetPhase::Collapsed
        {
            tracing::debug!(%key, "reveal delay elapsed");
            commands.extend(self.command(SheetCommand::Expand));
        }

        commands
    }

    /// Current (commanded or reported) phase.
    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Whether the host should let the user drag the sheet.
    pub fn gestures_enabled(&self) -> bool {
        self.session_open && self.collapsable
    }

    /// Whether the sheet is shown at all.
    pub fn visible(&self) -> bool {
        self.session_open
    }

    /// Whether the entrance reveal is waiting for its delay.
    pub fn reveal_pending(&self) -> bool {
        self.reveal.is_pending()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<I> {
        match (self.reveal.deadline(), self.correction.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Correction pass: a locked sheet must not stay collapsed.
    fn check_collapsed(&mut self, now: I) {
        if !self.collapsable && self.phase == SheetPhase::Collapsed {
            self.correction.launch(self.revision, now, Duration::ZERO);
        } else {
            self.correction.cancel();
        }
    }

    fn command(&mut self, command: SheetCommand) -> Vec<SheetCommand> {
        self.phase = command.target();
        tracing::debug!(?command, revision = %self.revision, "sheet command");
        vec![command]
    }
}
