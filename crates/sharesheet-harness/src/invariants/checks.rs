//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios. Frame checks
//! look at the latest frame; history checks look at the whole trace.

use std::collections::HashSet;

use sharesheet_app::{Route, SheetPhase, StateKind};

use super::{Invariant, InvariantKind, InvariantResult, ScreenSnapshot, ScreenTrace, Violation};

fn violation(kind: InvariantKind, frame: &ScreenSnapshot, message: String) -> Violation {
    Violation { invariant: kind, message: format!("{} {:?}: {message}", frame.revision, frame.kind) }
}

/// No files means no sheet.
///
/// In `NoFiles` the sheet is hidden and collapsed, so the action button
/// animates back to its resting color.
pub struct SheetHiddenWithoutFiles;

impl Invariant for SheetHiddenWithoutFiles {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SheetHiddenWithoutFiles
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        let Some(frame) = trace.latest() else { return Ok(()) };
        if frame.kind == StateKind::NoFiles
            && (frame.sheet_visible || frame.phase != SheetPhase::Collapsed)
        {
            return Err(violation(
                self.kind(),
                frame,
                format!("sheet visible={} phase={:?}", frame.sheet_visible, frame.phase),
            ));
        }
        Ok(())
    }
}

/// A sheet that may not be dismissed is open.
///
/// Whatever the host reports, a non-collapsable state ends every step with
/// the sheet expanded and gestures locked.
pub struct LockedSheetExpanded;

impl Invariant for LockedSheetExpanded {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LockedSheetExpanded
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        let Some(frame) = trace.latest() else { return Ok(()) };
        if frame.has_sheet() && !frame.collapsable && frame.phase != SheetPhase::Expanded {
            return Err(violation(self.kind(), frame, "locked sheet left collapsed".into()));
        }
        Ok(())
    }
}

/// The action button exists exactly when files may be modified.
pub struct FabMatchesCapability;

impl Invariant for FabMatchesCapability {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FabMatchesCapability
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        let Some(frame) = trace.latest() else { return Ok(()) };
        if frame.fab.is_some() != frame.allows_modifying {
            return Err(violation(
                self.kind(),
                frame,
                format!("fab={:?} allows_modifying={}", frame.fab, frame.allows_modifying),
            ));
        }
        Ok(())
    }
}

/// Drag gestures are enabled exactly when a dismissible sheet is shown.
pub struct GesturesMatchCapability;

impl Invariant for GesturesMatchCapability {
    fn kind(&self) -> InvariantKind {
        InvariantKind::GesturesMatchCapability
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        let Some(frame) = trace.latest() else { return Ok(()) };
        let expected = frame.has_sheet() && frame.collapsable;
        if frame.gestures_enabled != expected {
            return Err(violation(
                self.kind(),
                frame,
                format!("gestures_enabled={} expected {expected}", frame.gestures_enabled),
            ));
        }
        Ok(())
    }
}

/// The empty state is shown exactly in `NoFiles`.
pub struct SurfaceMatchesState;

impl Invariant for SurfaceMatchesState {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SurfaceMatchesState
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        let Some(frame) = trace.latest() else { return Ok(()) };
        if frame.surface_empty != (frame.kind == StateKind::NoFiles) {
            return Err(violation(
                self.kind(),
                frame,
                format!("surface_empty={}", frame.surface_empty),
            ));
        }
        Ok(())
    }
}

/// The settings entry is only offered with the debug flag.
pub struct SettingsGated;

impl Invariant for SettingsGated {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SettingsGated
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        let Some(frame) = trace.latest() else { return Ok(()) };
        if !frame.debug_menu && frame.menu_routes.contains(&Route::Settings) {
            return Err(violation(self.kind(), frame, "settings offered without debug flag".into()));
        }
        Ok(())
    }
}

/// Frames never go back to an older state.
pub struct RevisionMonotonicity;

impl Invariant for RevisionMonotonicity {
    fn kind(&self) -> InvariantKind {
        InvariantKind::RevisionMonotonicity
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        for window in trace.frames.windows(2) {
            if window[1].revision < window[0].revision {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "revision decreased {} → {}",
                        window[0].revision, window[1].revision
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Each error instance is announced at most once.
pub struct NotificationOncePerInstance;

impl Invariant for NotificationOncePerInstance {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NotificationOncePerInstance
    }

    fn check(&self, trace: &ScreenTrace) -> InvariantResult {
        let mut seen = HashSet::with_capacity(trace.notifications.len());
        for key in &trace.notifications {
            if !seen.insert(*key) {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!("notification {key} shown twice"),
                });
            }
        }
        Ok(())
    }
}
