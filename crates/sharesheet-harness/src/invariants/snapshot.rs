//! Observable screen snapshots for invariant checking.
//!
//! Snapshots capture what a user could see at a point in time. Invariants
//! operate on snapshots rather than the live screen so every check sees one
//! consistent frame.

use sharesheet_app::{
    Dp, Fab, Moment, Revision, Route, ShareScreen, SheetPhase, StateKind,
};

/// One rendered frame of the share screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSnapshot {
    /// Revision of the state on screen.
    pub revision: Revision,
    /// Variant on screen.
    pub kind: StateKind,
    /// Number of staged files.
    pub file_count: usize,
    /// Capability: files may be added or removed.
    pub allows_modifying: bool,
    /// Capability: the sheet may be dismissed.
    pub collapsable: bool,
    /// Sheet phase.
    pub phase: SheetPhase,
    /// Whether the sheet is shown at all.
    pub sheet_visible: bool,
    /// Whether the host lets the user drag the sheet.
    pub gestures_enabled: bool,
    /// Whether the entrance reveal is still waiting.
    pub reveal_pending: bool,
    /// Primary action button.
    pub fab: Option<Fab>,
    /// Whether the primary surface is the empty state.
    pub surface_empty: bool,
    /// Space reserved for the sheet.
    pub bottom_inset: Dp,
    /// Whether the overflow menu is open.
    pub menu_open: bool,
    /// Menu entries in display order.
    pub menu_routes: Vec<Route>,
    /// Whether the settings entry may be offered.
    pub debug_menu: bool,
}

impl ScreenSnapshot {
    /// Capture the current frame of `screen`.
    pub fn capture<I: Moment>(screen: &ShareScreen<I>) -> Self {
        let state = screen.state();
        Self {
            revision: screen.snapshot().revision(),
            kind: state.kind(),
            file_count: state.files().len(),
            allows_modifying: state.allows_modifying_files(),
            collapsable: state.collapsable(),
            phase: screen.sheet_phase(),
            sheet_visible: screen.sheet_visible(),
            gestures_enabled: screen.gestures_enabled(),
            reveal_pending: screen.reveal_pending(),
            fab: screen.fab(),
            surface_empty: screen.surface().is_empty(),
            bottom_inset: screen.bottom_inset(),
            menu_open: screen.menu_open(),
            menu_routes: screen.menu_items().into_iter().map(|item| item.route).collect(),
            debug_menu: screen.config().debug_menu,
        }
    }

    /// Whether the state has a detail sheet.
    pub fn has_sheet(&self) -> bool {
        self.kind != StateKind::NoFiles
    }
}

/// Frames and notifications observed over a run.
#[derive(Debug, Clone, Default)]
pub struct ScreenTrace {
    /// Rendered frames in order.
    pub frames: Vec<ScreenSnapshot>,
    /// Keys of every notification shown, in order.
    pub notifications: Vec<Revision>,
}

impl ScreenTrace {
    /// Empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace holding a single frame.
    pub fn single(frame: ScreenSnapshot) -> Self {
        Self { frames: vec![frame], notifications: Vec::new() }
    }

    /// Append a frame.
    pub fn push_frame(&mut self, frame: ScreenSnapshot) {
        self.frames.push(frame);
    }

    /// Record a shown notification.
    pub fn record_notification(&mut self, key: Revision) {
        self.notifications.push(key);
    }

    /// Most recent frame.
    pub fn latest(&self) -> Option<&ScreenSnapshot> {
        self.frames.last()
    }
}
