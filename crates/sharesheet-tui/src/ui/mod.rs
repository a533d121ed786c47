//! UI rendering
//!
//! Rendering functions that convert screen state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.
//!
//! The body is split between the primary surface and the detail sheet. The
//! sheet covers exactly the screen's bottom inset, so the surface shrinks as
//! the sheet is dragged or animated.

mod overlay;
mod sheet;
mod surface;
mod top_bar;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use sharesheet_app::{Moment, Notification, ShareScreen};

use crate::rows_for;

/// Terminal cells for a count, saturating.
fn cols(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Host-owned state the screen does not know about.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostView<'a> {
    /// Highlighted file.
    pub selected: usize,
    /// Highlighted menu entry.
    pub menu_cursor: usize,
    /// Notification on screen.
    pub notification: Option<&'a Notification>,
    /// Notifications waiting behind it.
    pub queued_notifications: usize,
}

/// Render the entire UI.
pub fn render<I: Moment>(frame: &mut Frame, screen: &ShareScreen<I>, view: &HostView<'_>) {
    const TOP_BAR_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TOP_BAR_HEIGHT), Constraint::Min(0)])
        .split(frame.area());

    let [top_area, body] = chunks.as_ref() else {
        return;
    };

    top_bar::render(frame, screen, *top_area);

    let sheet_rows = if screen.sheet_visible() {
        rows_for(screen.bottom_inset()).min(body.height)
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(sheet_rows)])
        .split(*body);

    let [content_area, sheet_area] = chunks.as_ref() else {
        return;
    };

    surface::render(frame, screen, view, *content_area);
    if sheet_rows > 0 {
        sheet::render(frame, screen, *sheet_area);
    }

    let fab_row = overlay::render_notification(frame, view, *content_area);
    overlay::render_fab(frame, screen, fab_row);

    if screen.menu_open() {
        overlay::render_menu(frame, screen, view, *body);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{Terminal, backend::TestBackend};
    use sharesheet_app::{
        FileEntry, NotificationResult, Revision, ScreenAction, ScreenConfig, ScreenEvent,
        ShareState, SheetPhase, StateSnapshot,
    };

    use super::*;
    use crate::SheetGeometry;

    const WIDTH: u16 = 60;
    const HEIGHT: u16 = 24;

    struct Fixture {
        screen: ShareScreen<Instant>,
        revision: u64,
        shown: Vec<Notification>,
    }

    impl Fixture {
        fn new(config: ScreenConfig) -> Self {
            let mut screen = ShareScreen::new(config);
            let geometry = SheetGeometry::new(HEIGHT, &screen.config().sheet);
            let viewport = geometry.viewport().expect("viewport");
            screen.handle(ScreenEvent::ViewportChanged(viewport), Instant::now());
            Self { screen, revision: 1, shown: Vec::new() }
        }

        fn publish(&mut self, state: ShareState) {
            self.revision += 1;
            let snapshot = StateSnapshot::new(Revision::new(self.revision), state);
            let actions = self.screen.handle(ScreenEvent::StateChanged(snapshot), Instant::now());
            for action in actions {
                if let ScreenAction::ShowNotification(n) = action {
                    self.shown.push(n);
                }
            }
        }

        fn settle(&mut self, phase: SheetPhase) {
            let geometry = SheetGeometry::new(HEIGHT, &self.screen.config().sheet);
            let now = Instant::now();
            self.screen.handle(ScreenEvent::SheetOffset(geometry.offset_for(phase)), now);
            self.screen.handle(ScreenEvent::SheetSettled(phase), now);
        }

        fn draw(&self, view: &HostView<'_>) -> String {
            let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("terminal");
            terminal.draw(|frame| render(frame, &self.screen, view)).expect("draw");

            let buffer = terminal.backend().buffer();
            let mut text = String::new();
            for y in 0..buffer.area.height {
                for x in 0..buffer.area.width {
                    text.push_str(buffer[(x, y)].symbol());
                }
                text.push('\n');
            }
            text
        }
    }

    fn files() -> Vec<FileEntry> {
        vec![
            FileEntry::from_bytes("holiday.jpg", 2_340_112, "demo://holiday"),
            FileEntry::from_bytes("notes.md", 4_210, "demo://notes"),
        ]
    }

    #[test]
    fn empty_state_shows_banner_and_button() {
        let fx = Fixture::new(ScreenConfig::default());
        let text = fx.draw(&HostView::default());

        assert!(text.contains("OnionShare"));
        assert!(text.contains("Warning:"));
        assert!(text.contains("Add files"));
        assert!(!text.contains("Ready to share"));
    }

    #[test]
    fn staged_files_are_listed_above_the_sheet() {
        let mut fx = Fixture::new(ScreenConfig::default());
        fx.publish(ShareState::FilesAdded { files: files() });
        fx.settle(SheetPhase::Collapsed);
        let text = fx.draw(&HostView::default());

        assert!(text.contains("holiday.jpg"));
        assert!(text.contains("notes.md"));
        assert!(text.contains("Ready to share"));
        assert!(text.contains("Start sharing"));
        assert!(!text.contains("Warning:"));
    }

    #[test]
    fn sharing_hides_add_button_and_shows_address() {
        let mut fx = Fixture::new(ScreenConfig::default());
        fx.publish(ShareState::Sharing { files: files(), address: "abc.onion".into() });
        fx.settle(SheetPhase::Expanded);
        let text = fx.draw(&HostView::default());

        assert!(text.contains("abc.onion"));
        assert!(text.contains("Stop sharing"));
        assert!(!text.contains("Add files"));
    }

    #[test]
    fn menu_hides_settings_without_debug() {
        let mut fx = Fixture::new(ScreenConfig::default());
        fx.screen.handle(ScreenEvent::MenuToggled, Instant::now());
        let text = fx.draw(&HostView::default());
        assert!(text.contains("About"));
        assert!(!text.contains("Settings"));

        let mut debug = Fixture::new(ScreenConfig { debug_menu: true, ..ScreenConfig::default() });
        debug.screen.handle(ScreenEvent::MenuToggled, Instant::now());
        assert!(debug.draw(&HostView::default()).contains("Settings"));
    }

    #[test]
    fn notification_shows_message_and_action() {
        let mut fx = Fixture::new(ScreenConfig::default());
        fx.publish(ShareState::ErrorAddingFile {
            files: files(),
            error_file: Some(FileEntry::from_bytes("keys.kdbx", 10, "demo://keys")),
        });
        assert_eq!(fx.shown.len(), 1);

        let view = HostView { notification: fx.shown.first(), ..HostView::default() };
        let text = fx.draw(&view);
        assert!(text.contains("Could not add keys.kdbx"));
        assert!(text.contains("Retry"));

        let key = fx.shown[0].key;
        let actions = fx.screen.handle(
            ScreenEvent::NotificationResolved { key, result: NotificationResult::ActionPerformed },
            Instant::now(),
        );
        assert_eq!(actions, vec![ScreenAction::NotificationAction]);
    }

    #[test]
    fn cell_counts_saturate() {
        assert_eq!(cols(0), 0);
        assert_eq!(cols(42), 42);
        assert_eq!(cols(usize::from(u16::MAX) + 1), u16::MAX);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut fx = Fixture::new(ScreenConfig::default());
        fx.publish(ShareState::Starting { files: files(), progress_percent: 40 });
        fx.screen.handle(ScreenEvent::MenuToggled, Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(8, 3)).expect("terminal");
        terminal.draw(|frame| render(frame, &fx.screen, &HostView::default())).expect("draw");
    }
}
