//! Key handling for the TUI.
//!
//! This module owns the host-only interaction state (file selection, menu
//! cursor) and maps keys to screen events or host commands. Whether an
//! intent is acceptable is decided by the screen; the only gate applied
//! here is the sheet's gesture lock, which the host's gesture system owns.

use sharesheet_app::{Moment, NotificationResult, ScreenEvent, ShareScreen, SheetPhase};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Esc,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Page up: drag the sheet open.
    PageUp,
    /// Page down: drag the sheet closed.
    PageDown,
    /// Tab: drag the sheet to the other phase.
    Tab,
    /// Delete or Backspace.
    Delete,
    /// Ctrl-C.
    Interrupt,
}

/// What a key asks the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCommand {
    /// Forward to the screen.
    Screen(ScreenEvent),
    /// Drag the sheet to a phase.
    Drag(SheetPhase),
    /// End the visible notification.
    Resolve(NotificationResult),
    /// Host-only state changed; redraw.
    Redraw,
}

/// Selection and menu cursor.
#[derive(Debug, Default)]
pub struct InputState {
    selected: usize,
    menu_cursor: usize,
}

impl InputState {
    /// Create with the first file and first menu entry selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the highlighted file.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the highlighted menu entry.
    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    /// Handle a key press against the current screen.
    ///
    /// `notification_shown` tells whether a notification is on screen, so
    /// its keys can act on it.
    pub fn handle_key<I: Moment>(
        &mut self,
        key: KeyInput,
        screen: &ShareScreen<I>,
        notification_shown: bool,
    ) -> Vec<KeyCommand> {
        if matches!(key, KeyInput::Interrupt | KeyInput::Char('q')) {
            return vec![KeyCommand::Screen(ScreenEvent::Quit)];
        }
        if screen.menu_open() {
            return self.handle_menu_key(key, screen);
        }

        let files = screen.state().files();
        self.selected = self.selected.min(files.len().saturating_sub(1));

        match key {
            KeyInput::Char('m') => {
                self.menu_cursor = 0;
                vec![KeyCommand::Screen(ScreenEvent::MenuToggled)]
            },
            KeyInput::Char('a' | '+') => vec![KeyCommand::Screen(ScreenEvent::PrimaryActionPressed)],
            KeyInput::Char('s') | KeyInput::Enter => {
                vec![KeyCommand::Screen(ScreenEvent::SheetButtonPressed)]
            },
            KeyInput::Char('x') => vec![KeyCommand::Screen(ScreenEvent::RemoveAllPressed)],
            KeyInput::Char('d') | KeyInput::Delete => files
                .get(self.selected)
                .map(|file| vec![KeyCommand::Screen(ScreenEvent::FileRemovePressed(file.clone()))])
                .unwrap_or_default(),
            KeyInput::Up | KeyInput::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                vec![KeyCommand::Redraw]
            },
            KeyInput::Down | KeyInput::Char('j') => {
                self.selected = (self.selected + 1).min(files.len().saturating_sub(1));
                vec![KeyCommand::Redraw]
            },
            KeyInput::PageUp => drag(screen, SheetPhase::Expanded),
            KeyInput::PageDown => drag(screen, SheetPhase::Collapsed),
            KeyInput::Tab => {
                let target = match screen.sheet_phase() {
                    SheetPhase::Collapsed => SheetPhase::Expanded,
                    SheetPhase::Expanded => SheetPhase::Collapsed,
                };
                drag(screen, target)
            },
            KeyInput::Char('r') if notification_shown => {
                vec![KeyCommand::Resolve(NotificationResult::ActionPerformed)]
            },
            KeyInput::Esc if notification_shown => {
                vec![KeyCommand::Resolve(NotificationResult::Dismissed)]
            },
            _ => vec![],
        }
    }

    fn handle_menu_key<I: Moment>(&mut self, key: KeyInput, screen: &ShareScreen<I>) -> Vec<KeyCommand> {
        let items = screen.menu_items();
        match key {
            KeyInput::Up | KeyInput::Char('k') => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
                vec![KeyCommand::Redraw]
            },
            KeyInput::Down | KeyInput::Char('j') => {
                self.menu_cursor = (self.menu_cursor + 1).min(items.len().saturating_sub(1));
                vec![KeyCommand::Redraw]
            },
            KeyInput::Enter => items
                .get(self.menu_cursor)
                .map(|item| vec![KeyCommand::Screen(ScreenEvent::MenuSelected(item.route))])
                .unwrap_or_default(),
            KeyInput::Char('m') => vec![KeyCommand::Screen(ScreenEvent::MenuToggled)],
            KeyInput::Esc => vec![KeyCommand::Screen(ScreenEvent::MenuDismissed)],
            _ => vec![],
        }
    }
}

fn drag<I: Moment>(screen: &ShareScreen<I>, target: SheetPhase) -> Vec<KeyCommand> {
    if !screen.sheet_visible() || !screen.gestures_enabled() {
        tracing::debug!(?target, "sheet drag ignored, gestures locked");
        return vec![];
    }
    vec![KeyCommand::Drag(target)]
}
