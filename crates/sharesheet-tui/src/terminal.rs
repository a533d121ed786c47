//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The driver is the host side of
//! the screen: it owns the sheet's gestures and animation, the notification
//! queue and the viewport, and reports what happened to them as
//! [`ScreenEvent`]s.

use std::{
    io::{self, Stdout, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use sharesheet_app::{
    Driver, Notification, ScreenError, ScreenEvent, ShareScreen, SheetLayout, SheetPhase,
};
use thiserror::Error;

use crate::{
    InputState, KeyCommand, KeyInput, NotificationQueue, SheetGeometry, SheetMotion,
    ui::{self, HostView},
};

/// Idle poll interval.
const TICK: Duration = Duration::from_millis(100);

/// Poll interval while the sheet is animating.
const FRAME: Duration = Duration::from_millis(16);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        /// File that was read.
        path: String,
        /// Underlying error.
        source: io::Error,
    },

    /// Configuration file is not valid TOML for the screen config.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration or viewport rejected by the screen.
    #[error(transparent)]
    Screen(#[from] ScreenError),
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

/// Terminal driver implementing the [`Driver`] trait.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    input: InputState,
    layout: SheetLayout,
    geometry: SheetGeometry,
    motion: SheetMotion,
    notifications: NotificationQueue,
    /// Events produced outside a poll, delivered by the next one.
    pending: Vec<ScreenEvent>,
    /// Whether the sheet was visible at the last poll.
    sheet_shown: bool,
    redraw: bool,
    stopped: bool,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new(layout: SheetLayout) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let geometry = SheetGeometry::new(terminal.size()?.height, &layout);

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            input: InputState::new(),
            layout,
            motion: SheetMotion::new(&geometry),
            pending: vec![ScreenEvent::ViewportChanged(geometry.viewport()?)],
            geometry,
            notifications: NotificationQueue::new(),
            sheet_shown: false,
            redraw: false,
            stopped: false,
        })
    }

    /// Convert a crossterm key event to [`KeyInput`].
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(KeyInput::Interrupt);
        }
        match key.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::PageUp => Some(KeyInput::PageUp),
            KeyCode::PageDown => Some(KeyInput::PageDown),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Delete | KeyCode::Backspace => Some(KeyInput::Delete),
            _ => None,
        }
    }

    fn poll_timeout(&self, screen: &ShareScreen<Instant>, now: Instant) -> Duration {
        let mut timeout = if self.motion.is_animating() { FRAME } else { TICK };
        if let Some(deadline) = screen.next_deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }
        if let Some(remaining) = self.notifications.remaining(now) {
            timeout = timeout.min(remaining);
        }
        timeout
    }

    fn apply(&mut self, commands: Vec<KeyCommand>, now: Instant, events: &mut Vec<ScreenEvent>) {
        for command in commands {
            match command {
                KeyCommand::Screen(event) => events.push(event),
                KeyCommand::Drag(target) => self.motion.animate(target, now),
                KeyCommand::Resolve(result) => {
                    events.extend(self.notifications.resolve(result, now));
                    self.redraw = true;
                },
                KeyCommand::Redraw => self.redraw = true,
            }
        }
    }

    fn resize(&mut self, rows: u16, events: &mut Vec<ScreenEvent>) -> Result<(), TerminalError> {
        self.geometry = SheetGeometry::new(rows, &self.layout);
        events.push(ScreenEvent::ViewportChanged(self.geometry.viewport()?));
        if let Some(offset) = self.motion.relayout(&self.geometry)
            && self.sheet_shown
        {
            events.push(ScreenEvent::SheetOffset(offset));
        }
        Ok(())
    }

    /// Advance host-owned surfaces: notification timeout and sheet motion.
    fn step(&mut self, screen: &ShareScreen<Instant>, now: Instant, events: &mut Vec<ScreenEvent>) {
        if let Some(expired) = self.notifications.expire(now) {
            events.push(expired);
            self.redraw = true;
        }

        let visible = screen.sheet_visible();
        if visible && !self.sheet_shown {
            events.push(ScreenEvent::SheetOffset(self.motion.position()));
        }
        self.sheet_shown = visible;

        if !visible {
            // nothing to animate, report where the sheet ended up
            events.extend(self.motion.finish(&self.geometry).map(ScreenEvent::SheetSettled));
            return;
        }

        let (offset, settled) = self.motion.step(&self.geometry, now);
        events.extend(offset.map(ScreenEvent::SheetOffset));
        events.extend(settled.map(ScreenEvent::SheetSettled));
    }

    fn draw(&mut self, screen: &ShareScreen<Instant>) -> Result<(), TerminalError> {
        let view = HostView {
            selected: self.input.selected(),
            menu_cursor: self.input.menu_cursor(),
            notification: self.notifications.current(),
            queued_notifications: self.notifications.len().saturating_sub(1),
        };
        self.terminal.draw(|frame| ui::render(frame, screen, &view))?;
        self.redraw = false;
        Ok(())
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(&mut self, screen: &ShareScreen<Instant>) -> Result<Vec<ScreenEvent>, Self::Error> {
        let mut events = std::mem::take(&mut self.pending);

        if events.is_empty() {
            let timeout = self.poll_timeout(screen, Instant::now());

            tokio::select! {
                biased;

                // Terminal events
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                            if let Some(key) = Self::convert_key(key_event) {
                                let shown = self.notifications.current().is_some();
                                let commands = self.input.handle_key(key, screen, shown);
                                self.apply(commands, Instant::now(), &mut events);
                            }
                        },
                        Some(Ok(Event::Resize(_, rows))) => self.resize(rows, &mut events)?,
                        Some(Ok(_)) => {},
                        Some(Err(e)) => return Err(TerminalError::Io(e)),
                        None => {
                            tracing::info!("terminal input closed");
                            events.push(ScreenEvent::Quit);
                        },
                    }
                }

                // Tick timeout
                () = tokio::time::sleep(timeout) => {}
            }
        }

        self.step(screen, Instant::now(), &mut events);
        if self.redraw {
            self.draw(screen)?;
        }
        Ok(events)
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn render(&mut self, screen: &ShareScreen<Instant>) -> Result<(), Self::Error> {
        self.draw(screen)
    }

    fn animate_sheet(&mut self, target: SheetPhase) -> Result<(), Self::Error> {
        self.motion.animate(target, Instant::now());
        Ok(())
    }

    fn show_notification(&mut self, notification: Notification) -> Result<(), Self::Error> {
        self.notifications.push(notification, Instant::now());
        self.redraw = true;
        Ok(())
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            restore_terminal();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(TerminalDriver::convert_key(key), Some(KeyInput::Interrupt));

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(TerminalDriver::convert_key(key), Some(KeyInput::Char('c')));
    }

    #[test]
    fn backspace_deletes() {
        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(TerminalDriver::convert_key(key), Some(KeyInput::Delete));
        assert_eq!(TerminalDriver::convert_key(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)), None);
    }
}
