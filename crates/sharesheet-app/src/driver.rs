//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the screen runtime from specific hosts.
//! Each frontend implements the trait to provide input, drawing and
//! animation, while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{Moment, Notification, ScreenEvent, ShareScreen, SheetPhase};

/// Abstracts host operations for the screen runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal and in simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm for input, ratatui for drawing, real time
/// - **Simulation**: scripted input and virtual time
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Moment;

    /// Wait for host input.
    ///
    /// Implementations should return no later than
    /// [`ShareScreen::next_deadline`] so delayed effects fire on time. An
    /// empty vector means nothing happened.
    fn poll_event(
        &mut self,
        screen: &ShareScreen<Self::Instant>,
    ) -> impl Future<Output = Result<Vec<ScreenEvent>, Self::Error>> + Send;

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Draw the screen.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn render(&mut self, screen: &ShareScreen<Self::Instant>) -> Result<(), Self::Error>;

    /// Start animating the detail sheet towards `target`.
    ///
    /// The host reports progress with [`ScreenEvent::SheetOffset`] and the
    /// end with [`ScreenEvent::SheetSettled`].
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot animate.
    fn animate_sheet(&mut self, target: SheetPhase) -> Result<(), Self::Error>;

    /// Queue a notification. The host reports how it ended with
    /// [`ScreenEvent::NotificationResolved`].
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot display it.
    fn show_notification(&mut self, notification: Notification) -> Result<(), Self::Error>;

    /// Release host resources.
    fn stop(&mut self);
}
