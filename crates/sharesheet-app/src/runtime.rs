//! Generic runtime for screen orchestration.
//!
//! The Runtime drives the screen event loop, coordinating between:
//! - [`ShareScreen`]: presentation state machine
//! - [`Bridge`]: intent dispatch to the [`Orchestrator`]
//! - [`Driver`]: platform-specific I/O
//! - [`StateSubscription`]: states published by the orchestrator

use crate::{
    Bridge, Driver, Orchestrator, ScreenAction, ScreenConfig, ScreenEvent, ShareScreen,
    StateSubscription,
};

/// Generic runtime that orchestrates screen, bridge and driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `O`: Receiver of user intents
pub struct Runtime<D, O>
where
    D: Driver,
    O: Orchestrator,
{
    driver: D,
    screen: ShareScreen<D::Instant>,
    bridge: Bridge<O>,
    states: StateSubscription,
    /// A render was requested during the current cycle.
    dirty: bool,
}

impl<D, O> Runtime<D, O>
where
    D: Driver,
    O: Orchestrator,
{
    /// Create a runtime observing `states`.
    pub fn new(driver: D, orchestrator: O, states: StateSubscription, config: ScreenConfig) -> Self {
        Self {
            driver,
            screen: ShareScreen::new(config),
            bridge: Bridge::new(orchestrator),
            states,
            dirty: false,
        }
    }

    /// Run the main event loop.
    ///
    /// Each cycle:
    /// 1. Applies every queued state in publish order
    /// 2. Polls the driver for host input
    /// 3. Ticks the screen so due effects fire
    /// 4. Renders once if anything asked for it
    ///
    /// Ends on [`ScreenAction::Quit`] or when the state stream closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.screen)?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the screen should close.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if self.apply_states()? {
            return Ok(true);
        }
        if self.states.is_closed() {
            tracing::info!("state stream closed, stopping");
            return Ok(true);
        }

        let events = self.driver.poll_event(&self.screen).await?;
        for event in events {
            if self.handle(event)? {
                return Ok(true);
            }
            // intents may publish synchronously
            if self.apply_states()? {
                return Ok(true);
            }
        }
        // states published while the driver was polled
        if self.apply_states()? {
            return Ok(true);
        }

        if self.handle(ScreenEvent::Tick)? {
            return Ok(true);
        }

        if std::mem::take(&mut self.dirty) {
            self.driver.render(&self.screen)?;
        }
        Ok(false)
    }

    fn apply_states(&mut self) -> Result<bool, D::Error> {
        for snapshot in self.states.drain() {
            if self.handle(ScreenEvent::StateChanged(snapshot))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn handle(&mut self, event: ScreenEvent) -> Result<bool, D::Error> {
        let now = self.driver.now();
        let actions = self.screen.handle(event, now);
        self.process_actions(actions)
    }

    /// Execute actions returned by the screen.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<ScreenAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                ScreenAction::Render => self.dirty = true,
                ScreenAction::Quit => return Ok(true),
                ScreenAction::AnimateSheet(target) => self.driver.animate_sheet(target)?,
                ScreenAction::ShowNotification(notification) => {
                    self.driver.show_notification(notification)?;
                },

                // Intents go through the bridge
                ScreenAction::AddFiles
                | ScreenAction::RemoveFile { .. }
                | ScreenAction::RemoveAll
                | ScreenAction::SheetButton
                | ScreenAction::NotificationAction
                | ScreenAction::Navigate { .. } => {
                    self.bridge.dispatch(&action);
                },
            }
        }
        Ok(false)
    }

    /// Get a reference to the screen.
    pub fn screen(&self) -> &ShareScreen<D::Instant> {
        &self.screen
    }

    /// Get a reference to the bridge.
    pub fn bridge(&self) -> &Bridge<O> {
        &self.bridge
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
