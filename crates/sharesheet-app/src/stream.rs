//! Single-writer state stream.
//!
//! [`StateStream`] holds the current [`ShareState`] and fans every accepted
//! change out to subscribers in publish order. New subscribers receive the
//! current value first. Each subscriber owns an unbounded queue, so the
//! publisher never waits on a slow observer and no transition is skipped.

use tokio::sync::mpsc;

use crate::{Revision, ScreenError, ShareState, StateSnapshot};

/// Publishing side of the share state.
///
/// Owned by the orchestrator, the only writer.
#[derive(Debug)]
pub struct StateStream {
    current: StateSnapshot,
    subscribers: Vec<mpsc::UnboundedSender<StateSnapshot>>,
}

impl Default for StateStream {
    fn default() -> Self {
        Self {
            current: StateSnapshot::new(Revision::INITIAL.next(), ShareState::NoFiles),
            subscribers: Vec::new(),
        }
    }
}

impl StateStream {
    /// Create a stream holding `initial`.
    pub fn new(initial: ShareState) -> Result<Self, ScreenError> {
        initial.validate()?;
        Ok(Self { current: StateSnapshot::new(Revision::INITIAL.next(), initial), subscribers: Vec::new() })
    }

    /// Latest published snapshot.
    pub fn current(&self) -> &StateSnapshot {
        &self.current
    }

    /// Subscribe, receiving the current value immediately.
    pub fn subscribe(&mut self) -> StateSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        // Receiver is alive, send cannot fail
        let _ = tx.send(self.current.clone());
        self.subscribers.push(tx);
        StateSubscription { rx }
    }

    /// Replace the current state.
    ///
    /// Returns the new snapshot, or `None` if `state` equals the current
    /// payload (no new instance is created).
    pub fn publish(&mut self, state: ShareState) -> Result<Option<StateSnapshot>, ScreenError> {
        state.validate()?;

        if *self.current.state() == state {
            tracing::trace!(revision = %self.current.revision(), "identical state not republished");
            return Ok(None);
        }

        let snapshot = StateSnapshot::new(self.current.revision().next(), state);
        tracing::debug!(
            revision = %snapshot.revision(),
            from = ?self.current.state().kind(),
            to = ?snapshot.state().kind(),
            "share state published"
        );

        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        self.current = snapshot.clone();
        Ok(Some(snapshot))
    }

    /// Number of live subscribers (as of the last publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Observing side of the share state.
#[derive(Debug)]
pub struct StateSubscription {
    rx: mpsc::UnboundedReceiver<StateSnapshot>,
}

impl StateSubscription {
    /// Wait for the next snapshot. `None` once the stream is dropped and the
    /// queue is drained.
    pub async fn next(&mut self) -> Option<StateSnapshot> {
        self.rx.recv().await
    }

    /// Next queued snapshot without waiting.
    pub fn try_next(&mut self) -> Option<StateSnapshot> {
        self.rx.try_recv().ok()
    }

    /// All queued snapshots in publish order.
    pub fn drain(&mut self) -> Vec<StateSnapshot> {
        let mut snapshots = Vec::new();
        while let Ok(snapshot) = self.rx.try_recv() {
            snapshots.push(snapshot);
        }
        snapshots
    }

    /// Whether the publishing side has been dropped and nothing is queued.
    pub fn is_closed(&self) -> bool {
        self.rx.is_closed() && self.rx.is_empty()
    }
}
