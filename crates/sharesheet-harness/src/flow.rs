//! Scripted share workflow.
//!
//! [`ShareFlow`] is a small model of the sending side of a file share: it
//! owns the [`StateStream`], stages files from a fixed pool, brings the
//! share up and down, and publishes a new state for every intent it
//! receives. It stands in for the real orchestrator in simulation.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sharesheet_app::{
    FileEntry, Orchestrator, Route, ScreenError, ShareState, StateStream, StateSubscription,
};

/// State stream shared between the workflow and the simulated host.
pub type SharedStream = Arc<Mutex<StateStream>>;

/// Lock the shared stream. Poisoning is ignored: the stream holds no
/// partially updated data.
pub fn lock_stream(stream: &SharedStream) -> MutexGuard<'_, StateStream> {
    stream.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Intent received by [`ShareFlow`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add files pressed.
    AddFiles,
    /// Remove one file.
    Remove(String),
    /// Clear all files.
    RemoveAll,
    /// Sheet button pressed.
    SheetButton,
    /// Notification action activated.
    NotificationAction,
    /// Menu navigation.
    Navigate(Route),
}

/// Model of the share workflow.
#[derive(Debug)]
pub struct ShareFlow {
    stream: SharedStream,
    pool: Vec<FileEntry>,
    next: usize,
    intents: Vec<Intent>,
    address: String,
}

impl ShareFlow {
    /// Create a flow in `NoFiles` that stages entries of `pool` in order.
    ///
    /// Pool entries carrying an error marker fail to be added.
    pub fn new(pool: Vec<FileEntry>) -> Self {
        Self {
            stream: Arc::new(Mutex::new(StateStream::default())),
            pool,
            next: 0,
            intents: Vec::new(),
            address: "sim7rv3lq4x2a5dd.onion".into(),
        }
    }

    /// Pool of `n` addable files named `file-0`, `file-1`, ...
    pub fn sample_pool(n: usize) -> Vec<FileEntry> {
        (0..n)
            .map(|i| {
                FileEntry::from_bytes(format!("file-{i}"), 1024 * (i as u64 + 1), format!("sim://{i}"))
            })
            .collect()
    }

    /// Shared handle to the stream.
    pub fn stream(&self) -> SharedStream {
        Arc::clone(&self.stream)
    }

    /// Subscribe to published states.
    pub fn subscribe(&self) -> StateSubscription {
        lock_stream(&self.stream).subscribe()
    }

    /// Current state.
    pub fn state(&self) -> ShareState {
        lock_stream(&self.stream).current().state().clone()
    }

    /// Intents received so far.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Publish `state` directly.
    pub fn publish(&self, state: ShareState) -> Result<(), ScreenError> {
        lock_stream(&self.stream).publish(state).map(|_| ())
    }

    /// Move a running share one step forward:
    /// `Starting` → `Sharing` → `Complete`.
    pub fn advance(&mut self) {
        let next = match self.state() {
            ShareState::Starting { files, .. } => {
                ShareState::Sharing { files, address: self.address.clone() }
            },
            ShareState::Sharing { files, .. } => ShareState::Complete { files },
            _ => return,
        };
        self.apply(next);
    }

    /// Fail a share that is starting.
    pub fn fail_start(&mut self, message: Option<String>) {
        if let ShareState::Starting { files, .. } = self.state() {
            self.apply(ShareState::ErrorStarting { files, message });
        }
    }

    fn apply(&self, state: ShareState) {
        if let Err(error) = self.publish(state) {
            tracing::warn!(%error, "flow produced an invalid state");
        }
    }

    fn staged(&self) -> Vec<FileEntry> {
        self.state().files().to_vec()
    }

    fn after_removal(files: Vec<FileEntry>) -> ShareState {
        if files.is_empty() { ShareState::NoFiles } else { ShareState::FilesAdded { files } }
    }

    /// Start sharing, or stop a running share.
    fn toggle_share(&mut self) {
        let next = match self.state() {
            ShareState::FilesAdded { files }
            | ShareState::ErrorAddingFile { files, .. }
            | ShareState::ErrorStarting { files, .. }
            | ShareState::Complete { files }
                if !files.is_empty() =>
            {
                ShareState::Starting { files, progress_percent: 0 }
            },
            ShareState::Starting { files, .. } | ShareState::Sharing { files, .. } => {
                ShareState::FilesAdded { files }
            },
            _ => return,
        };
        self.apply(next);
    }
}

impl Orchestrator for ShareFlow {
    fn on_primary_action(&mut self) {
        self.intents.push(Intent::AddFiles);
        if self.pool.is_empty() {
            return;
        }

        let candidate = self.pool[self.next % self.pool.len()].clone();
        self.next += 1;

        let mut files = self.staged();
        if files.iter().any(|f| f.source == candidate.source) {
            return;
        }

        if candidate.error.is_some() {
            self.apply(ShareState::ErrorAddingFile { files, error_file: Some(candidate) });
        } else {
            files.push(candidate);
            self.apply(ShareState::FilesAdded { files });
        }
    }

    fn on_file_remove(&mut self, file: &FileEntry) {
        self.intents.push(Intent::Remove(file.name.clone()));
        let mut files = self.staged();
        files.retain(|f| f.source != file.source);
        self.apply(Self::after_removal(files));
    }

    fn on_remove_all(&mut self) {
        self.intents.push(Intent::RemoveAll);
        self.apply(ShareState::NoFiles);
    }

    fn on_notification_action(&mut self) {
        // the error's action retries the share with what is staged
        self.intents.push(Intent::NotificationAction);
        self.toggle_share();
    }

    fn on_sheet_button(&mut self) {
        self.intents.push(Intent::SheetButton);
        self.toggle_share();
    }

    fn navigate_to(&mut self, route: Route) {
        self.intents.push(Intent::Navigate(route));
    }
}
