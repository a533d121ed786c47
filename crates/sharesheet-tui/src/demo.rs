//! Demo share workflow.
//!
//! [`DemoOrchestrator`] plays the role of the real file-sharing service so
//! the terminal screen has something to present. It stages files from a
//! fixed catalog, fakes the share coming up with a background task, and
//! occasionally fails, so every state the screen knows about can be seen.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use rand::Rng;
use sharesheet_app::{FileEntry, Orchestrator, Route, ShareState, StateStream, StateSubscription};
use tokio::task::JoinHandle;

/// Pause between start-up progress updates.
const PROGRESS_STEP: Duration = Duration::from_millis(400);

/// Time a recipient takes to download everything.
const DOWNLOAD: Duration = Duration::from_secs(6);

const ONION_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Stream plus the generation of the share session allowed to publish.
#[derive(Debug, Default)]
struct Shared {
    stream: StateStream,
    session: u64,
}

impl Shared {
    fn publish(&mut self, state: ShareState) {
        if let Err(error) = self.stream.publish(state) {
            tracing::warn!(%error, "demo produced an invalid state");
        }
    }

    /// End the current session; its task can no longer publish.
    fn next_session(&mut self) -> u64 {
        self.session += 1;
        self.session
    }
}

type SharedStream = Arc<Mutex<Shared>>;

fn lock(shared: &SharedStream) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(shared: &SharedStream, state: ShareState) {
    lock(shared).publish(state);
}

/// Publish on behalf of share session `session`.
///
/// Returns `false` without publishing once the session was stopped or
/// replaced. The check and the publish happen under one lock, so a task
/// that missed its abort cannot resurrect a stopped share.
fn publish_session(shared: &SharedStream, session: u64, state: ShareState) -> bool {
    let mut guard = lock(shared);
    if guard.session != session {
        tracing::debug!(session, current = guard.session, "stale share session, update dropped");
        return false;
    }
    guard.publish(state);
    true
}

/// Random v3-style onion address.
fn onion_address(rng: &mut impl Rng) -> String {
    let host: String = (0..56)
        .map(|_| char::from(ONION_ALPHABET[rng.random_range(0..ONION_ALPHABET.len())]))
        .collect();
    format!("http://{host}.onion")
}

/// Orchestrator behind the terminal demo.
#[derive(Debug)]
pub struct DemoOrchestrator {
    stream: SharedStream,
    catalog: Vec<FileEntry>,
    next: usize,
    start_failure_rate: f64,
    task: Option<JoinHandle<()>>,
    last_route: Option<Route>,
}

impl Default for DemoOrchestrator {
    fn default() -> Self {
        Self::new(Self::sample_catalog(), 0.2)
    }
}

impl DemoOrchestrator {
    /// Stage files from `catalog` in order; a start fails with probability
    /// `start_failure_rate`.
    pub fn new(catalog: Vec<FileEntry>, start_failure_rate: f64) -> Self {
        Self {
            stream: Arc::new(Mutex::new(Shared::default())),
            catalog,
            next: 0,
            start_failure_rate: start_failure_rate.clamp(0.0, 1.0),
            task: None,
            last_route: None,
        }
    }

    /// A handful of files, one of which cannot be read.
    pub fn sample_catalog() -> Vec<FileEntry> {
        vec![
            FileEntry::from_bytes("holiday.jpg", 2_340_112, "demo://photos/holiday.jpg"),
            FileEntry::from_bytes("notes.md", 4_210, "demo://docs/notes.md"),
            FileEntry::from_bytes("keys.kdbx", 88_001, "demo://vault/keys.kdbx")
                .with_error("permission denied"),
            FileEntry::from_bytes("report.pdf", 742_600, "demo://docs/report.pdf"),
            FileEntry::from_bytes("song.flac", 31_877_120, "demo://music/song.flac"),
        ]
    }

    /// Subscribe to the published states.
    pub fn subscribe(&self) -> StateSubscription {
        lock(&self.stream).stream.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> ShareState {
        lock(&self.stream).stream.current().state().clone()
    }

    /// Last destination asked for through the menu.
    pub fn last_route(&self) -> Option<Route> {
        self.last_route
    }

    fn staged(&self) -> Vec<FileEntry> {
        self.state().files().to_vec()
    }

    fn start(&mut self, files: Vec<FileEntry>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime, share not started");
            return;
        };

        let mut rng = rand::rng();
        let fails = rng.random_bool(self.start_failure_rate);
        let address = onion_address(&mut rng);
        let stream = Arc::clone(&self.stream);

        let session = {
            let mut shared = lock(&stream);
            let session = shared.next_session();
            shared.publish(ShareState::Starting { files: files.clone(), progress_percent: 0 });
            session
        };
        tracing::info!(session, files = files.len(), fails, "share starting");

        let task = runtime.spawn(async move {
            for progress_percent in (20..=100).step_by(20) {
                tokio::time::sleep(PROGRESS_STEP).await;
                let state = ShareState::Starting { files: files.clone(), progress_percent };
                if !publish_session(&stream, session, state) {
                    return;
                }
            }

            if fails {
                let message = Some("could not connect to the network".to_string());
                publish_session(&stream, session, ShareState::ErrorStarting { files, message });
                return;
            }

            let state = ShareState::Sharing { files: files.clone(), address };
            if !publish_session(&stream, session, state) {
                return;
            }
            tokio::time::sleep(DOWNLOAD).await;
            publish_session(&stream, session, ShareState::Complete { files });
        });
        if let Some(previous) = self.task.replace(task) {
            previous.abort();
        }
    }

    fn stop(&mut self, files: Vec<FileEntry>) {
        {
            let mut shared = lock(&self.stream);
            let session = shared.next_session();
            shared.publish(ShareState::FilesAdded { files });
            tracing::info!(session, "share stopped");
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn toggle_share(&mut self) {
        match self.state() {
            ShareState::FilesAdded { files }
            | ShareState::ErrorAddingFile { files, .. }
            | ShareState::ErrorStarting { files, .. }
            | ShareState::Complete { files }
                if !files.is_empty() =>
            {
                self.start(files);
            },
            ShareState::Starting { files, .. } | ShareState::Sharing { files, .. } => self.stop(files),
            ShareState::NoFiles
            | ShareState::FilesAdded { .. }
            | ShareState::ErrorAddingFile { .. }
            | ShareState::ErrorStarting { .. }
            | ShareState::Complete { .. } => {},
        }
    }
}

impl Orchestrator for DemoOrchestrator {
    fn on_primary_action(&mut self) {
        let mut files = self.staged();
        let Some(candidate) = (0..self.catalog.len())
            .map(|i| &self.catalog[(self.next + i) % self.catalog.len()])
            .find(|entry| !files.iter().any(|f| f.source == entry.source))
            .cloned()
        else {
            tracing::debug!("catalog exhausted");
            return;
        };
        self.next += 1;

        if candidate.error.is_some() {
            tracing::info!(file = %candidate.name, "file could not be added");
            publish(&self.stream, ShareState::ErrorAddingFile { files, error_file: Some(candidate) });
        } else {
            files.push(candidate);
            publish(&self.stream, ShareState::FilesAdded { files });
        }
    }

    fn on_file_remove(&mut self, file: &FileEntry) {
        let mut files = self.staged();
        files.retain(|f| f.source != file.source);
        let next = if files.is_empty() { ShareState::NoFiles } else { ShareState::FilesAdded { files } };
        publish(&self.stream, next);
    }

    fn on_remove_all(&mut self) {
        publish(&self.stream, ShareState::NoFiles);
    }

    fn on_notification_action(&mut self) {
        self.toggle_share();
    }

    fn on_sheet_button(&mut self) {
        self.toggle_share();
    }

    fn navigate_to(&mut self, route: Route) {
        tracing::info!(?route, "navigation requested");
        self.last_route = Some(route);
    }
}

impl Drop for DemoOrchestrator {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
