//! Observable share state.
//!
//! This module defines [`ShareState`], the value the external orchestrator
//! publishes, and [`StateSnapshot`], the identity-carrying wrapper every
//! component observes.
//!
//! A snapshot's [`Revision`] is its instance identity: two snapshots with equal
//! payloads but different revisions are different occurrences, which is what
//! one-shot effects key on.

use std::{collections::HashSet, fmt, sync::Arc};

use crate::ScreenError;

/// A file staged for sharing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// File name shown to the user.
    pub name: String,
    /// Pre-formatted size (e.g. `"23 KiB"`).
    pub display_size: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Opaque handle to the underlying resource, e.g. a URI. Identity of the
    /// entry.
    pub source: String,
    /// Failure marker. `None` if the file is healthy.
    pub error: Option<String>,
}

impl FileEntry {
    /// Create an entry with an already formatted size.
    pub fn new(
        name: impl Into<String>,
        display_size: impl Into<String>,
        size_bytes: u64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_size: display_size.into(),
            size_bytes,
            source: source.into(),
            error: None,
        }
    }

    /// Create an entry, formatting the size in IEC units.
    pub fn from_bytes(name: impl Into<String>, size_bytes: u64, source: impl Into<String>) -> Self {
        Self::new(name, format_size(size_bytes), size_bytes, source)
    }

    /// Attach a failure marker.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Format a byte count the way file managers do (`B`, `KiB`, `MiB`, `GiB`).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 { format!("{value:.1} {}", UNITS[unit]) } else { format!("{value:.0} {}", UNITS[unit]) }
}

/// Lifecycle of a share session.
///
/// Created and replaced exclusively by the orchestrator. Every consumer
/// matches exhaustively so a new variant is a compile error at each site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShareState {
    /// No files staged.
    #[default]
    NoFiles,

    /// One or more files staged, none erroring.
    FilesAdded {
        /// Staged files in insertion order.
        files: Vec<FileEntry>,
    },

    /// An attempt to add a file failed.
    ErrorAddingFile {
        /// Files staged before or alongside the failure.
        files: Vec<FileEntry>,
        /// The offending file. `None` if unknown. Need not be in `files`.
        error_file: Option<FileEntry>,
    },

    /// The share is being brought up.
    Starting {
        /// Files about to be shared.
        files: Vec<FileEntry>,
        /// Start-up progress, 0 to 100.
        progress_percent: u8,
    },

    /// Files are being served.
    Sharing {
        /// Shared files.
        files: Vec<FileEntry>,
        /// Address recipients use to download.
        address: String,
    },

    /// The recipient finished downloading.
    Complete {
        /// Files that were shared.
        files: Vec<FileEntry>,
    },

    /// Bringing the share up failed.
    ErrorStarting {
        /// Files that were about to be shared.
        files: Vec<FileEntry>,
        /// Failure description. `None` if unknown.
        message: Option<String>,
    },
}

/// Fieldless discriminant of [`ShareState`], for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// See [`ShareState::NoFiles`].
    NoFiles,
    /// See [`ShareState::FilesAdded`].
    FilesAdded,
    /// See [`ShareState::ErrorAddingFile`].
    ErrorAddingFile,
    /// See [`ShareState::Starting`].
    Starting,
    /// See [`ShareState::Sharing`].
    Sharing,
    /// See [`ShareState::Complete`].
    Complete,
    /// See [`ShareState::ErrorStarting`].
    ErrorStarting,
}

impl ShareState {
    /// Variant discriminant.
    pub fn kind(&self) -> StateKind {
        match self {
            Self::NoFiles => StateKind::NoFiles,
            Self::FilesAdded { .. } => StateKind::FilesAdded,
            Self::ErrorAddingFile { .. } => StateKind::ErrorAddingFile,
            Self::Starting { .. } => StateKind::Starting,
            Self::Sharing { .. } => StateKind::Sharing,
            Self::Complete { .. } => StateKind::Complete,
            Self::ErrorStarting { .. } => StateKind::ErrorStarting,
        }
    }

    /// Staged files. Empty for [`ShareState::NoFiles`].
    pub fn files(&self) -> &[FileEntry] {
        match self {
            Self::NoFiles => &[],
            Self::FilesAdded { files }
            | Self::ErrorAddingFile { files, .. }
            | Self::Starting { files, .. }
            | Self::Sharing { files, .. }
            | Self::Complete { files }
            | Self::ErrorStarting { files, .. } => files,
        }
    }

    /// Sum of staged file sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.files().iter().map(|f| f.size_bytes).fold(0, u64::saturating_add)
    }

    /// Whether this is the idle [`ShareState::NoFiles`] variant.
    pub fn is_no_files(&self) -> bool {
        matches!(self, Self::NoFiles)
    }

    /// Whether the detail sheet exists in this state.
    pub fn has_sheet(&self) -> bool {
        !self.is_no_files()
    }

    /// Whether the user may dismiss the detail sheet.
    ///
    /// `NoFiles` has no sheet and reports `false`.
    pub fn collapsable(&self) -> bool {
        match self {
            Self::NoFiles | Self::Starting { .. } | Self::Sharing { .. } => false,
            Self::FilesAdded { .. }
            | Self::ErrorAddingFile { .. }
            | Self::Complete { .. }
            | Self::ErrorStarting { .. } => true,
        }
    }

    /// Whether adding or removing files is currently valid.
    pub fn allows_modifying_files(&self) -> bool {
        match self {
            Self::Starting { .. } | Self::Sharing { .. } => false,
            Self::NoFiles
            | Self::FilesAdded { .. }
            | Self::ErrorAddingFile { .. }
            | Self::Complete { .. }
            | Self::ErrorStarting { .. } => true,
        }
    }

    /// Check structural invariants.
    ///
    /// Variants describing a live session must stage at least one file; error
    /// variants may be empty. No variant may list the same source twice.
    pub fn validate(&self) -> Result<(), ScreenError> {
        let requires_files = match self {
            Self::NoFiles | Self::ErrorAddingFile { .. } | Self::ErrorStarting { .. } => false,
            Self::FilesAdded { .. }
            | Self::Starting { .. }
            | Self::Sharing { .. }
            | Self::Complete { .. } => true,
        };

        let files = self.files();
        if requires_files && files.is_empty() {
            return Err(ScreenError::EmptyFileList { kind: self.kind() });
        }

        let mut seen = HashSet::with_capacity(files.len());
        for file in files {
            if !seen.insert(file.source.as_str()) {
                return Err(ScreenError::DuplicateFile { source_locator: file.source.clone() });
            }
        }

        Ok(())
    }
}

/// Publication counter identifying one occurrence of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(u64);

impl Revision {
    /// Revision held before anything was observed.
    pub const INITIAL: Self = Self(0);

    /// Create a revision from a raw counter value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A published state together with its instance identity.
///
/// Cheap to clone; the payload is shared. Equality compares revision and
/// payload; see [`StateSnapshot::same_instance`] for identity.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    revision: Revision,
    state: Arc<ShareState>,
}

impl StateSnapshot {
    /// Wrap a state with the given revision.
    pub fn new(revision: Revision, state: ShareState) -> Self {
        Self { revision, state: Arc::new(state) }
    }

    /// The `NoFiles` snapshot a screen holds before its first observation.
    pub fn initial() -> Self {
        Self::new(Revision::INITIAL, ShareState::NoFiles)
    }

    /// Instance identity.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Published state.
    pub fn state(&self) -> &ShareState {
        &self.state
    }

    /// Whether both snapshots are the same published instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        self.revision == other.revision && Arc::ptr_eq(&self.state, &other.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileEntry {
        FileEntry::from_bytes(name, 1337, format!("content://{name}"))
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KiB");
        assert_eq!(format_size(23 * 1024), "23 KiB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MiB");
    }

    #[test]
    fn capabilities_per_variant() {
        let files = vec![file("a")];
        let cases = [
            (ShareState::NoFiles, false, true),
            (ShareState::FilesAdded { files: files.clone() }, true, true),
            (ShareState::ErrorAddingFile { files: files.clone(), error_file: None }, true, true),
            (ShareState::Starting { files: files.clone(), progress_percent: 10 }, false, false),
            (ShareState::Sharing { files: files.clone(), address: "x.onion".into() }, false, false),
            (ShareState::Complete { files: files.clone() }, true, true),
            (ShareState::ErrorStarting { files, message: None }, true, true),
        ];

        for (state, collapsable, modifying) in cases {
            assert_eq!(state.collapsable(), collapsable, "{:?}", state.kind());
            assert_eq!(state.allows_modifying_files(), modifying, "{:?}", state.kind());
        }
    }

    #[test]
    fn validate_rejects_empty_session() {
        let err = ShareState::FilesAdded { files: vec![] }.validate();
        assert_eq!(err, Err(ScreenError::EmptyFileList { kind: StateKind::FilesAdded }));

        let ok = ShareState::ErrorAddingFile { files: vec![], error_file: Some(file("x")) };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicates() {
        let state = ShareState::FilesAdded { files: vec![file("a"), file("b"), file("a")] };
        assert!(matches!(state.validate(), Err(ScreenError::DuplicateFile { .. })));
    }

    #[test]
    fn error_file_need_not_be_staged() {
        let state = ShareState::ErrorAddingFile { files: vec![file("a")], error_file: Some(file("b")) };
        assert!(state.validate().is_ok());
        assert_eq!(state.files().len(), 1);
    }

    #[test]
    fn total_size_sums_files() {
        let state = ShareState::FilesAdded { files: vec![file("a"), file("b")] };
        assert_eq!(state.total_size(), 2674);
        assert_eq!(ShareState::NoFiles.total_size(), 0);
    }

    #[test]
    fn snapshot_identity() {
        let a = StateSnapshot::new(Revision::new(3), ShareState::NoFiles);
        let b = a.clone();
        let c = StateSnapshot::new(Revision::new(3), ShareState::NoFiles);

        assert!(a.same_instance(&b));
        assert!(!a.same_instance(&c));
    }
}
