//! Primary content area.
//!
//! A binary choice keyed only on whether the state is `NoFiles`: an empty
//! state with a fixed advisory banner, or the props handed to the file-list
//! collaborator.

use crate::{Dp, FileEntry, StateSnapshot, Strings};

/// Non-dismissible high-visibility banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryBanner {
    /// Bold lead phrase.
    pub lead: String,
    /// Explanatory text following the lead.
    pub body: String,
}

impl AdvisoryBanner {
    /// Lead and body joined by a space.
    pub fn text(&self) -> String {
        format!("{} {}", self.lead, self.body)
    }
}

/// Content shown while no files are staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Banner stacked above the illustration. Always present.
    pub banner: AdvisoryBanner,
    /// Centered caption under the illustration.
    pub caption: String,
}

/// Input for the file-list collaborator.
///
/// Removal is reported back through [`crate::ScreenEvent::FileRemovePressed`]
/// and [`crate::ScreenEvent::RemoveAllPressed`].
#[derive(Debug, Clone)]
pub struct FileListProps {
    /// Current state.
    pub snapshot: StateSnapshot,
    /// Space covered by the detail sheet.
    pub bottom_inset: Dp,
    /// Whether removal controls should be offered.
    pub removable: bool,
}

impl FileListProps {
    /// Files to list.
    pub fn files(&self) -> &[FileEntry] {
        self.snapshot.state().files()
    }

    /// Sum of listed file sizes.
    pub fn total_size(&self) -> u64 {
        self.snapshot.state().total_size()
    }
}

/// What the primary content area shows.
#[derive(Debug, Clone)]
pub enum PrimarySurface {
    /// No files staged.
    Empty(EmptyState),
    /// Delegate to the file list.
    FileList(FileListProps),
}

impl PrimarySurface {
    /// Choose the surface for `snapshot`.
    pub fn render(snapshot: &StateSnapshot, bottom_inset: Dp, strings: &Strings) -> Self {
        if snapshot.state().is_no_files() {
            return Self::Empty(EmptyState {
                banner: AdvisoryBanner {
                    lead: strings.warning_lead.clone(),
                    body: strings.warning_body.clone(),
                },
                caption: strings.empty_caption.clone(),
            });
        }

        Self::FileList(FileListProps {
            snapshot: snapshot.clone(),
            bottom_inset,
            removable: snapshot.state().allows_modifying_files(),
        })
    }

    /// Whether this is the empty state.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Empty-state content. `None` when files are listed.
    pub fn empty_state(&self) -> Option<&EmptyState> {
        match self {
            Self::Empty(empty) => Some(empty),
            Self::FileList(_) => None,
        }
    }

    /// File-list props. `None` in the empty state.
    pub fn file_list(&self) -> Option<&FileListProps> {
        match self {
            Self::Empty(_) => None,
            Self::FileList(props) => Some(props),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Revision, ShareState};

    #[test]
    fn no_files_shows_banner() {
        let strings = Strings::default();
        let snapshot = StateSnapshot::new(Revision::new(1), ShareState::NoFiles);

        let surface = PrimarySurface::render(&snapshot, Dp(40.0), &strings);
        let empty = surface.empty_state().expect("empty state");
        assert_eq!(empty.banner.lead, strings.warning_lead);
        assert!(empty.banner.text().starts_with("Warning: "));
        assert_eq!(empty.caption, strings.empty_caption);
    }

    #[test]
    fn files_delegate_to_list_with_inset() {
        let files = vec![FileEntry::from_bytes("a", 1024, "file://a")];
        let snapshot =
            StateSnapshot::new(Revision::new(2), ShareState::Sharing { files, address: "x".into() });

        let surface = PrimarySurface::render(&snapshot, Dp(120.0), &Strings::default());
        let props = surface.file_list().expect("file list");
        assert_eq!(props.bottom_inset, Dp(120.0));
        assert_eq!(props.files().len(), 1);
        assert_eq!(props.total_size(), 1024);
        assert!(!props.removable);
        assert!(props.snapshot.same_instance(&snapshot));
    }
}
