//! Error types for the presentation layer.

use thiserror::Error;

use crate::StateKind;

/// Errors raised when a value handed to the screen is not acceptable.
///
/// The share flow itself never fails here: transfer failures arrive as
/// [`crate::ShareState`] variants. These errors only reject malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    /// A variant that must stage at least one file was published empty.
    #[error("{kind:?} requires at least one staged file")]
    EmptyFileList {
        /// Variant that was rejected.
        kind: StateKind,
    },

    /// The same file appears twice in a file list.
    #[error("duplicate file in share state: {source_locator}")]
    DuplicateFile {
        /// Locator of the duplicated entry.
        source_locator: String,
    },

    /// Viewport density is zero, negative or not finite.
    #[error("invalid viewport density: {0}")]
    InvalidDensity(f32),

    /// Viewport height is negative or not finite.
    #[error("invalid viewport height: {0}dp")]
    InvalidViewportHeight(f32),

    /// File-specific error template lacks the `{name}` placeholder.
    #[error("error template must contain {{name}}: {0:?}")]
    MissingNamePlaceholder(String),

    /// Reveal delay exceeds the allowed maximum.
    #[error("reveal delay of {0}ms exceeds the {max}ms limit", max = crate::config::MAX_REVEAL_DELAY_MS)]
    RevealDelayTooLong(u64),

    /// Sheet peek height must be positive.
    #[error("sheet peek height must be positive")]
    ZeroPeekHeight,
}
