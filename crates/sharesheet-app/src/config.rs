//! Screen configuration.
//!
//! [`ScreenConfig`] collects every deploy-time knob: the reveal delay, the
//! debug flag gating the settings entry, the sheet geometry and the
//! user-facing strings. All sections deserialize with defaults so a partial
//! TOML file is enough.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ScreenError;

/// Default delay before the sheet's entrance reveal.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 750;

/// Upper bound on the reveal delay.
pub const MAX_REVEAL_DELAY_MS: u64 = 10_000;

const NAME_PLACEHOLDER: &str = "{name}";

/// Configuration for [`crate::ShareScreen`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Idle time before the sheet expands on session open, in milliseconds.
    pub reveal_delay_ms: u64,
    /// Debug build: show the settings entry in the action menu.
    pub debug_menu: bool,
    /// Sheet geometry.
    pub sheet: SheetLayout,
    /// User-facing text.
    pub strings: Strings,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            debug_menu: false,
            sheet: SheetLayout::default(),
            strings: Strings::default(),
        }
    }
}

impl ScreenConfig {
    /// Reveal delay as a [`Duration`].
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Check value ranges and templates.
    pub fn validate(&self) -> Result<(), ScreenError> {
        if self.reveal_delay_ms > MAX_REVEAL_DELAY_MS {
            return Err(ScreenError::RevealDelayTooLong(self.reveal_delay_ms));
        }
        if self.sheet.peek_height_dp <= 0.0 {
            return Err(ScreenError::ZeroPeekHeight);
        }
        if !self.strings.error_file_template.contains(NAME_PLACEHOLDER) {
            return Err(ScreenError::MissingNamePlaceholder(self.strings.error_file_template.clone()));
        }
        Ok(())
    }
}

/// Detail sheet geometry, in dp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Height visible while collapsed.
    pub peek_height_dp: f32,
    /// Radius of the two top corners.
    pub corner_radius_dp: f32,
    /// Shadow elevation.
    pub elevation_dp: f32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self { peek_height_dp: 60.0, corner_radius_dp: 16.0, elevation_dp: 16.0 }
    }
}

/// User-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    /// Title of the top bar.
    pub app_name: String,
    /// Accessibility label of the overflow menu button.
    pub menu: String,
    /// Settings menu entry.
    pub settings: String,
    /// About menu entry.
    pub about: String,
    /// Accessibility label of the add-files button.
    pub add_files: String,
    /// Bold lead phrase of the advisory banner.
    pub warning_lead: String,
    /// Explanatory text of the advisory banner.
    pub warning_body: String,
    /// Caption under the empty-state illustration.
    pub empty_caption: String,
    /// Error message naming the file; must contain `{name}`.
    pub error_file_template: String,
    /// Error message when the failing file is unknown.
    pub error_generic: String,
    /// Action label on error notifications.
    pub error_action: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            app_name: "OnionShare".into(),
            menu: "Menu".into(),
            settings: "Settings".into(),
            about: "About".into(),
            add_files: "Add files".into(),
            warning_lead: "Warning:".into(),
            warning_body: "This is an early preview. Do not rely on it to share sensitive files."
                .into(),
            empty_caption: "Add files to share them over an anonymous link".into(),
            error_file_template: "Could not add {name}".into(),
            error_generic: "Could not add file".into(),
            error_action: "Retry".into(),
        }
    }
}

impl Strings {
    /// Error message for a named file.
    pub fn error_file_message(&self, name: &str) -> String {
        self.error_file_template.replace(NAME_PLACEHOLDER, name)
    }
}
