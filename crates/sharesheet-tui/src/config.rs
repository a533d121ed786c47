//! Configuration loading for the terminal host.
//!
//! The screen configuration comes from an optional TOML file; command-line
//! flags override it, and the result is validated before the screen starts.

use std::path::Path;

use sharesheet_app::ScreenConfig;

use crate::TerminalError;

/// Values given on the command line, applied over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Force the settings entry on.
    pub debug_menu: bool,
    /// Replace the reveal delay.
    pub reveal_delay_ms: Option<u64>,
}

/// Parse a TOML screen configuration. Missing keys take their defaults.
pub fn parse_config(text: &str) -> Result<ScreenConfig, TerminalError> {
    Ok(toml::from_str(text)?)
}

/// Load the configuration from `path` (defaults if `None`), apply
/// `overrides` and validate.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ScreenConfig, TerminalError> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| TerminalError::ConfigRead {
                path: path.display().to_string(),
                source,
            })?;
            parse_config(&text)?
        },
        None => ScreenConfig::default(),
    };

    if overrides.debug_menu {
        config.debug_menu = true;
    }
    if let Some(ms) = overrides.reveal_delay_ms {
        config.reveal_delay_ms = ms;
    }

    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
