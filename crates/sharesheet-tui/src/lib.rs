//! Terminal UI for the share screen
//!
//! A thin shell over [`sharesheet_app::Driver`] that provides
//! terminal-specific I/O. All orchestration logic lives in the generic
//! [`sharesheet_app::Runtime`].
//!
//! This crate handles terminal rendering, the host side of the sheet
//! (gestures and animation), the notification queue, and a demo share
//! workflow to drive the screen.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod demo;
pub mod input;
pub mod motion;
pub mod terminal;
pub mod toast;
pub mod ui;

pub use config::{ConfigOverrides, load_config, parse_config};
pub use demo::DemoOrchestrator;
pub use input::{InputState, KeyCommand, KeyInput};
pub use motion::{SheetGeometry, SheetMotion, rows_for};
pub use sharesheet_app::{Driver, Runtime, ScreenConfig, ShareScreen};
pub use terminal::{TerminalDriver, TerminalError, restore_terminal};
pub use toast::NotificationQueue;
