//! Presentation layer for the share screen
//!
//! Pure state machines and a generic runtime that turn a published
//! [`ShareState`] into visible surfaces (detail sheet, action button,
//! notification, primary content) and route user intents back to an
//! external orchestrator. The same code runs against a real clock in the
//! terminal host and a virtual clock in simulation.
//!
//! # Components
//!
//! - [`StateStream`]: single-writer publish/subscribe slot for [`ShareState`]
//! - [`EffectScheduler`]: keyed one-shot delayed effects
//! - [`SheetCoordinator`]: expand/collapse and gesture-lock decisions
//! - [`NotificationController`]: one notification per error instance
//! - [`PrimarySurface`]: empty state or file list
//! - [`ActionMenu`]: navigation intents
//! - [`ShareScreen`]: the composed state machine
//! - [`Bridge`]: dispatches intents to an [`Orchestrator`]
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using a [`Driver`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
mod config;
mod driver;
mod effect;
mod error;
mod event;
mod menu;
mod notification;
mod offset;
mod runtime;
mod screen;
mod sheet;
mod state;
mod stream;
mod surface;

pub use action::ScreenAction;
pub use bridge::{Bridge, Orchestrator};
pub use config::{ScreenConfig, SheetLayout, Strings};
pub use driver::Driver;
pub use effect::{EffectScheduler, Moment};
pub use error::ScreenError;
pub use event::ScreenEvent;
pub use menu::{ActionMenu, MenuItem, Route};
pub use notification::{
    MAX_OUTSTANDING, Notification, NotificationController, NotificationDuration, NotificationResult,
};
pub use offset::{Dp, Px, Viewport, ViewportSource, bottom_inset};
pub use runtime::Runtime;
pub use screen::ShareScreen;
pub use sheet::{Fab, FabColor, SheetCommand, SheetCoordinator, SheetPhase};
pub use state::{FileEntry, Revision, ShareState, StateKind, StateSnapshot, format_size};
pub use stream::{StateStream, StateSubscription};
pub use surface::{AdvisoryBanner, EmptyState, FileListProps, PrimarySurface};
