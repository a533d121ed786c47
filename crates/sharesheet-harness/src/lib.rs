//! Deterministic simulation harness for the share screen.
//!
//! Virtual-time implementations of the [`sharesheet_app::Driver`] and
//! [`sharesheet_app::Orchestrator`] traits for deterministic, reproducible
//! testing of every state, gesture and timing combination.
//!
//! # Simulation
//!
//! - [`SimDriver`] runs the real [`sharesheet_app::Runtime`] against a
//!   scripted host and a [`SimClock`].
//! - [`SimWorld`] steps the screen synchronously, one [`Operation`] at a
//!   time, for randomized exploration.
//! - [`ShareFlow`] models the workflow that publishes states.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the screen's
//! invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod flow;
pub mod invariants;
pub mod scenario;
pub mod sim_driver;
pub mod sim_time;
pub mod world;

pub use flow::{Intent, ShareFlow, SharedStream};
pub use invariants::{
    FabMatchesCapability, GesturesMatchCapability, Invariant, InvariantKind, InvariantRegistry,
    InvariantResult, LockedSheetExpanded, NotificationOncePerInstance, RevisionMonotonicity,
    ScreenSnapshot, ScreenTrace, SettingsGated, SheetHiddenWithoutFiles, SurfaceMatchesState,
    Violation,
};
pub use scenario::{Operation, Scenario};
pub use sim_driver::{SimDriver, SimDriverError, Step};
pub use sim_time::{SimClock, SimInstant};
pub use world::SimWorld;
