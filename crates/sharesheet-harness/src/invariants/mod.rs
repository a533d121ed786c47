//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during screen execution.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible execution paths.
//!
//! # Architecture
//!
//! The invariant system captures observable state from the screen into a
//! [`ScreenSnapshot`], appends it to a [`ScreenTrace`], then runs registered
//! [`Invariant`] checks against the trace.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let mut trace = ScreenTrace::new();
//! trace.push_frame(ScreenSnapshot::capture(&screen));
//! registry.check_all(&trace)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    FabMatchesCapability, GesturesMatchCapability, LockedSheetExpanded,
    NotificationOncePerInstance, RevisionMonotonicity, SettingsGated, SheetHiddenWithoutFiles,
    SurfaceMatchesState,
};
pub use snapshot::{ScreenSnapshot, ScreenTrace};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies a standard invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// See [`SheetHiddenWithoutFiles`].
    SheetHiddenWithoutFiles,
    /// See [`LockedSheetExpanded`].
    LockedSheetExpanded,
    /// See [`FabMatchesCapability`].
    FabMatchesCapability,
    /// See [`GesturesMatchCapability`].
    GesturesMatchCapability,
    /// See [`SurfaceMatchesState`].
    SurfaceMatchesState,
    /// See [`SettingsGated`].
    SettingsGated,
    /// See [`RevisionMonotonicity`].
    RevisionMonotonicity,
    /// See [`NotificationOncePerInstance`].
    NotificationOncePerInstance,
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{invariant:?}: {message}")]
pub struct Violation {
    /// Violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// An invariant that can be checked against an observed trace.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against the trace so far.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, trace: &ScreenTrace) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against a trace.
/// Use [`InvariantRegistry::standard()`] for the screen's invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl std::fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.invariants.iter().map(|i| i.kind()).collect();
        f.debug_struct("InvariantRegistry").field("invariants", &kinds).finish()
    }
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with every standard screen invariant.
    ///
    /// Includes:
    /// - [`SheetHiddenWithoutFiles`]: `NoFiles` has no sheet
    /// - [`LockedSheetExpanded`]: non-collapsable states keep the sheet open
    /// - [`FabMatchesCapability`]: button present iff modifying allowed
    /// - [`GesturesMatchCapability`]: drag allowed iff dismissible sheet
    /// - [`SurfaceMatchesState`]: empty state iff `NoFiles`
    /// - [`SettingsGated`]: settings entry needs the debug flag
    /// - [`RevisionMonotonicity`]: frames never regress
    /// - [`NotificationOncePerInstance`]: one notification per error instance
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SheetHiddenWithoutFiles);
        registry.add(LockedSheetExpanded);
        registry.add(FabMatchesCapability);
        registry.add(GesturesMatchCapability);
        registry.add(SurfaceMatchesState);
        registry.add(SettingsGated);
        registry.add(RevisionMonotonicity);
        registry.add(NotificationOncePerInstance);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the trace.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, trace: &ScreenTrace) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(trace).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

/// Join violations into one line per invariant.
pub fn describe(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
