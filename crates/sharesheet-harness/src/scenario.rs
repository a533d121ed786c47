//! Operations and seeded scenario generation.
//!
//! An [`Operation`] is one thing that can happen to the screen: a user
//! gesture, a host report, the workflow moving on, or time passing.
//! [`Scenario::generate`] builds reproducible sequences from a seed so a
//! failing run can be replayed exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sharesheet_app::{NotificationResult, Route};

/// Operations that can be applied to a [`crate::SimWorld`].
///
/// Operations are designed to be small and composable so generators can
/// explore interesting combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Let virtual time pass.
    Wait {
        /// Milliseconds to wait.
        ms: u16,
    },
    /// Press the add-files button.
    AddFiles,
    /// Press remove on a staged file (index wraps).
    RemoveFile {
        /// File index, modulo the number of staged files.
        index: u8,
    },
    /// Press remove-all.
    RemoveAll,
    /// Press the sheet's own button.
    SheetButton,
    /// Drag the sheet, honoring the gesture lock.
    Drag {
        /// Open instead of close.
        expand: bool,
    },
    /// The host collapses the sheet regardless of the lock.
    HostCollapse,
    /// Answer the oldest shown notification.
    Resolve {
        /// How it ended.
        result: NotificationResult,
    },
    /// Press the overflow menu button.
    ToggleMenu,
    /// Pick a menu entry.
    SelectMenu {
        /// Entry picked.
        route: Route,
    },
    /// Change screen height.
    Rotate {
        /// New height in dp.
        height_dp: u16,
    },
    /// The running share makes progress.
    FlowAdvance,
    /// The share fails to start.
    FlowFail,
}

impl Operation {
    /// Draw a random operation, weighted towards time passing and files
    /// coming and going.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..100u8) {
            0..=24 => Self::Wait { ms: rng.gen_range(1..2000) },
            25..=39 => Self::AddFiles,
            40..=47 => Self::RemoveFile { index: rng.r#gen() },
            48..=51 => Self::RemoveAll,
            52..=59 => Self::SheetButton,
            60..=65 => Self::Drag { expand: rng.gen_bool(0.5) },
            66..=69 => Self::HostCollapse,
            70..=77 => Self::Resolve {
                result: if rng.gen_bool(0.5) {
                    NotificationResult::ActionPerformed
                } else {
                    NotificationResult::Dismissed
                },
            },
            78..=81 => Self::ToggleMenu,
            82..=85 => Self::SelectMenu {
                route: if rng.gen_bool(0.5) { Route::Settings } else { Route::About },
            },
            86..=88 => Self::Rotate { height_dp: rng.gen_range(320..1200) },
            89..=95 => Self::FlowAdvance,
            _ => Self::FlowFail,
        }
    }
}

/// A reproducible operation sequence.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Seed the sequence was generated from.
    pub seed: u64,
    /// Operations in order.
    pub operations: Vec<Operation>,
}

impl Scenario {
    /// Generate `len` operations from `seed`.
    pub fn generate(seed: u64, len: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let operations = (0..len).map(|_| Operation::random(&mut rng)).collect();
        Self { seed, operations }
    }
}
