//! Optimization result types.

use crate::scoring::PlacementScore;
use baseiq_core::{Base, Item};
use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why an item could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnplacedReason {
    /// The item is larger than the base along some axis.
    ExceedsBase,
    /// No free anchor admits the item's footprint.
    NoFreeSpace,
}

impl fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnplacedReason::ExceedsBase => f.write_str("larger than the base"),
            UnplacedReason::NoFreeSpace => f.write_str("no free space"),
        }
    }
}

/// An item left out of the layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnplacedItem {
    /// The item as supplied.
    pub item: Item,
    /// Why it was left out.
    pub reason: UnplacedReason,
}

/// Result of [`PlacementOptimizer::optimize_placement`](crate::PlacementOptimizer::optimize_placement).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationResult {
    /// Best layout found.
    pub base: Base,

    /// Score of `base`.
    pub score: PlacementScore,

    /// Items missing from `base`.
    pub unplaced: Vec<UnplacedItem>,

    /// Annealing iterations performed.
    pub iterations: u64,

    /// Accepted candidates.
    pub accepted: u64,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Best total score after seeding and after each iteration.
    pub best_history: Vec<f64>,

    /// Wall time of the winning chain.
    pub elapsed: Duration,

    /// Whether the run was stopped through the cancel handle.
    pub cancelled: bool,

    /// Index of the chain that produced the layout.
    pub chain: usize,
}

impl OptimizationResult {
    /// Number of items left out.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns true if every requested item was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Total score of the layout.
    pub fn total_score(&self) -> f64 {
        self.score.total
    }
}
