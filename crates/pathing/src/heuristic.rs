//! Distance estimators for A*.

use baseiq_core::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Remaining-cost estimate used to order the A* frontier.
///
/// Every unit step costs at least 1.0, so both built-in estimators are
/// admissible. A custom estimator must never exceed the true remaining cost
/// or returned paths are no longer guaranteed to be shortest.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heuristic {
    /// Sum of absolute coordinate differences.
    #[default]
    Manhattan,
    /// Straight-line distance.
    Euclidean,
    /// Caller-supplied estimator.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(&Position, &Position) -> f64),
}

impl Heuristic {
    /// Estimates the cost from `from` to `to`.
    pub fn estimate(&self, from: &Position, to: &Position) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan_distance(from, to),
            Heuristic::Euclidean => euclidean_distance(from, to),
            Heuristic::Custom(f) => f(from, to),
        }
    }
}

/// Manhattan distance as an `f64`.
pub fn manhattan_distance(from: &Position, to: &Position) -> f64 {
    from.manhattan_distance(to) as f64
}

/// Euclidean distance.
pub fn euclidean_distance(from: &Position, to: &Position) -> f64 {
    from.distance(to)
}
