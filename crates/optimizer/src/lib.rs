//! # BaseIQ Optimizer
//!
//! Places items into a [`Base`](baseiq_core::Base) and improves the layout
//! with Simulated Annealing.
//!
//! ## Pipeline
//!
//! 1. Items are sorted by descending priority (stable).
//! 2. [`GreedyPlacer`] puts each item at its most desirable free anchor.
//! 3. The annealing loop moves one placed item per step, rescoring the whole
//!    layout with [`score_layout`] and accepting by the Metropolis rule.
//! 4. The best layout seen is returned in an [`OptimizationResult`], along
//!    with any items that fit nowhere.
//!
//! ## Example
//!
//! ```rust
//! use baseiq_core::{Base, BoundingBox, Item, ItemType};
//! use baseiq_optimizer::{OptimizationConfig, PlacementOptimizer};
//!
//! let optimizer = PlacementOptimizer::new(Base::new(8, 2, 8));
//! let items = vec![
//!     Item::new("palbox", ItemType::PALBOX, BoundingBox::new(2, 2, 2)).with_priority(10),
//!     Item::new("storage", ItemType::STORAGE, BoundingBox::UNIT),
//!     Item::new("furnace", ItemType::FURNACE, BoundingBox::UNIT),
//! ];
//! let config = OptimizationConfig::default().with_max_iterations(20);
//! let result = optimizer.optimize_placement(&items, &config).unwrap();
//! assert!(result.all_placed());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod optimizer;
pub mod placement;
pub mod relations;
pub mod result;
pub mod scoring;

pub use config::OptimizationConfig;
pub use optimizer::{Layout, PlacementOptimizer, PlacementProblem};
pub use placement::{sort_by_priority, GreedyPlacer};
pub use relations::RelationTable;
pub use result::{OptimizationResult, UnplacedItem, UnplacedReason};
pub use scoring::{
    compactness_score, efficiency_score, find_hub, nearest_access, pathfinding_score,
    route_between, score_layout, PlacementScore,
};
