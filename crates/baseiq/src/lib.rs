//! # BaseIQ
//!
//! Voxel base layout optimization.
//!
//! This crate provides:
//! - **Spatial model**: a voxel [`Base`] with collision-checked item placement
//! - **Pathing**: A* over the free voxels with vertical and obstacle penalties
//! - **Optimization**: greedy seeding plus Simulated Annealing over layouts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use baseiq::{Base, BoundingBox, Item, ItemType, OptimizationConfig, PlacementOptimizer};
//!
//! let optimizer = PlacementOptimizer::new(Base::new(10, 3, 10));
//! let items = vec![
//!     Item::new("palbox", ItemType::PALBOX, BoundingBox::new(2, 2, 2)).with_priority(10),
//!     Item::new("storage", ItemType::STORAGE, BoundingBox::UNIT),
//! ];
//! let result = optimizer.optimize_placement(&items, &OptimizationConfig::default())?;
//! println!("score {:.2}, {} unplaced", result.score.total, result.unplaced_count());
//! ```
//!
//! ## Feature Flags
//!
//! - `pathing` (default): navigation graph and A*
//! - `optimizer` (default): placement optimizer (implies `pathing`)
//! - `serde`: Serialization support

/// Spatial model, errors and the annealing framework.
pub use baseiq_core as core;

/// Navigation graph and A*.
#[cfg(feature = "pathing")]
pub use baseiq_pathing as pathing;

/// Placement optimizer.
#[cfg(feature = "optimizer")]
pub use baseiq_optimizer as optimizer;

// Re-export commonly used types at root level
pub use baseiq_core::{Base, BoundingBox, Error, Item, ItemType, Position, Result};

#[cfg(feature = "pathing")]
pub use baseiq_pathing::{Graph, Heuristic, Path};

#[cfg(feature = "optimizer")]
pub use baseiq_optimizer::{
    OptimizationConfig, OptimizationResult, PlacementOptimizer, PlacementScore, UnplacedItem,
};
