//! # BaseIQ Core
//!
//! Spatial model and shared abstractions for the BaseIQ layout engine.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Position`], [`BoundingBox`], [`VoxelBounds`]
//! - **Items**: [`Item`] and the opaque [`ItemType`] identifier
//! - **Spatial model**: [`Base`], a voxel volume whose occupancy grid always
//!   matches the footprints of its placed items
//! - **SA framework**: seedable Simulated Annealing runner used by the optimizer
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod base;
pub mod error;
pub mod geometry;
pub mod item;
pub mod sa;

// Re-exports
pub use base::{Base, FACE_OFFSETS};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Position, VoxelBounds};
pub use item::{Item, ItemType};
pub use sa::{metropolis_accept, SaConfig, SaProblem, SaProgress, SaResult, SaRunner, SaSolution};
