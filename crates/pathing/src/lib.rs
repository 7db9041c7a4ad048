//! # BaseIQ Pathing
//!
//! Navigation over the free voxels of a [`Base`](baseiq_core::Base).
//!
//! ## Components
//!
//! - [`Graph`]: adjacency graph of free voxels with A* [`Graph::find_path`]
//! - [`IndexedMinHeap`]: A* frontier with decrease-key and FIFO tie-breaking
//! - [`Heuristic`]: Manhattan (default), Euclidean or custom estimators
//! - [`FreeRegions`]: flood-filled connected regions of free space
//!
//! ## Example
//!
//! ```rust
//! use baseiq_core::{Base, Position};
//! use baseiq_pathing::Graph;
//!
//! let base = Base::new(5, 1, 5);
//! let graph = Graph::built(&base);
//! let path = graph.find_path(Position::new(2, 0, 2), Position::new(0, 0, 0)).unwrap();
//! assert_eq!(path.cost, 4.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod graph;
pub mod heap;
pub mod heuristic;
pub mod regions;

pub use graph::{Edge, Graph, Node, Path, OBSTACLE_PENALTY, VERTICAL_COST_FACTOR};
pub use heap::IndexedMinHeap;
pub use heuristic::{euclidean_distance, manhattan_distance, Heuristic};
pub use regions::{isolated_voxel_count, FreeRegions};
