//! Error types for BaseIQ.

use crate::geometry::Position;
use thiserror::Error;

/// Result type alias for BaseIQ operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing a base or searching it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A coordinate lies outside the base volume.
    #[error("Invalid position: {0} is outside the base")]
    InvalidPosition(Position),

    /// A coordinate that must be free is covered by an item.
    #[error("Position {0} is occupied")]
    PositionOccupied(Position),

    /// An item footprint collides with existing geometry or leaves the base.
    #[error("Cannot place item '{id}' at {position}")]
    PlacementConflict {
        /// ID of the rejected item.
        id: String,
        /// Anchor the item was attempted at.
        position: Position,
    },

    /// No item with the given ID exists in the base.
    #[error("Item '{0}' not found")]
    NotFound(String),

    /// The search frontier was exhausted before reaching the goal.
    #[error("No path found between {start} and {end}")]
    NoPathFound {
        /// Search origin.
        start: Position,
        /// Search goal.
        end: Position,
    },

    /// An item with the same ID is already placed.
    #[error("Duplicate item ID: {0}")]
    DuplicateItem(String),

    /// Item definition is malformed.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
