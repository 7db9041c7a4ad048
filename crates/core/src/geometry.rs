//! Integer voxel geometry: positions, item extents and voxel-aligned bounds.

use nalgebra::Vector3;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A voxel coordinate inside (or outside) a base.
///
/// Coordinates are signed so that neighbourhood probes around the boundary
/// can be expressed directly; the base treats anything outside its volume
/// as occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// X coordinate (width axis).
    pub x: i32,
    /// Y coordinate (height axis).
    pub y: i32,
    /// Z coordinate (depth axis).
    pub z: i32,
}

impl Position {
    /// The origin `(0, 0, 0)`.
    pub const ORIGIN: Position = Position { x: 0, y: 0, z: 0 };

    /// Creates a new position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the position shifted by the given deltas.
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Returns the coordinates as a floating point vector.
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Position) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    /// Manhattan (L1) distance to another position.
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Extent of an item in voxels, anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Extent along X.
    pub width: i32,
    /// Extent along Y.
    pub height: i32,
    /// Extent along Z.
    pub depth: i32,
}

impl BoundingBox {
    /// A single voxel.
    pub const UNIT: BoundingBox = BoundingBox {
        width: 1,
        height: 1,
        depth: 1,
    };

    /// Creates a new bounding box.
    pub const fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Number of voxels covered.
    pub fn volume(&self) -> i64 {
        self.width as i64 * self.height as i64 * self.depth as i64
    }

    /// Returns true if every extent is at least one voxel.
    pub fn is_valid(&self) -> bool {
        self.width >= 1 && self.height >= 1 && self.depth >= 1
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Inclusive voxel-aligned bounds enclosing a set of voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelBounds {
    /// Minimum corner (inclusive).
    pub min: Position,
    /// Maximum corner (inclusive).
    pub max: Position,
}

impl VoxelBounds {
    /// Bounds covering exactly one voxel.
    pub fn from_voxel(pos: Position) -> Self {
        Self { min: pos, max: pos }
    }

    /// Creates bounds enclosing all given voxels, or `None` if there are none.
    pub fn from_voxels<I>(voxels: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut iter = voxels.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_voxel(first), |mut acc, p| {
            acc.include(p);
            acc
        }))
    }

    /// Grows the bounds to contain `pos`.
    pub fn include(&mut self, pos: Position) {
        self.min.x = self.min.x.min(pos.x);
        self.min.y = self.min.y.min(pos.y);
        self.min.z = self.min.z.min(pos.z);
        self.max.x = self.max.x.max(pos.x);
        self.max.y = self.max.y.max(pos.y);
        self.max.z = self.max.z.max(pos.z);
    }

    /// Grows the bounds to contain another set of bounds.
    pub fn union(&self, other: &VoxelBounds) -> VoxelBounds {
        let mut result = *self;
        result.include(other.min);
        result.include(other.max);
        result
    }

    /// Extent in voxels along each axis.
    pub fn extent(&self) -> BoundingBox {
        BoundingBox::new(
            self.max.x - self.min.x + 1,
            self.max.y - self.min.y + 1,
            self.max.z - self.min.z + 1,
        )
    }

    /// Number of voxels enclosed.
    pub fn volume(&self) -> i64 {
        self.extent().volume()
    }
}
