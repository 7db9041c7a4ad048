//! Placeable items.

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Position, VoxelBounds};
use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque structure identifier.
///
/// The engine only compares types for equality (relatedness lookups and hub
/// detection). The associated constants cover the structures the built-in
/// relation table refers to; any other identifier can be created with
/// [`ItemType::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemType(Cow<'static, str>);

impl ItemType {
    pub const PALBOX: ItemType = ItemType::from_static("palbox");
    pub const PAL_BED: ItemType = ItemType::from_static("pal_bed");
    pub const FOOD_BOX: ItemType = ItemType::from_static("food_box");
    pub const FOOD_PLOT: ItemType = ItemType::from_static("food_plot");
    pub const POWER_GENERATOR: ItemType = ItemType::from_static("power_generator");
    pub const ACCUMULATOR: ItemType = ItemType::from_static("accumulator");
    pub const OUTER_WALL: ItemType = ItemType::from_static("outer_wall");
    pub const WORKBENCH: ItemType = ItemType::from_static("workbench");
    pub const STORAGE: ItemType = ItemType::from_static("storage");
    pub const FURNACE: ItemType = ItemType::from_static("furnace");
    pub const COOKING_POT: ItemType = ItemType::from_static("cooking_pot");
    pub const MEDICINE_WORKBENCH: ItemType = ItemType::from_static("medicine_workbench");
    pub const BREEDING_FARM: ItemType = ItemType::from_static("breeding_farm");
    pub const INCUBATOR: ItemType = ItemType::from_static("incubator");
    pub const PAL_SPHERE_WORKBENCH: ItemType = ItemType::from_static("pal_sphere_workbench");

    /// Creates a type from a static identifier.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a type from any identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ItemType {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// A placeable object.
///
/// `rotation` is carried for callers but does not transform `bounds`: the
/// collision footprint is always `bounds` extended along +X, +Y and +Z from
/// `position`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Structure type.
    pub item_type: ItemType,
    /// Anchor (minimum corner). Set by the optimizer.
    pub position: Position,
    /// Footprint extent.
    pub bounds: BoundingBox,
    /// Orientation in degrees (0, 90, 180 or 270).
    pub rotation: i32,
    /// Placement priority; higher is placed first.
    pub priority: i32,
}

impl Item {
    /// Creates an unplaced item anchored at the origin.
    pub fn new(id: impl Into<String>, item_type: ItemType, bounds: BoundingBox) -> Self {
        Self {
            id: id.into(),
            item_type,
            position: Position::ORIGIN,
            bounds,
            rotation: 0,
            priority: 0,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the anchor position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns a copy of this item anchored at `position`.
    pub fn at(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Every voxel covered by the item at its current position.
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.footprint_at(self.position)
    }

    /// Every voxel the item would cover if anchored at `anchor`.
    pub fn footprint_at(&self, anchor: Position) -> Vec<Position> {
        let capacity = self.bounds.volume().max(0) as usize;
        let mut positions = Vec::with_capacity(capacity);
        for dx in 0..self.bounds.width {
            for dy in 0..self.bounds.height {
                for dz in 0..self.bounds.depth {
                    positions.push(anchor.offset(dx, dy, dz));
                }
            }
        }
        positions
    }

    /// Inclusive voxel bounds of the footprint.
    pub fn voxel_bounds(&self) -> VoxelBounds {
        VoxelBounds {
            min: self.position,
            max: self.position.offset(
                self.bounds.width - 1,
                self.bounds.height - 1,
                self.bounds.depth - 1,
            ),
        }
    }

    /// Returns true if the footprints of both items overlap.
    ///
    /// Boxes are half-open: touching faces do not intersect.
    pub fn intersects(&self, other: &Item) -> bool {
        let (a, b) = (self.extent(), other.extent());
        (0..3).all(|axis| a.0[axis] < b.1[axis] && a.1[axis] > b.0[axis])
    }

    /// Returns true if `pos` lies inside the footprint.
    pub fn covers(&self, pos: &Position) -> bool {
        let (min, max) = self.extent();
        let p = [pos.x as i64, pos.y as i64, pos.z as i64];
        (0..3).all(|axis| p[axis] >= min[axis] && p[axis] < max[axis])
    }

    /// Half-open footprint `[min, max)` widened to `i64`, so anchors near
    /// `i32::MAX` cannot overflow.
    fn extent(&self) -> ([i64; 3], [i64; 3]) {
        let p = &self.position;
        let min = [p.x as i64, p.y as i64, p.z as i64];
        let max = [
            min[0] + self.bounds.width as i64,
            min[1] + self.bounds.height as i64,
            min[2] + self.bounds.depth as i64,
        ];
        (min, max)
    }

    /// Checks the item definition.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidItem("item ID must not be empty".into()));
        }
        if !self.bounds.is_valid() {
            return Err(Error::InvalidItem(format!(
                "bounds of '{}' must be at least 1x1x1",
                self.id
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] at {}", self.item_type, self.id, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, pos: Position, bounds: BoundingBox) -> Item {
        Item::new(id, ItemType::STORAGE, bounds).with_position(pos)
    }

    #[test]
    fn test_occupied_positions() {
        let it = item("a", Position::new(1, 2, 3), BoundingBox::new(2, 1, 2));
        let occupied = it.occupied_positions();
        assert_eq!(occupied.len(), 4);
        assert!(occupied.contains(&Position::new(1, 2, 3)));
        assert!(occupied.contains(&Position::new(2, 2, 4)));
        assert!(!occupied.contains(&Position::new(1, 3, 3)));
        assert!(occupied.iter().all(|p| it.covers(p)));
    }

    #[test]
    fn test_intersects_half_open() {
        let a = item("a", Position::new(0, 0, 0), BoundingBox::new(2, 2, 2));
        let touching = item("b", Position::new(2, 0, 0), BoundingBox::new(2, 2, 2));
        let overlapping = item("c", Position::new(1, 1, 1), BoundingBox::UNIT);

        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_voxel_bounds() {
        let it = item("a", Position::new(1, 0, 1), BoundingBox::new(2, 3, 1));
        let bounds = it.voxel_bounds();
        assert_eq!(bounds.max, Position::new(2, 2, 1));
        assert_eq!(bounds.volume(), it.bounds.volume());
    }

    #[test]
    fn test_validate() {
        assert!(item("a", Position::ORIGIN, BoundingBox::UNIT).validate().is_ok());
        assert!(item("", Position::ORIGIN, BoundingBox::UNIT).validate().is_err());
        assert!(matches!(
            item("a", Position::ORIGIN, BoundingBox::new(1, 0, 1)).validate(),
            Err(Error::InvalidItem(_))
        ));
    }

    #[test]
    fn test_extreme_anchors_do_not_overflow() {
        let far = Position::new(i32::MAX, i32::MAX - 1, i32::MAX);
        let a = item("a", far, BoundingBox::new(4, 4, 4));
        let b = item("b", far, BoundingBox::UNIT);
        assert!(a.covers(&far));
        assert!(!a.covers(&Position::new(i32::MAX - 1, i32::MAX, i32::MAX)));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&item("c", Position::ORIGIN, BoundingBox::UNIT)));
    }

    #[test]
    fn test_rotation_is_carried_not_applied() {
        let plain = item("a", Position::new(1, 0, 1), BoundingBox::new(3, 1, 1));
        let turned = plain.clone().with_rotation(90);
        assert_eq!(turned.rotation, 90);
        assert_eq!(plain.rotation, 0);
        assert_eq!(turned.occupied_positions(), plain.occupied_positions());
        assert_eq!(turned.at(Position::ORIGIN).rotation, 90);
    }

    #[test]
    fn test_item_type_identity() {
        assert_eq!(ItemType::new("palbox"), ItemType::PALBOX);
        assert_ne!(ItemType::PALBOX, ItemType::PAL_BED);
        assert_eq!(ItemType::from("custom").as_str(), "custom");
    }
}
