//! The voxel spatial model.
//!
//! A [`Base`] is a fixed-size voxel volume plus the items placed in it. The
//! occupancy grid and the item map are only ever changed together, so a voxel
//! is occupied exactly when some placed item covers it.

use crate::error::{Error, Result};
use crate::geometry::Position;
use crate::item::Item;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Face-adjacent neighbour offsets (+y, -y, -x, +x, -z, +z).
pub const FACE_OFFSETS: [(i32, i32, i32); 6] = [
    (0, 1, 0),
    (0, -1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// A bounded voxel volume with placed items.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Base {
    width: i32,
    height: i32,
    depth: i32,
    /// Placed items keyed by ID. Ordered so scans are deterministic.
    items: BTreeMap<String, Item>,
    /// Dense occupancy, indexed `(x * height + y) * depth + z`.
    grid: Vec<bool>,
}

impl Base {
    /// Creates an empty base. Negative dimensions are treated as zero.
    ///
    /// # Panics
    ///
    /// Panics if the voxel count overflows `usize`. Use [`Base::try_new`] to
    /// get an error instead.
    pub fn new(width: i32, height: i32, depth: i32) -> Self {
        match Self::try_new(width, height, depth) {
            Ok(base) => base,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty base, failing if the voxel count overflows `usize`.
    ///
    /// Negative dimensions are treated as zero.
    pub fn try_new(width: i32, height: i32, depth: i32) -> Result<Self> {
        let (width, height, depth) = (width.max(0), height.max(0), depth.max(0));
        let cells = (width as usize)
            .checked_mul(height as usize)
            .and_then(|area| area.checked_mul(depth as usize))
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "base of {}x{}x{} voxels is too large",
                    width, height, depth
                ))
            })?;
        Ok(Self {
            width,
            height,
            depth,
            items: BTreeMap::new(),
            grid: vec![false; cells],
        })
    }

    /// Extent along X.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Extent along Y.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Extent along Z.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Total number of voxels.
    pub fn volume(&self) -> usize {
        self.grid.len()
    }

    /// Ground-level centre `(width / 2, 0, depth / 2)`.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, 0, self.depth / 2)
    }

    #[inline]
    fn index(&self, pos: &Position) -> usize {
        ((pos.x as usize * self.height as usize) + pos.y as usize) * self.depth as usize
            + pos.z as usize
    }

    /// Returns true if every coordinate lies within `[0, dimension)`.
    pub fn is_position_valid(&self, pos: &Position) -> bool {
        pos.x >= 0
            && pos.x < self.width
            && pos.y >= 0
            && pos.y < self.height
            && pos.z >= 0
            && pos.z < self.depth
    }

    /// Returns true if `pos` is covered by an item or lies outside the base.
    pub fn is_position_occupied(&self, pos: &Position) -> bool {
        if !self.is_position_valid(pos) {
            return true;
        }
        self.grid[self.index(pos)]
    }

    /// Returns true if `pos` is inside the base and not covered by an item.
    pub fn is_position_free(&self, pos: &Position) -> bool {
        !self.is_position_occupied(pos)
    }

    /// Returns true if every voxel of the item's footprint is valid and free.
    pub fn can_place_item(&self, item: &Item) -> bool {
        self.can_place_at(item, item.position)
    }

    /// Returns true if the item would fit with its anchor at `anchor`.
    pub fn can_place_at(&self, item: &Item, anchor: Position) -> bool {
        if !item.bounds.is_valid() {
            return false;
        }
        for dx in 0..item.bounds.width {
            for dy in 0..item.bounds.height {
                for dz in 0..item.bounds.depth {
                    if self.is_position_occupied(&anchor.offset(dx, dy, dz)) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Places an item, marking its footprint occupied.
    ///
    /// On error the base is left unchanged.
    pub fn place_item(&mut self, item: Item) -> Result<()> {
        if self.items.contains_key(&item.id) {
            return Err(Error::DuplicateItem(item.id));
        }
        if !self.can_place_item(&item) {
            return Err(Error::PlacementConflict {
                id: item.id,
                position: item.position,
            });
        }

        for pos in item.occupied_positions() {
            let idx = self.index(&pos);
            self.grid[idx] = true;
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Removes an item, freeing its footprint, and returns it.
    pub fn remove_item(&mut self, id: &str) -> Result<Item> {
        let item = self
            .items
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        for pos in item.occupied_positions() {
            let idx = self.index(&pos);
            self.grid[idx] = false;
        }
        Ok(item)
    }

    /// Returns the placed item with the given ID.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Placed items keyed by ID.
    pub fn items(&self) -> &BTreeMap<String, Item> {
        &self.items
    }

    /// Number of placed items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the item covering `pos`, if any.
    pub fn item_at(&self, pos: &Position) -> Option<&Item> {
        if !self.is_position_valid(pos) || !self.grid[self.index(pos)] {
            return None;
        }
        self.items.values().find(|item| item.covers(pos))
    }

    /// Every valid voxel in scan order (x, then y, then z).
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (w, h, d) = (self.width, self.height, self.depth);
        (0..w).flat_map(move |x| {
            (0..h).flat_map(move |y| (0..d).map(move |z| Position::new(x, y, z)))
        })
    }

    /// All occupied voxels in scan order.
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| self.grid[self.index(p)])
            .collect()
    }

    /// All free voxels in scan order.
    pub fn free_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| !self.grid[self.index(p)])
            .collect()
    }

    /// Number of occupied voxels.
    pub fn occupied_count(&self) -> usize {
        self.grid.iter().filter(|&&cell| cell).count()
    }

    /// Occupied share of the volume, in percent. Zero for an empty volume.
    pub fn occupancy_percentage(&self) -> f64 {
        if self.grid.is_empty() {
            return 0.0;
        }
        self.occupied_count() as f64 / self.grid.len() as f64 * 100.0
    }

    /// Free voxels face-adjacent to the item's footprint, in scan order.
    ///
    /// These are the voxels from which the item can be reached.
    pub fn access_positions(&self, item: &Item) -> Vec<Position> {
        let mut access: Vec<Position> = item
            .occupied_positions()
            .into_iter()
            .flat_map(|p| FACE_OFFSETS.iter().map(move |&(dx, dy, dz)| p.offset(dx, dy, dz)))
            .filter(|n| !item.covers(n) && self.is_position_free(n))
            .collect();
        access.sort_unstable();
        access.dedup();
        access
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::item::ItemType;

    fn boxed(id: &str, pos: (i32, i32, i32), bounds: (i32, i32, i32)) -> Item {
        Item::new(id, ItemType::STORAGE, BoundingBox::new(bounds.0, bounds.1, bounds.2))
            .with_position(Position::from(pos))
    }

    /// Grid and item map agree voxel for voxel.
    fn assert_consistent(base: &Base) {
        for pos in base.positions() {
            let covered = base.items().values().any(|i| i.covers(&pos));
            assert_eq!(base.is_position_occupied(&pos), covered, "mismatch at {}", pos);
        }
    }

    #[test]
    fn test_validity_and_out_of_bounds() {
        let base = Base::new(3, 2, 4);
        assert_eq!(base.volume(), 24);
        assert!(base.is_position_valid(&Position::new(2, 1, 3)));
        assert!(!base.is_position_valid(&Position::new(3, 0, 0)));
        assert!(!base.is_position_valid(&Position::new(0, -1, 0)));
        assert!(base.is_position_occupied(&Position::new(-1, 0, 0)));
        assert!(!base.is_position_occupied(&Position::new(0, 0, 0)));
    }

    #[test]
    fn test_place_and_remove() {
        let mut base = Base::new(5, 5, 5);
        base.place_item(boxed("a", (1, 1, 1), (2, 2, 2))).unwrap();
        assert_eq!(base.occupied_count(), 8);
        assert_consistent(&base);

        let removed = base.remove_item("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(base.occupied_count(), 0);
        assert_consistent(&base);
    }

    #[test]
    fn test_failed_place_leaves_base_unchanged() {
        let mut base = Base::new(4, 4, 4);
        base.place_item(boxed("a", (0, 0, 0), (2, 2, 2))).unwrap();
        let before = base.clone();

        let err = base.place_item(boxed("b", (1, 1, 1), (1, 1, 1))).unwrap_err();
        assert!(matches!(err, Error::PlacementConflict { .. }));
        assert_eq!(base, before);

        let err = base.place_item(boxed("c", (3, 0, 0), (2, 1, 1))).unwrap_err();
        assert!(matches!(err, Error::PlacementConflict { .. }));
        assert_eq!(base, before);

        let err = base.place_item(boxed("a", (3, 3, 3), (1, 1, 1))).unwrap_err();
        assert_eq!(err, Error::DuplicateItem("a".into()));
        assert_eq!(base, before);
    }

    #[test]
    fn test_remove_unknown() {
        let mut base = Base::new(2, 2, 2);
        assert_eq!(
            base.remove_item("missing").unwrap_err(),
            Error::NotFound("missing".into())
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut base = Base::new(4, 4, 4);
        base.place_item(boxed("a", (0, 0, 0), (1, 1, 1))).unwrap();

        let mut clone = base.clone();
        clone.remove_item("a").unwrap();
        clone.place_item(boxed("b", (2, 2, 2), (1, 1, 1))).unwrap();

        assert!(base.get("a").is_some());
        assert!(base.get("b").is_none());
        assert!(base.is_position_occupied(&Position::new(0, 0, 0)));
        assert!(!base.is_position_occupied(&Position::new(2, 2, 2)));
        assert_consistent(&base);
        assert_consistent(&clone);
    }

    #[test]
    fn test_free_and_occupied_scans() {
        let mut base = Base::new(2, 1, 2);
        base.place_item(boxed("a", (1, 0, 1), (1, 1, 1))).unwrap();
        assert_eq!(base.occupied_positions(), vec![Position::new(1, 0, 1)]);
        assert_eq!(
            base.free_positions(),
            vec![Position::new(0, 0, 0), Position::new(0, 0, 1), Position::new(1, 0, 0)]
        );
        assert!((base.occupancy_percentage() - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_item_at() {
        let mut base = Base::new(4, 4, 4);
        base.place_item(boxed("a", (1, 0, 1), (2, 1, 1))).unwrap();
        assert_eq!(base.item_at(&Position::new(2, 0, 1)).map(|i| i.id.as_str()), Some("a"));
        assert!(base.item_at(&Position::new(0, 0, 0)).is_none());
        assert!(base.item_at(&Position::new(-1, 0, 0)).is_none());
    }

    #[test]
    fn test_access_positions() {
        let mut base = Base::new(3, 1, 3);
        let hub = boxed("hub", (1, 0, 1), (1, 1, 1));
        base.place_item(hub.clone()).unwrap();
        assert_eq!(
            base.access_positions(&hub),
            vec![
                Position::new(0, 0, 1),
                Position::new(1, 0, 0),
                Position::new(1, 0, 2),
                Position::new(2, 0, 1),
            ]
        );

        let corner = boxed("corner", (0, 0, 0), (1, 1, 1));
        base.place_item(corner.clone()).unwrap();
        assert_eq!(
            base.access_positions(&corner),
            vec![Position::new(0, 0, 1), Position::new(1, 0, 0)]
        );

        let mut full = Base::new(1, 1, 1);
        let filler = boxed("filler", (0, 0, 0), (1, 1, 1));
        full.place_item(filler.clone()).unwrap();
        assert!(full.access_positions(&filler).is_empty());
    }

    #[test]
    fn test_zero_volume_base() {
        let base = Base::new(0, 3, -2);
        assert_eq!(base.volume(), 0);
        assert!(base.free_positions().is_empty());
        assert_eq!(base.occupancy_percentage(), 0.0);
        assert!(!base.can_place_item(&boxed("a", (0, 0, 0), (1, 1, 1))));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_try_new_rejects_overflowing_volume() {
        assert!(matches!(
            Base::try_new(i32::MAX, i32::MAX, i32::MAX),
            Err(Error::ConfigError(_))
        ));
        assert_eq!(Base::try_new(2, 3, -4).map(|b| b.volume()), Ok(0));
        assert_eq!(Base::try_new(2, 3, 4).map(|b| b.volume()), Ok(24));
    }
}
