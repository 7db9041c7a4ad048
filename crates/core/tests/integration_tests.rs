//! Integration tests for baseiq-core.

use baseiq_core::{Base, BoundingBox, Error, Item, ItemType, Position, VoxelBounds};

fn item(id: &str, pos: (i32, i32, i32), bounds: (i32, i32, i32)) -> Item {
    Item::new(id, ItemType::STORAGE, BoundingBox::new(bounds.0, bounds.1, bounds.2))
        .with_position(Position::from(pos))
}

/// Occupancy equals the union of item footprints, voxel for voxel.
fn assert_grid_matches_items(base: &Base) {
    for pos in base.positions() {
        let covered = base.items().values().filter(|i| i.covers(&pos)).count();
        assert!(covered <= 1, "{} covered by {} items", pos, covered);
        assert_eq!(base.is_position_occupied(&pos), covered == 1, "mismatch at {}", pos);
    }
}

mod spatial_model {
    use super::*;

    #[test]
    fn test_grid_tracks_every_mutation() {
        let mut base = Base::new(6, 3, 6);
        let script = [
            ("a", (0, 0, 0), (2, 2, 2)),
            ("b", (1, 1, 1), (2, 1, 1)),
            ("c", (2, 0, 0), (3, 1, 3)),
            ("d", (5, 0, 5), (1, 3, 1)),
            ("e", (4, 2, 4), (3, 1, 1)),
        ];
        for (id, pos, bounds) in script {
            let _ = base.place_item(item(id, pos, bounds));
            assert_grid_matches_items(&base);
        }
        assert_eq!(base.item_count(), 3);

        base.remove_item("c").unwrap();
        assert_grid_matches_items(&base);
        base.place_item(item("b", (1, 1, 2), (2, 1, 1))).unwrap();
        assert_grid_matches_items(&base);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut original = Base::new(4, 2, 4);
        original.place_item(item("a", (0, 0, 0), (2, 1, 2))).unwrap();

        let mut copy = original.clone();
        copy.remove_item("a").unwrap();
        copy.place_item(item("a", (2, 1, 2), (2, 1, 2))).unwrap();

        assert_eq!(original.get("a").map(|i| i.position), Some(Position::ORIGIN));
        assert_eq!(copy.get("a").map(|i| i.position), Some(Position::new(2, 1, 2)));
        assert_grid_matches_items(&original);
        assert_grid_matches_items(&copy);
    }

    #[test]
    fn test_boundary_footprints() {
        let mut base = Base::new(3, 3, 3);
        assert!(base.can_place_item(&item("fits", (1, 1, 1), (2, 2, 2))));
        assert!(!base.can_place_item(&item("spills", (2, 2, 2), (2, 1, 1))));
        assert!(!base.can_place_item(&item("below", (0, -1, 0), (1, 1, 1))));
        assert_eq!(
            base.place_item(item("spills", (2, 2, 2), (2, 1, 1))),
            Err(Error::PlacementConflict {
                id: "spills".into(),
                position: Position::new(2, 2, 2),
            })
        );
        assert_eq!(base.occupied_count(), 0);
    }

    #[test]
    fn test_occupancy_reporting() {
        let mut base = Base::new(4, 1, 5);
        base.place_item(item("a", (0, 0, 0), (2, 1, 2))).unwrap();
        base.place_item(item("b", (3, 0, 4), (1, 1, 1))).unwrap();

        assert_eq!(base.occupied_positions().len(), 5);
        assert_eq!(base.free_positions().len(), 15);
        assert!((base.occupancy_percentage() - 25.0).abs() < 1e-10);
        assert_eq!(base.center(), Position::new(2, 0, 2));
    }
}

mod geometry {
    use super::*;

    #[test]
    fn test_item_bounds_enclose_layout() {
        let items = [item("a", (0, 0, 0), (2, 1, 1)), item("b", (3, 1, 2), (1, 2, 1))];
        let bounds = items
            .iter()
            .map(Item::voxel_bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap();

        assert_eq!(bounds.min, Position::ORIGIN);
        assert_eq!(bounds.max, Position::new(3, 2, 2));
        assert_eq!(bounds.volume(), 4 * 3 * 3);
        assert_eq!(VoxelBounds::from_voxels(Vec::new()), None);
    }

    #[test]
    fn test_intersection_matches_grid() {
        let mut base = Base::new(6, 6, 6);
        let a = item("a", (1, 1, 1), (3, 2, 2));
        base.place_item(a.clone()).unwrap();

        for x in 0..5 {
            for z in 0..5 {
                let probe = item("p", (x, 1, z), (2, 1, 2));
                assert_eq!(probe.intersects(&a), !base.can_place_item(&probe), "probe at {x},{z}");
            }
        }
    }
}
