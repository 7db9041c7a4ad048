//! Whole-layout scoring.
//!
//! Every function here is pure and recomputes from scratch; the optimizer
//! calls [`score_layout`] once per candidate layout.

use crate::config::OptimizationConfig;
use crate::relations::RelationTable;
use baseiq_core::{Base, Error, Item, Position, Result, VoxelBounds};
use baseiq_pathing::{Graph, Path};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reward numerator for a reachable item.
pub const REACHABLE_REWARD: f64 = 100.0;

/// Flat penalty for an item the hub cannot reach.
pub const UNREACHABLE_PENALTY: f64 = 50.0;

/// Reward numerator for each related pair.
pub const RELATED_PAIR_REWARD: f64 = 20.0;

/// Score of a layout.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementScore {
    /// Weighted sum of the component scores.
    pub total: f64,
    /// Hub accessibility.
    pub pathfinding: f64,
    /// Related-item proximity.
    pub efficiency: f64,
    /// Item volume over bounding volume.
    pub compactness: f64,
    /// Named breakdown.
    pub details: BTreeMap<String, f64>,
}

/// The voxel of `item`'s access set nearest to `toward`.
///
/// Ties go to the first voxel in scan order.
pub fn nearest_access(base: &Base, item: &Item, toward: &Position) -> Option<Position> {
    base.access_positions(item)
        .into_iter()
        .min_by(|a, b| a.distance(toward).total_cmp(&b.distance(toward)))
}

/// Cheapest route from `from` to `to` between their facing access voxels.
///
/// Fails with [`Error::NoPathFound`] if either item has no free face or the
/// access voxels are not connected.
pub fn route_between(graph: &Graph<'_>, from: &Item, to: &Item) -> Result<Path> {
    let base = graph.base();
    let start = nearest_access(base, from, &to.position);
    let end = nearest_access(base, to, &from.position);
    match (start, end) {
        (Some(start), Some(end)) => graph.find_path(start, end),
        _ => Err(Error::NoPathFound {
            start: from.position,
            end: to.position,
        }),
    }
}

/// The hub item: the first hub-typed item in ID order.
pub fn find_hub<'b>(base: &'b Base, relations: &RelationTable) -> Option<&'b Item> {
    base.items()
        .values()
        .find(|item| relations.is_hub(&item.item_type))
}

/// Accessibility of every item from the hub.
///
/// Adds `100 / (1 + cost)` per reachable item and subtracts 50 per
/// unreachable one. Zero without a hub. Also returns the unreachable count.
pub fn pathfinding_score(graph: &Graph<'_>, relations: &RelationTable) -> (f64, usize) {
    let base = graph.base();
    let Some(hub) = find_hub(base, relations) else {
        return (0.0, 0);
    };

    let mut score = 0.0;
    let mut unreachable = 0;
    for item in base.items().values().filter(|item| item.id != hub.id) {
        match route_between(graph, hub, item) {
            Ok(path) => score += REACHABLE_REWARD / (1.0 + path.cost),
            Err(_) => {
                score -= UNREACHABLE_PENALTY;
                unreachable += 1;
            }
        }
    }
    (score, unreachable)
}

/// Proximity of related items.
///
/// Adds `20 / (1 + distance)` for every ordered pair `(a, b)` where `b`'s
/// type is related to `a`'s.
pub fn efficiency_score(base: &Base, relations: &RelationTable) -> f64 {
    let items = base.items();
    let mut score = 0.0;
    for a in items.values() {
        let related = relations.related(&a.item_type);
        if related.is_empty() {
            continue;
        }
        for b in items.values() {
            if a.id != b.id && related.contains(&b.item_type) {
                score += RELATED_PAIR_REWARD / (1.0 + a.position.distance(&b.position));
            }
        }
    }
    score
}

/// Total item volume over the volume of the box enclosing all items.
///
/// Zero when nothing is placed.
pub fn compactness_score(base: &Base) -> f64 {
    let items = base.items();
    let Some(bounds) = VoxelBounds::from_voxels(items.values().flat_map(|i| {
        let b = i.voxel_bounds();
        [b.min, b.max]
    })) else {
        return 0.0;
    };

    let enclosing = bounds.volume();
    if enclosing <= 0 {
        return 0.0;
    }
    let filled: i64 = items.values().map(|i| i.bounds.volume()).sum();
    filled as f64 / enclosing as f64
}

/// Scores a layout with the weights in `config`.
pub fn score_layout(
    base: &Base,
    relations: &RelationTable,
    config: &OptimizationConfig,
) -> PlacementScore {
    let graph = Graph::built(base);
    let (pathfinding, unreachable) = pathfinding_score(&graph, relations);
    let efficiency = efficiency_score(base, relations);
    let compactness = compactness_score(base);

    let total = config.pathfinding_weight * pathfinding
        + config.efficiency_weight * efficiency
        + config.compactness_weight * compactness;

    let details = BTreeMap::from([
        ("pathfinding".to_string(), pathfinding),
        ("efficiency".to_string(), efficiency),
        ("compactness".to_string(), compactness),
        ("unreachable_items".to_string(), unreachable as f64),
        ("occupancy_percentage".to_string(), base.occupancy_percentage()),
    ]);

    PlacementScore {
        total,
        pathfinding,
        efficiency,
        compactness,
        details,
    }
}
