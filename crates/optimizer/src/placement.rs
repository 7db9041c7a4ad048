//! Greedy single-item placement.
//!
//! Each item goes to the free anchor with the highest local desirability.
//! Desirability is a per-item estimate and is unrelated to the whole-layout
//! [`PlacementScore`](crate::PlacementScore):
//!
//! - hub items gain `100 / (1 + distance to the base centre)`
//! - every placed item of a related type adds `10 / (1 + distance)`
//! - every placed hub costs 50 if unreachable, otherwise `0.1 x path cost`
//! - with a non-zero isolation weight, every free voxel the footprint would
//!   cut off from the largest free region costs that weight

use crate::relations::RelationTable;
use crate::result::{UnplacedItem, UnplacedReason};
use crate::scoring::{nearest_access, UNREACHABLE_PENALTY};
use baseiq_core::{Base, Item, Position};
use baseiq_pathing::{isolated_voxel_count, Graph};
use std::collections::HashMap;

/// Reward numerator for a hub near the base centre.
pub const HUB_CENTER_REWARD: f64 = 100.0;

/// Reward numerator for each nearby related item.
pub const RELATED_PROXIMITY_REWARD: f64 = 10.0;

/// Multiplier on the path cost to a hub.
pub const ACCESS_COST_FACTOR: f64 = 0.1;

/// Finds and applies greedy placements.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPlacer<'r> {
    relations: &'r RelationTable,
    isolation_weight: f64,
}

/// Path costs between access voxels, memoised for one search.
type RouteCache = HashMap<(Position, Position), Option<f64>>;

impl<'r> GreedyPlacer<'r> {
    /// Creates a placer using `relations`, with the isolation penalty off.
    pub fn new(relations: &'r RelationTable) -> Self {
        Self {
            relations,
            isolation_weight: 0.0,
        }
    }

    /// Sets the per-voxel isolation penalty.
    pub fn with_isolation_weight(mut self, weight: f64) -> Self {
        self.isolation_weight = weight;
        self
    }

    /// Desirability of `candidate` at its current position.
    ///
    /// `graph` must be built over `base` as it was before the candidate is
    /// placed.
    pub fn desirability(&self, graph: &Graph<'_>, candidate: &Item) -> f64 {
        self.desirability_cached(graph, candidate, &mut RouteCache::new())
    }

    fn desirability_cached(&self, graph: &Graph<'_>, candidate: &Item, routes: &mut RouteCache) -> f64 {
        let base = graph.base();
        let mut score = 0.0;

        if self.relations.is_hub(&candidate.item_type) {
            let distance = candidate.position.distance(&base.center());
            score += HUB_CENTER_REWARD / (1.0 + distance);
        }

        let related = self.relations.related(&candidate.item_type);
        for other in base.items().values() {
            if related.contains(&other.item_type) {
                let distance = candidate.position.distance(&other.position);
                score += RELATED_PROXIMITY_REWARD / (1.0 + distance);
            }
        }

        score -= self.access_penalty(graph, candidate, routes);

        if self.isolation_weight > 0.0 {
            let isolated = isolated_voxel_count(base, &candidate.occupied_positions());
            score -= self.isolation_weight * isolated as f64;
        }

        score
    }

    /// Penalty for reaching every placed hub from the candidate.
    fn access_penalty(&self, graph: &Graph<'_>, candidate: &Item, routes: &mut RouteCache) -> f64 {
        let base = graph.base();
        let mut penalty = 0.0;
        for hub in base
            .items()
            .values()
            .filter(|item| self.relations.is_hub(&item.item_type))
        {
            let start = nearest_access(base, candidate, &hub.position);
            let end = nearest_access(base, hub, &candidate.position);
            let cost = match (start, end) {
                (Some(start), Some(end)) => *routes
                    .entry((start, end))
                    .or_insert_with(|| graph.find_path(start, end).ok().map(|p| p.cost)),
                _ => None,
            };
            penalty += match cost {
                Some(cost) => ACCESS_COST_FACTOR * cost,
                None => UNREACHABLE_PENALTY,
            };
        }
        penalty
    }

    /// The most desirable free anchor for `item` in `base`.
    ///
    /// Anchors are tried in scan order and only a strictly better score
    /// replaces the incumbent, so ties go to the first anchor. `None` if the
    /// item fits nowhere.
    pub fn find_best_position(&self, base: &Base, item: &Item) -> Option<Position> {
        let graph = Graph::built(base);
        let mut routes = RouteCache::new();
        let mut best: Option<(Position, f64)> = None;

        for anchor in base.free_positions() {
            if !base.can_place_at(item, anchor) {
                continue;
            }
            let candidate = item.at(anchor);
            let score = self.desirability_cached(&graph, &candidate, &mut routes);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((anchor, score));
            }
        }

        best.map(|(anchor, _)| anchor)
    }

    /// Places one item at its best anchor, or explains why it cannot.
    pub fn place(&self, base: &mut Base, item: &Item) -> Result<Position, UnplacedReason> {
        let fits_volume = item.bounds.width <= base.width()
            && item.bounds.height <= base.height()
            && item.bounds.depth <= base.depth();
        if !fits_volume {
            return Err(UnplacedReason::ExceedsBase);
        }

        let anchor = self
            .find_best_position(base, item)
            .ok_or(UnplacedReason::NoFreeSpace)?;
        base.place_item(item.at(anchor))
            .map_err(|_| UnplacedReason::NoFreeSpace)?;
        Ok(anchor)
    }

    /// Places `items` one by one in the given order.
    ///
    /// Callers sort by priority first. Items that fit nowhere are returned
    /// and leave the base untouched.
    pub fn place_all(&self, base: &mut Base, items: &[Item]) -> Vec<UnplacedItem> {
        let mut unplaced = Vec::new();
        for item in items {
            match self.place(base, item) {
                Ok(anchor) => log::trace!("Placed {} at {}", item.id, anchor),
                Err(reason) => unplaced.push(UnplacedItem {
                    item: item.clone(),
                    reason,
                }),
            }
        }
        unplaced
    }
}

/// Orders items by descending priority, keeping input order among equals.
pub fn sort_by_priority(items: &mut [Item]) {
    items.sort_by_key(|item| std::cmp::Reverse(item.priority));
}
