//! Annealing placement optimizer.
//!
//! A run seeds a layout greedily in priority order, then anneals: each step
//! lifts one optimizer-placed item out of the current layout and greedily
//! re-places it, scores the result with [`score_layout`] and applies the
//! Metropolis rule through the core [`SaRunner`].

use crate::config::OptimizationConfig;
use crate::placement::{sort_by_priority, GreedyPlacer};
use crate::relations::RelationTable;
use crate::result::{OptimizationResult, UnplacedItem};
use crate::scoring::{score_layout, PlacementScore};
use baseiq_core::{Base, Error, Item, Result, SaProblem, SaProgress, SaRunner, SaSolution};
use rand::Rng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A candidate layout.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Base with the placed items.
    pub base: Base,
    /// Items that found no anchor during seeding.
    pub unplaced: Vec<UnplacedItem>,
    /// Score of `base`.
    pub score: PlacementScore,
}

impl SaSolution for Layout {
    fn objective(&self) -> f64 {
        self.score.total
    }

    fn set_objective(&mut self, value: f64) {
        self.score.total = value;
    }
}

/// Annealing problem over item placements.
pub struct PlacementProblem<'a> {
    base: &'a Base,
    /// Items to place, in priority order.
    items: Vec<Item>,
    placer: GreedyPlacer<'a>,
    relations: &'a RelationTable,
    config: &'a OptimizationConfig,
}

impl<'a> PlacementProblem<'a> {
    /// Creates a problem placing `items` into a copy of `base`.
    ///
    /// `items` are sorted by descending priority; equal priorities keep their
    /// input order.
    pub fn new(
        base: &'a Base,
        mut items: Vec<Item>,
        relations: &'a RelationTable,
        config: &'a OptimizationConfig,
    ) -> Self {
        sort_by_priority(&mut items);
        Self {
            base,
            items,
            placer: GreedyPlacer::new(relations).with_isolation_weight(config.isolation_weight),
            relations,
            config,
        }
    }

    /// Items in placement order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Greedy layout in priority order.
    pub fn seed_layout(&self) -> Layout {
        let mut base = self.base.clone();
        let unplaced = self.placer.place_all(&mut base, &self.items);
        log::debug!(
            "Greedy seeding placed {}/{} items ({:.1}% occupied)",
            self.items.len() - unplaced.len(),
            self.items.len(),
            base.occupancy_percentage()
        );
        Layout {
            base,
            unplaced,
            score: PlacementScore::default(),
        }
    }

    /// IDs of requested items currently in `base`, in priority order.
    fn movable_ids<'b>(&'b self, base: &Base) -> Vec<&'b str> {
        self.items
            .iter()
            .filter(|item| base.get(&item.id).is_some())
            .map(|item| item.id.as_str())
            .collect()
    }
}

impl SaProblem for PlacementProblem<'_> {
    type Solution = Layout;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Layout {
        self.seed_layout()
    }

    fn neighbor<R: Rng>(&self, solution: &Layout, rng: &mut R) -> Layout {
        let mut next = solution.clone();
        let movable = self.movable_ids(&next.base);
        if movable.is_empty() {
            return next;
        }

        let id = movable[rng.gen_range(0..movable.len())];
        let Ok(item) = next.base.remove_item(id) else {
            return next;
        };
        if self.placer.place(&mut next.base, &item).is_err() {
            // Its old anchor is free again, so this only restores the layout.
            if next.base.place_item(item).is_err() {
                log::warn!("Could not restore {} after a failed move", id);
            }
        }
        next
    }

    fn evaluate(&self, solution: &mut Layout) {
        solution.score = score_layout(&solution.base, self.relations, self.config);
    }

    fn on_iteration(&self, progress: &SaProgress) {
        if progress.iteration % 100 == 0 {
            log::debug!(
                "Placement iteration {}: temp={:.4}, best={:.4}, current={:.4}",
                progress.iteration,
                progress.temperature,
                progress.best_fitness,
                progress.current_fitness
            );
        }
    }
}

/// Places items into a base and improves the layout by annealing.
#[derive(Debug)]
pub struct PlacementOptimizer {
    base: Base,
    relations: RelationTable,
    cancelled: Arc<AtomicBool>,
}

impl PlacementOptimizer {
    /// Creates an optimizer for `base` with the default relation table.
    ///
    /// Items already in `base` stay fixed; they count towards every score.
    pub fn new(base: Base) -> Self {
        Self {
            base,
            relations: RelationTable::default(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replaces the relation table.
    pub fn with_relations(mut self, relations: RelationTable) -> Self {
        self.relations = relations;
        self
    }

    /// The starting base.
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// The relation table.
    pub fn relations(&self) -> &RelationTable {
        &self.relations
    }

    /// Returns a handle that stops a running optimization when set.
    ///
    /// The flag is cleared when [`optimize_placement`](Self::optimize_placement) starts.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Requests cancellation of a running optimization.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Places `items` into a copy of the base and anneals the layout.
    ///
    /// The starting base is never modified. Items that fit nowhere are
    /// reported in [`OptimizationResult::unplaced`]; they are not an error.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigError`] if `config` fails validation
    /// - [`Error::InvalidItem`] if an item has an empty ID or empty bounds
    /// - [`Error::DuplicateItem`] if two items share an ID, or an item reuses
    ///   the ID of one already in the base
    pub fn optimize_placement(
        &self,
        items: &[Item],
        config: &OptimizationConfig,
    ) -> Result<OptimizationResult> {
        config.validate()?;
        self.validate_items(items)?;

        self.cancelled.store(false, Ordering::Relaxed);

        let problem = PlacementProblem::new(&self.base, items.to_vec(), &self.relations, config);
        let runner = SaRunner::new(config.sa_config(), problem)
            .with_cancel_handle(self.cancelled.clone());
        let run = runner.run_parallel(config.chains, config.random_seed);

        let Layout {
            base,
            unplaced,
            score,
        } = run.best;

        if !unplaced.is_empty() {
            log::warn!(
                "{} of {} items could not be placed: {}",
                unplaced.len(),
                items.len(),
                unplaced
                    .iter()
                    .map(|u| format!("{} ({})", u.item.id, u.reason))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        if run.cancelled {
            log::debug!("Placement cancelled after {} iterations", run.iterations);
        }

        Ok(OptimizationResult {
            base,
            score,
            unplaced,
            iterations: run.iterations,
            accepted: run.accepted,
            final_temperature: run.final_temperature,
            best_history: run.history,
            elapsed: run.elapsed,
            cancelled: run.cancelled,
            chain: run.chain,
        })
    }

    fn validate_items(&self, items: &[Item]) -> Result<()> {
        let mut seen = HashSet::new();
        for item in items {
            item.validate()?;
            if self.base.get(&item.id).is_some() || !seen.insert(item.id.as_str()) {
                return Err(Error::DuplicateItem(item.id.clone()));
            }
        }
        Ok(())
    }
}
