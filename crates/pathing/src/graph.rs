//! Navigation graph over the free voxels of a base, with A* search.
//!
//! Nodes are the free voxels; each node links to its free face neighbours.
//! Moving costs the Euclidean step length, times 1.5 when the step changes
//! height, plus a penalty for every occupied voxel around the destination.
//! The graph borrows the base, so occupancy cannot change underneath it;
//! build a new graph after editing the base.

use crate::heap::IndexedMinHeap;
use crate::heuristic::Heuristic;
use baseiq_core::{Base, Error, Position, Result, FACE_OFFSETS};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost multiplier for steps that change the Y coordinate.
pub const VERTICAL_COST_FACTOR: f64 = 1.5;

/// Penalty numerator for each occupied voxel around a destination.
pub const OBSTACLE_PENALTY: f64 = 0.1;

/// A directed connection between two face-adjacent free voxels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Origin voxel.
    pub from: Position,
    /// Destination voxel.
    pub to: Position,
    /// Traversal cost.
    pub cost: f64,
}

/// A route between two voxels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    /// Voxels from start to end, inclusive.
    pub nodes: Vec<Position>,
    /// Sum of Euclidean step lengths.
    pub distance: f64,
    /// Sum of edge costs, including vertical and obstacle penalties.
    pub cost: f64,
}

impl Path {
    /// Number of steps taken.
    pub fn steps(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// First voxel.
    pub fn start(&self) -> Option<Position> {
        self.nodes.first().copied()
    }

    /// Last voxel.
    pub fn end(&self) -> Option<Position> {
        self.nodes.last().copied()
    }
}

/// Search bookkeeping for one voxel during A*.
#[derive(Debug, Clone)]
pub struct Node {
    /// Voxel this node stands for.
    pub position: Position,
    /// Best known cost from the start.
    pub cost: f64,
    /// `cost` plus the heuristic estimate to the goal.
    pub priority: f64,
    /// Index of the predecessor in the search arena; `None` for the start.
    pub parent: Option<usize>,
}

/// Navigation graph for a base.
#[derive(Debug, Clone)]
pub struct Graph<'a> {
    base: &'a Base,
    /// Free voxels in scan order.
    nodes: Vec<Position>,
    index: HashMap<Position, usize>,
    /// Outgoing edges, parallel to `nodes`.
    edges: Vec<Vec<Edge>>,
    heuristic: Heuristic,
}

impl<'a> Graph<'a> {
    /// Creates an empty graph over `base` using the Manhattan heuristic.
    ///
    /// Call [`Graph::build_graph`] before searching.
    pub fn new(base: &'a Base) -> Self {
        Self {
            base,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            heuristic: Heuristic::default(),
        }
    }

    /// Creates and builds a graph over `base`.
    pub fn built(base: &'a Base) -> Self {
        let mut graph = Self::new(base);
        graph.build_graph();
        graph
    }

    /// Sets the heuristic.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Replaces the heuristic.
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    /// The heuristic in use.
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// The base this graph indexes.
    pub fn base(&self) -> &'a Base {
        self.base
    }

    /// Rebuilds nodes and edges from the base's current free voxels.
    pub fn build_graph(&mut self) {
        self.nodes = self.base.free_positions();
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, i))
            .collect();
        self.edges = self
            .nodes
            .iter()
            .map(|&from| {
                self.neighbors(&from)
                    .into_iter()
                    .map(|to| Edge {
                        from,
                        to,
                        cost: self.edge_cost(&from, &to),
                    })
                    .collect()
            })
            .collect();

        log::trace!(
            "Built navigation graph: {} nodes, {} edges",
            self.node_count(),
            self.edge_count()
        );
    }

    /// Free face neighbours of `pos` in the base.
    pub fn neighbors(&self, pos: &Position) -> Vec<Position> {
        FACE_OFFSETS
            .iter()
            .map(|&(dx, dy, dz)| pos.offset(dx, dy, dz))
            .filter(|n| self.base.is_position_free(n))
            .collect()
    }

    /// Cost of stepping from `from` to `to`.
    pub fn edge_cost(&self, from: &Position, to: &Position) -> f64 {
        let mut cost = from.distance(to);
        if from.y != to.y {
            cost *= VERTICAL_COST_FACTOR;
        }
        cost + self.obstacle_penalty(to)
    }

    /// Penalty for the occupied voxels in the 3x3x3 block around `pos`.
    ///
    /// Each occupied in-bounds voxel adds `0.1 / distance`; the boundary of
    /// the base itself is not penalised.
    pub fn obstacle_penalty(&self, pos: &Position) -> f64 {
        let mut penalty = 0.0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let probe = pos.offset(dx, dy, dz);
                    if self.base.is_position_valid(&probe) && self.base.is_position_occupied(&probe) {
                        let distance = ((dx * dx + dy * dy + dz * dz) as f64).sqrt();
                        penalty += OBSTACLE_PENALTY / distance;
                    }
                }
            }
        }
        penalty
    }

    /// Free voxels in scan order.
    pub fn nodes(&self) -> &[Position] {
        &self.nodes
    }

    /// Returns true if `pos` is a node.
    pub fn contains(&self, pos: &Position) -> bool {
        self.index.contains_key(pos)
    }

    /// Outgoing edges of `pos` (empty if it is not a node).
    pub fn edges_from(&self, pos: &Position) -> &[Edge] {
        self.index
            .get(pos)
            .map(|&i| self.edges[i].as_slice())
            .unwrap_or(&[])
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Finds the cheapest path from `start` to `end` with A*.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPosition`] if either endpoint is outside the base
    /// - [`Error::PositionOccupied`] if either endpoint is covered by an item
    /// - [`Error::NoPathFound`] if `end` is unreachable
    pub fn find_path(&self, start: Position, end: Position) -> Result<Path> {
        for pos in [start, end] {
            if !self.base.is_position_valid(&pos) {
                return Err(Error::InvalidPosition(pos));
            }
        }
        for pos in [start, end] {
            if self.base.is_position_occupied(&pos) {
                return Err(Error::PositionOccupied(pos));
            }
        }

        let start_priority = self.heuristic.estimate(&start, &end);
        let mut arena = vec![Node {
            position: start,
            cost: 0.0,
            priority: start_priority,
            parent: None,
        }];
        let mut discovered: HashMap<Position, usize> = HashMap::from([(start, 0)]);
        let mut closed = vec![false];
        let mut open = IndexedMinHeap::new();
        open.push_or_update(0, start_priority);

        while let Some((current, _)) = open.pop() {
            let position = arena[current].position;
            if position == end {
                return Ok(self.reconstruct_path(&arena, current));
            }
            closed[current] = true;

            for edge in self.edges_from(&position) {
                let id = match discovered.get(&edge.to) {
                    Some(&id) => id,
                    None => {
                        arena.push(Node {
                            position: edge.to,
                            cost: f64::INFINITY,
                            priority: f64::INFINITY,
                            parent: None,
                        });
                        closed.push(false);
                        discovered.insert(edge.to, arena.len() - 1);
                        arena.len() - 1
                    }
                };
                if closed[id] {
                    continue;
                }

                let tentative = arena[current].cost + edge.cost;
                if tentative < arena[id].cost {
                    let node = &mut arena[id];
                    node.parent = Some(current);
                    node.cost = tentative;
                    node.priority = tentative + self.heuristic.estimate(&edge.to, &end);
                    open.push_or_update(id, node.priority);
                }
            }
        }

        Err(Error::NoPathFound { start, end })
    }

    /// Walks parent links back from `goal` and re-sums distance and cost.
    ///
    /// Cost is recomputed with [`Graph::edge_cost`] rather than read from the
    /// search bookkeeping.
    pub fn reconstruct_path(&self, arena: &[Node], goal: usize) -> Path {
        let mut nodes = Vec::new();
        let mut cursor = arena.get(goal);
        while let Some(node) = cursor {
            nodes.push(node.position);
            cursor = node.parent.and_then(|parent| arena.get(parent));
        }
        nodes.reverse();

        let (distance, cost) = nodes.windows(2).fold((0.0, 0.0), |(d, c), step| {
            (
                d + step[0].distance(&step[1]),
                c + self.edge_cost(&step[0], &step[1]),
            )
        });

        Path {
            nodes,
            distance,
            cost,
        }
    }
}
