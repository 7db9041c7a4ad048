//! Connected regions of free space.
//!
//! Two free voxels share a region when a chain of face-adjacent free voxels
//! joins them. Free voxels outside the largest region are cut off from the
//! rest of the base; the optimizer can penalise layouts that strand space.

use baseiq_core::{Base, Position, FACE_OFFSETS};
use std::collections::{HashSet, VecDeque};

/// Free-space regions of a base, largest first.
#[derive(Debug, Clone, Default)]
pub struct FreeRegions {
    regions: Vec<Vec<Position>>,
    free: usize,
}

impl FreeRegions {
    /// Flood-fills the free voxels of `base`.
    pub fn compute(base: &Base) -> Self {
        Self::compute_with_blocked(base, &[])
    }

    /// Flood-fills the free voxels of `base`, treating `blocked` as occupied.
    ///
    /// Used to ask what the free space would look like if an item were
    /// placed, without cloning the base.
    pub fn compute_with_blocked(base: &Base, blocked: &[Position]) -> Self {
        let blocked: HashSet<Position> = blocked.iter().copied().collect();
        let is_open = |p: &Position| base.is_position_free(p) && !blocked.contains(p);

        let mut visited: HashSet<Position> = HashSet::new();
        let mut regions = Vec::new();
        let mut free = 0;

        for seed in base.positions() {
            if !is_open(&seed) || visited.contains(&seed) {
                continue;
            }

            let mut region = Vec::new();
            let mut queue = VecDeque::from([seed]);
            visited.insert(seed);
            while let Some(pos) = queue.pop_front() {
                region.push(pos);
                for &(dx, dy, dz) in FACE_OFFSETS.iter() {
                    let next = pos.offset(dx, dy, dz);
                    if is_open(&next) && visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }

            free += region.len();
            region.sort_unstable();
            regions.push(region);
        }

        // Stable: equal-sized regions keep scan order of their first voxel.
        regions.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { regions, free }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if there is no free space.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions, largest first. Each region is sorted in scan order.
    pub fn regions(&self) -> &[Vec<Position>] {
        &self.regions
    }

    /// The largest region.
    pub fn largest(&self) -> Option<&[Position]> {
        self.regions.first().map(Vec::as_slice)
    }

    /// Total free voxels across all regions.
    pub fn free_count(&self) -> usize {
        self.free
    }

    /// Free voxels outside the largest region.
    pub fn isolated_count(&self) -> usize {
        self.free - self.largest().map_or(0, <[Position]>::len)
    }

    /// Index of the region containing `pos`.
    pub fn region_of(&self, pos: &Position) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| r.binary_search(pos).is_ok())
    }

    /// Returns true if both voxels are free and in the same region.
    pub fn connected(&self, a: &Position, b: &Position) -> bool {
        match (self.region_of(a), self.region_of(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }
}

/// Free voxels that would be cut off from the largest region if `footprint`
/// were occupied.
pub fn isolated_voxel_count(base: &Base, footprint: &[Position]) -> usize {
    FreeRegions::compute_with_blocked(base, footprint).isolated_count()
}
