//! Stability classification of loose clusters
//!
//! A cluster (8-connected, one material) is unstable when either
//! - a particle just arrived: its cell was empty in the previous snapshot
//!   and molten metal sat directly or diagonally above it, or
//! - it hides a submerged void: below the cluster's top row, a particle has
//!   an empty down/side/down-diagonal neighbour that is itself below the
//!   top row.
//!
//! Recomputed from scratch every tick. The cache only carries identity
//! (keyed by the row-then-column-minimal particle) for leveling.

use std::collections::HashMap;

use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::domain::cells::{is_molten, CellId, CELL_EMPTY};

use super::flood::{grid_components, Neighborhood};

/// Packed `y * width + x` of the cluster's top-left particle.
pub type ClusterKey = u32;

const SUBMERGED_PROBES: [(i32, i32); 5] = [(0, 1), (1, 0), (-1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone)]
pub struct ClusterRecord {
    pub key: ClusterKey,
    pub cell: CellId,
    /// Sorted by row, then column.
    pub particles: Vec<Point>,
    pub is_stable: bool,
}

impl ClusterRecord {
    #[inline]
    pub fn top_row(&self) -> i32 {
        self.particles.first().map(|p| p.y).unwrap_or(0)
    }
}

pub fn classify_clusters(grid: &Grid) -> Vec<ClusterRecord> {
    grid_components(grid, Neighborhood::Eight, is_molten)
        .into_iter()
        .map(|comp| {
            let mut particles = comp.points;
            particles.sort_by_key(|p| (p.y, p.x));
            let head = particles[0];
            let key = grid.index(head.x as u32, head.y as u32) as ClusterKey;
            let is_stable = !particles.iter().any(|p| just_fell(grid, *p))
                && !has_submerged_void(grid, &particles, head.y);
            ClusterRecord { key, cell: comp.cell, particles, is_stable }
        })
        .collect()
}

fn just_fell(grid: &Grid, p: Point) -> bool {
    if grid.previous_at(p.x, p.y) != Some(CELL_EMPTY) {
        return false;
    }
    (-1..=1).any(|dx| matches!(grid.previous_at(p.x + dx, p.y - 1), Some(c) if is_molten(c)))
}

fn has_submerged_void(grid: &Grid, particles: &[Point], top_row: i32) -> bool {
    particles.iter().filter(|p| p.y > top_row).any(|p| {
        SUBMERGED_PROBES.iter().any(|&(dx, dy)| {
            let (nx, ny) = (p.x + dx, p.y + dy);
            ny > top_row && grid.is_empty(nx, ny)
        })
    })
}

/// Per-tick cluster table.
#[derive(Default)]
pub struct ClusterCache {
    records: HashMap<ClusterKey, ClusterRecord>,
}

impl ClusterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table with this tick's clusters.
    pub fn refresh(&mut self, grid: &Grid) {
        self.records = classify_clusters(grid).into_iter().map(|r| (r.key, r)).collect();
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: ClusterKey) -> Option<&ClusterRecord> {
        self.records.get(&key)
    }

    pub fn stable_count(&self) -> usize {
        self.records.values().filter(|r| r.is_stable).count()
    }

    /// Records ordered by key, so callers see a stable order.
    pub fn sorted(&self) -> Vec<&ClusterRecord> {
        let mut out: Vec<&ClusterRecord> = self.records.values().collect();
        out.sort_by_key(|r| r.key);
        out
    }

    /// Whether the particle at `(x, y)` belongs to a cluster marked stable.
    pub fn is_stable_at(&self, x: i32, y: i32) -> bool {
        let p = Point::new(x, y);
        self.records
            .values()
            .any(|r| r.is_stable && r.particles.binary_search_by_key(&(p.y, p.x), |q| (q.y, q.x)).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cells::{CELL_MOLTEN_IRON, CELL_SOLID_IRON};

    fn basin(width: u32, height: u32) -> Grid {
        let mut grid = Grid::new(width, height);
        for x in 0..width as i32 {
            grid.set(x, height as i32 - 1, CELL_SOLID_IRON);
        }
        grid
    }

    #[test]
    fn resting_flat_pool_is_stable() {
        let mut grid = basin(4, 3);
        for x in 0..4 {
            grid.set(x, 1, CELL_MOLTEN_IRON);
        }
        grid.snapshot_previous();
        let clusters = classify_clusters(&grid);
        assert_eq!(clusters.len(), 1);
        assert!(clusters[0].is_stable);
        assert_eq!(clusters[0].key, grid.index(0, 1) as ClusterKey);
    }

    #[test]
    fn fresh_arrival_is_unstable() {
        let mut grid = basin(3, 3);
        grid.set(1, 0, CELL_MOLTEN_IRON);
        grid.snapshot_previous();
        // The particle falls from (1,0) to (1,1) this tick.
        grid.set(1, 0, CELL_EMPTY);
        grid.set(1, 1, CELL_MOLTEN_IRON);
        let clusters = classify_clusters(&grid);
        assert!(!clusters[0].is_stable);
    }

    #[test]
    fn submerged_pocket_is_unstable() {
        // Column of metal with air beside its middle:
        //   . M .
        //   . M .    <- (0,1) and (2,1) empty and below the top row
        //   S M S
        //   S S S
        let mut grid = Grid::new(3, 4);
        for x in 0..3 {
            grid.set(x, 3, CELL_SOLID_IRON);
        }
        grid.set(0, 2, CELL_SOLID_IRON);
        grid.set(2, 2, CELL_SOLID_IRON);
        for y in 0..3 {
            grid.set(1, y, CELL_MOLTEN_IRON);
        }
        grid.snapshot_previous();
        let clusters = classify_clusters(&grid);
        assert_eq!(clusters.len(), 1);
        assert!(!clusters[0].is_stable);
    }

    #[test]
    fn cache_drops_vanished_clusters() {
        let mut grid = basin(5, 3);
        grid.set(0, 1, CELL_MOLTEN_IRON);
        grid.set(4, 1, CELL_MOLTEN_IRON);
        grid.snapshot_previous();
        let mut cache = ClusterCache::new();
        cache.refresh(&grid);
        assert_eq!(cache.len(), 2);
        assert!(cache.is_stable_at(4, 1));

        grid.set(4, 1, CELL_EMPTY);
        cache.refresh(&grid);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(grid.index(0, 1) as ClusterKey).is_some());
    }
}
