//! Communicating vessels. Off unless the settings enable it.
//!
//! For the first stable cluster (by key) that has a particle below its top
//! row with an empty cell straight above, lift one such particle by a row.
//! At most one particle per tick, which keeps the effect gradual; the lift
//! itself makes the cluster unstable until it settles again.

use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::core::random::TieBreak;

use super::stability::ClusterCache;

pub fn enforce_leveling(grid: &mut Grid, clusters: &ClusterCache, rng: &mut dyn TieBreak) -> bool {
    for record in clusters.sorted() {
        if !record.is_stable {
            continue;
        }
        let top = record.top_row();
        let candidates: Vec<Point> = record
            .particles
            .iter()
            .copied()
            .filter(|p| p.y > top && grid.is_empty(p.x, p.y - 1))
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let from = candidates[rng.index(candidates.len())];
        let (Some(fi), Some(ti)) = (grid.index_of(from.x, from.y), grid.index_of(from.x, from.y - 1)) else {
            continue;
        };
        grid.move_cell(fi, ti);
        return true;
    }
    false
}
