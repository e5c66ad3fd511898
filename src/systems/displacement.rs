//! Displacement - making room for a moving body
//!
//! Breadth-first search from the blocked particle through cells of its own
//! material until an empty cell outside the mover's new footprint turns up.
//! The chain along the parent links then shifts one step toward that cell
//! and the origin is cleared, so particles are relocated, never created or
//! destroyed. Every write goes through the caller's journal so a move that
//! fails later can be undone.

use std::collections::{HashMap, VecDeque};

use crate::core::grid::{CellJournal, Grid};
use crate::core::point::Point;
use crate::core::random::TieBreak;
use crate::domain::cells::{is_molten, CELL_EMPTY};
use crate::systems::rigid_body::RigidBody;

const DIRS: [(i32, i32); 8] = [(0, 1), (-1, 1), (1, 1), (-1, 0), (1, 0), (-1, -1), (1, -1), (0, -1)];

/// Push the particle at `start` out of `mover`'s way.
///
/// Returns false when the particle is trapped (no reachable empty cell);
/// the grid is untouched in that case.
pub fn displace_particle(
    grid: &mut Grid,
    start: Point,
    mover: &RigidBody,
    rng: &mut dyn TieBreak,
    journal: &mut CellJournal,
) -> bool {
    let Some(origin) = grid.index_of(start.x, start.y) else {
        return false;
    };
    let material = grid.types[origin];
    if !is_molten(material) {
        return false;
    }

    let mut dirs = DIRS;
    rng.shuffle(&mut dirs);

    let mut visited = vec![false; grid.size()];
    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut queue = VecDeque::from([origin]);
    visited[origin] = true;
    let mut destination = None;

    'search: while let Some(cur) = queue.pop_front() {
        let p = grid.point_at(cur);
        for &(dx, dy) in dirs.iter() {
            let (nx, ny) = (p.x + dx, p.y + dy);
            let Some(ni) = grid.index_of(nx, ny) else {
                continue;
            };
            if visited[ni] {
                continue;
            }
            visited[ni] = true;

            let cell = grid.types[ni];
            if cell == CELL_EMPTY && !mover.contains_global_point(nx, ny) {
                parent.insert(ni, cur);
                destination = Some(ni);
                break 'search;
            } else if cell == material {
                parent.insert(ni, cur);
                queue.push_back(ni);
            }
        }
    }

    let Some(mut cur) = destination else {
        log::trace!("particle at {},{} is trapped", start.x, start.y);
        return false;
    };

    while cur != origin {
        let Some(&prev) = parent.get(&cur) else {
            break;
        };
        let moved = grid.types[prev];
        journal.write(grid, cur, moved);
        cur = prev;
    }
    journal.write(grid, origin, CELL_EMPTY);
    true
}
