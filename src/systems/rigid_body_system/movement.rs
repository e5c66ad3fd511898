//! Movement - one-cell body moves with particle displacement
//!
//! `move_to` is atomic: it either commits the new position with every
//! overlapped particle relocated, or leaves grid and position exactly as
//! they were. Remove-before-place is the only way a footprint changes.

use serde::{Deserialize, Serialize};

use crate::core::grid::{CellJournal, Grid};
use crate::core::point::Point;
use crate::core::random::TieBreak;
use crate::domain::cells::{blocks_body, is_molten};
use crate::systems::displacement::displace_particle;
use crate::systems::rigid_body::RigidBody;

use super::rasterize::{clear_body, place_body};

/// What happens at the bottom edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BottomBoundary {
    /// The bottom row is a floor.
    #[default]
    Contained,
    /// Bodies may fall through and are despawned once fully below the grid.
    Dispose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveLimits {
    pub below_bottom: bool,
    pub above_top: bool,
}

impl MoveLimits {
    pub const CONTAINED: MoveLimits = MoveLimits { below_bottom: false, above_top: false };

    pub fn for_boundary(boundary: BottomBoundary) -> Self {
        MoveLimits {
            below_bottom: boundary == BottomBoundary::Dispose,
            above_top: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Target equals the current position.
    Unchanged,
    /// Bounding box would leave the grid.
    OutOfBounds,
    /// Another body (or an editor marker) holds a target cell.
    Blocked,
    /// A particle in the way had nowhere to go; everything was rolled back.
    Trapped,
}

impl MoveOutcome {
    #[inline]
    pub fn moved(self) -> bool {
        self == MoveOutcome::Moved
    }
}

fn within_limits(body: &RigidBody, nx: i32, ny: i32, grid: &Grid, limits: MoveLimits) -> bool {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    if nx < 0 || nx + body.width() > w {
        return false;
    }
    if ny < 0 && !limits.above_top {
        return false;
    }
    if ny + body.height() > h && !limits.below_bottom {
        return false;
    }
    true
}

pub fn move_to(
    body: &mut RigidBody,
    nx: i32,
    ny: i32,
    grid: &mut Grid,
    rng: &mut dyn TieBreak,
    limits: MoveLimits,
) -> MoveOutcome {
    if body.x == nx && body.y == ny {
        return MoveOutcome::Unchanged;
    }
    if !within_limits(body, nx, ny, grid, limits) {
        return MoveOutcome::OutOfBounds;
    }

    for p in body.world_points_at(nx, ny) {
        if let Some(cell) = grid.get(p.x, p.y) {
            if blocks_body(cell) && !body.contains_global_point(p.x, p.y) {
                return MoveOutcome::Blocked;
            }
        }
    }

    let (ox, oy) = (body.x, body.y);
    clear_body(body, grid);
    body.x = nx;
    body.y = ny;

    let overlapped: Vec<Point> = body
        .world_points()
        .filter(|p| matches!(grid.get(p.x, p.y), Some(c) if is_molten(c)))
        .collect();

    let mut journal = CellJournal::new();
    for p in overlapped {
        if !matches!(grid.get(p.x, p.y), Some(c) if is_molten(c)) {
            continue;
        }
        if !displace_particle(grid, p, body, rng, &mut journal) {
            journal.rollback(grid);
            body.x = ox;
            body.y = oy;
            place_body(body, grid);
            return MoveOutcome::Trapped;
        }
    }

    place_body(body, grid);
    MoveOutcome::Moved
}

/// Whether every cell under the body is free of other bodies.
pub fn can_move_down(body: &RigidBody, grid: &Grid, limits: MoveLimits) -> bool {
    if !limits.below_bottom && body.y + body.height() >= grid.height() as i32 {
        return false;
    }
    for p in body.world_points() {
        let (bx, by) = (p.x, p.y + 1);
        if body.contains_global_point(bx, by) {
            continue;
        }
        if let Some(cell) = grid.get(bx, by) {
            if blocks_body(cell) {
                return false;
            }
        }
    }
    true
}

pub fn move_down(body: &mut RigidBody, grid: &mut Grid, rng: &mut dyn TieBreak, limits: MoveLimits) -> MoveOutcome {
    if !can_move_down(body, grid, limits) {
        return MoveOutcome::Blocked;
    }
    let (x, y) = (body.x, body.y + 1);
    move_to(body, x, y, grid, rng, limits)
}
