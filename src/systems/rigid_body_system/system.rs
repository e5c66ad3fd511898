use crate::core::grid::Grid;
use crate::core::random::TieBreak;
use crate::domain::cells::is_solid;
use crate::systems::rigid_body::{BodyId, RigidBody};

use super::movement::{move_down, move_to, BottomBoundary, MoveLimits, MoveOutcome};
use super::rasterize::{clear_body, place_body};

/// Manages all rigid bodies in the simulation.
///
/// Order matters: gravity walks the list back to front, so bodies added later
/// settle first.
pub struct RigidBodySystem {
    pub(super) bodies: Vec<RigidBody>,
    next_id: BodyId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityReport {
    pub moved: u32,
    pub despawned: u32,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a new rigid body.
    ///
    /// Returns `None` if the body is empty or any of its cells is off-grid or
    /// already occupied.
    pub fn add_body(&mut self, mut body: RigidBody, grid: &mut Grid) -> Option<BodyId> {
        if body.is_empty() {
            return None;
        }
        let fits = body
            .world_points()
            .all(|p| grid.in_bounds(p.x, p.y) && grid.is_empty(p.x, p.y));
        if !fits {
            log::debug!("body rejected at {},{}: footprint not free", body.x, body.y);
            return None;
        }

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        body.id = id;

        place_body(&body, grid);
        self.bodies.push(body);
        Some(id)
    }

    /// Remove a rigid body by ID, erasing its cells.
    pub fn remove_body(&mut self, id: BodyId, grid: &mut Grid) -> Option<RigidBody> {
        let idx = self.index_of(id)?;
        let body = self.bodies.remove(idx);
        clear_body(&body, grid);
        Some(body)
    }

    /// Remove all bodies.
    pub fn clear(&mut self, grid: &mut Grid) {
        for body in self.bodies.iter() {
            clear_body(body, grid);
        }
        self.bodies.clear();
        self.next_id = 1;
    }

    /// Drop everything except spouts (sandbox reset).
    pub fn retain_spouts(&mut self, grid: &mut Grid) {
        for body in self.bodies.iter().filter(|b| !b.is_spout()) {
            clear_body(body, grid);
        }
        self.bodies.retain(|b| b.is_spout());
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter()
    }

    #[inline]
    pub(super) fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn get(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Body whose footprint covers the given world cell.
    pub fn body_at(&self, gx: i32, gy: i32) -> Option<BodyId> {
        self.bodies
            .iter()
            .find(|b| b.contains_global_point(gx, gy))
            .map(|b| b.id)
    }

    /// Move one body to a new origin, pushing molten metal aside.
    pub fn move_body(
        &mut self,
        id: BodyId,
        nx: i32,
        ny: i32,
        grid: &mut Grid,
        rng: &mut dyn TieBreak,
    ) -> Option<MoveOutcome> {
        let idx = self.index_of(id)?;
        Some(move_to(&mut self.bodies[idx], nx, ny, grid, rng, MoveLimits::CONTAINED))
    }

    /// One row of gravity for every falling body, last-added first.
    ///
    /// `held` is skipped (the body under the player's cursor). With a
    /// disposing floor, bodies that end up entirely below the grid are
    /// removed.
    pub fn step_gravity(
        &mut self,
        grid: &mut Grid,
        rng: &mut dyn TieBreak,
        held: Option<BodyId>,
        boundary: BottomBoundary,
    ) -> GravityReport {
        let limits = MoveLimits::for_boundary(boundary);
        let mut report = GravityReport::default();

        for idx in (0..self.bodies.len()).rev() {
            let body = &mut self.bodies[idx];
            if Some(body.id) == held || !body.falls() {
                continue;
            }
            if move_down(body, grid, rng, limits).moved() {
                report.moved += 1;
            }
        }

        if boundary == BottomBoundary::Dispose {
            let floor = grid.height() as i32;
            let before = self.bodies.len();
            self.bodies.retain(|b| !(b.falls() && b.y >= floor));
            report.despawned = (before - self.bodies.len()) as u32;
            if report.despawned > 0 {
                log::debug!("{} bodies fell off the grid", report.despawned);
            }
        }
        report
    }

    /// Check that the grid and the body list agree: every solid cell belongs
    /// to exactly one body of that material, and every on-grid body cell
    /// carries the body's tag.
    pub fn footprints_consistent(&self, grid: &Grid) -> bool {
        let mut owners = vec![0u8; grid.size()];
        for body in self.bodies.iter() {
            for p in body.world_points() {
                let Some(idx) = grid.index_of(p.x, p.y) else {
                    continue;
                };
                if grid.types[idx] != body.cell() {
                    return false;
                }
                owners[idx] = owners[idx].saturating_add(1);
            }
        }
        grid.types
            .iter()
            .zip(owners.iter())
            .all(|(&cell, &n)| if is_solid(cell) { n == 1 } else { n == 0 })
    }

    pub(super) fn reinsert(&mut self, body: RigidBody, grid: &mut Grid) -> Option<BodyId> {
        let id = self.add_body(body, grid);
        if id.is_none() {
            log::warn!("rebuilt body could not be placed; its cells are lost");
        }
        id
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}
