use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::systems::connectivity::{point_components, Neighborhood};
use crate::systems::rigid_body::{BodyId, RigidBody};

use super::rasterize::clear_body;
use super::system::RigidBodySystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// The struck tile was the body's last cell.
    Destroyed,
    /// The remainder, one new body per 4-connected part.
    Split(Vec<BodyId>),
    /// Unknown body, a spout/hammer/static body, or a local point it lacks.
    Rejected,
}

impl RigidBodySystem {
    /// Knock one tile out of a body.
    ///
    /// The original body is removed and its surviving cells come back as
    /// fresh bodies at the end of the list, keeping material and static flag.
    pub fn destroy_tile(&mut self, id: BodyId, local: Point, grid: &mut Grid) -> DestroyOutcome {
        let Some(idx) = self.index_of(id) else {
            return DestroyOutcome::Rejected;
        };
        let target = &self.bodies[idx];
        if !target.is_workable() || !target.contains_local(local) {
            return DestroyOutcome::Rejected;
        }

        let mut body = self.bodies.remove(idx);
        clear_body(&body, grid);
        body.take_point(local);
        if body.is_empty() {
            return DestroyOutcome::Destroyed;
        }

        let mut parts = Vec::new();
        for part in point_components(body.shape(), Neighborhood::Four) {
            let world: Vec<Point> = part.iter().map(|p| p.offset(body.x, body.y)).collect();
            let piece = RigidBody::from_world_points(&world, body.material, body.is_static);
            if let Some(new_id) = self.reinsert(piece, grid) {
                parts.push(new_id);
            }
        }
        log::debug!("body {} split into {} parts", id, parts.len());
        DestroyOutcome::Split(parts)
    }
}
