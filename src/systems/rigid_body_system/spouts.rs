use crate::core::grid::Grid;
use crate::systems::rigid_body::BodyId;

use super::system::RigidBodySystem;

impl RigidBodySystem {
    /// Spout ids in the order they were added.
    pub fn spout_ids(&self) -> Vec<BodyId> {
        self.bodies.iter().filter(|b| b.is_spout()).map(|b| b.id).collect()
    }

    /// Stage a pour on one spout. False when it is busy, dry or not a spout.
    pub fn activate_spout(&mut self, id: BodyId) -> bool {
        self.get_mut(id)
            .and_then(|b| b.spout_state_mut())
            .map(|s| s.activate())
            .unwrap_or(false)
    }

    /// Each flowing spout tries to drop one particle into the cell below it.
    /// Returns how many particles landed.
    pub fn pour_spouts(&mut self, grid: &mut Grid) -> u32 {
        let mut poured = 0;
        for body in self.bodies.iter_mut() {
            let (x, y) = (body.x, body.y + 1);
            let Some(state) = body.spout_state_mut() else {
                continue;
            };
            if !state.wants_to_pour() {
                continue;
            }
            let injected = grid.is_empty(x, y) && grid.set(x, y, state.material.molten_cell());
            state.advance(injected);
            if injected {
                poured += 1;
            }
        }
        poured
    }

    /// True when the level has spouts and every one of them has run dry.
    pub fn spouts_exhausted(&self) -> bool {
        let mut spouts = self.bodies.iter().filter_map(|b| b.spout_state()).peekable();
        spouts.peek().is_some() && spouts.all(|s| !s.has_resource())
    }

    pub fn any_spout_flowing(&self) -> bool {
        self.bodies
            .iter()
            .filter_map(|b| b.spout_state())
            .any(|s| s.flowing)
    }
}
