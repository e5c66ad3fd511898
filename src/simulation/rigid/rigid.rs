use crate::core::point::Point;
use crate::domain::material::Material;
use crate::systems::rigid_body::{BodyId, RigidBody, SpoutState};
use crate::systems::rigid_body_system::MoveOutcome;

use super::commands::SANDBOX_SPOUT_FLOW;
use super::{DragState, GameStatus, SimulationState};

const STONE_SIZE: i32 = 5;
const STONE_MARGIN: i32 = 5;
const STONE_ATTEMPTS: usize = 8;

pub(super) fn spawn_stone(state: &mut SimulationState) -> Option<BodyId> {
    if !state.settings.sandbox {
        return None;
    }
    let (w, h) = (state.grid.width() as i32, state.grid.height() as i32);
    let span_x = (w - 2 * STONE_MARGIN).max(1) as usize;
    let span_y = (h / 4).max(1) as usize;

    for _ in 0..STONE_ATTEMPTS {
        let x = (STONE_MARGIN + state.rng.index(span_x) as i32).min(w - STONE_SIZE).max(0);
        let y = state.rng.index(span_y) as i32;
        let stone = RigidBody::rectangle(x, y, STONE_SIZE, STONE_SIZE, Material::Iron);
        if let Some(id) = state.bodies.add_body(stone, &mut state.grid) {
            log::debug!("stone {} dropped at {},{}", id, x, y);
            return Some(id);
        }
    }
    None
}

/// Drop hammer. In a level each drop costs one hammer use.
pub(super) fn spawn_hammer(state: &mut SimulationState) -> Option<BodyId> {
    if state.progress.status != GameStatus::Playing {
        return None;
    }
    let level_mode = !state.settings.sandbox;
    if level_mode && state.progress.hammers_left == 0 {
        return None;
    }
    let id = state.bodies.spawn_hammer(&mut state.grid)?;
    if level_mode {
        state.progress.hammers_left -= 1;
    }
    Some(id)
}

pub(super) fn add_spout(state: &mut SimulationState, x: i32, y: i32, material: Material) -> Option<BodyId> {
    if !state.settings.sandbox {
        return None;
    }
    let spout = RigidBody::spout(x, y, SpoutState::new(material, SANDBOX_SPOUT_FLOW, None));
    state.bodies.add_body(spout, &mut state.grid)
}

fn draggable(body: &RigidBody, sandbox: bool) -> bool {
    if body.is_static || body.is_hammer() {
        return false;
    }
    !body.is_spout() || sandbox
}

pub(super) fn begin_drag(state: &mut SimulationState, gx: i32, gy: i32) -> Option<BodyId> {
    if state.progress.status != GameStatus::Playing {
        return None;
    }
    let body = state.bodies.iter().find(|b| b.bbox_contains(gx, gy))?;
    if !draggable(body, state.settings.sandbox) {
        return None;
    }
    let drag = DragState {
        body: body.id,
        grab: Point::new(gx - body.x, gy - body.y),
    };
    state.drag = Some(drag);
    Some(drag.body)
}

pub(super) fn drag_to(state: &mut SimulationState, gx: i32, gy: i32) -> MoveOutcome {
    let Some(drag) = state.drag else {
        return MoveOutcome::Unchanged;
    };
    let (nx, ny) = (gx - drag.grab.x, gy - drag.grab.y);
    match state
        .bodies
        .move_body(drag.body, nx, ny, &mut state.grid, state.rng.as_mut())
    {
        Some(outcome) => outcome,
        None => {
            state.drag = None;
            MoveOutcome::Unchanged
        }
    }
}

pub(super) fn end_drag(state: &mut SimulationState) {
    state.drag = None;
}
