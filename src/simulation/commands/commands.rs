use crate::core::point::Point;
use crate::domain::cells::{is_marker, is_solid, CELL_EMPTY, CELL_PREVIEW_MOLD, CELL_TARGET_PREVIEW};
use crate::domain::level::{LevelData, LevelPack};
use crate::domain::material::Material;
use crate::systems::connectivity::{grid_components, Neighborhood};
use crate::systems::rigid_body::{BodyId, RigidBody, SpoutState};
use crate::systems::rigid_body_system::DestroyOutcome;

use super::{GameStatus, LevelProgress, SimulationState};

/// Positions of the two spouts a fresh sandbox starts with.
const SANDBOX_SPOUTS: [(i32, i32, Material); 2] = [(4, 1, Material::Iron), (15, 1, Material::Brass)];

/// Particles a sandbox spout pours per activation.
pub(super) const SANDBOX_SPOUT_FLOW: u32 = 50;

fn wipe(state: &mut SimulationState) {
    state.bodies.clear(&mut state.grid);
    state.grid.clear();
    state.clusters.clear();
    state.clock.reset();
    state.drag = None;
    state.tick = 0;
}

pub(super) fn load_level(state: &mut SimulationState, pack: &LevelPack, index: usize) -> Result<(), String> {
    let Some(level) = pack.get(index) else {
        wipe(state);
        state.level = None;
        state.settings.sandbox = false;
        state.progress = LevelProgress::fresh();
        state.progress.status = GameStatus::Won;
        log::info!("no level at index {}: pack complete", index);
        return Ok(());
    };
    load_level_data(state, level)
}

pub(super) fn load_level_data(state: &mut SimulationState, level: &LevelData) -> Result<(), String> {
    level.validate_shapes()?;
    level.validate_for_grid(state.grid.width(), state.grid.height())?;

    wipe(state);
    state.settings.sandbox = false;
    state.progress = LevelProgress {
        status: GameStatus::Playing,
        level: Some(level.level),
        hammers_left: level.max_hammers,
        winner: None,
    };

    for mold in level.starting_molds.iter() {
        let body = RigidBody::new(mold.x, mold.y, mold.shape.clone(), mold.material, mold.is_static);
        if state.bodies.add_body(body, &mut state.grid).is_none() {
            log::warn!("level {}: mold at {},{} overlaps or leaves the grid", level.level, mold.x, mold.y);
        }
    }
    for spout in level.spouts.iter() {
        let body = RigidBody::spout(
            spout.pos.x,
            spout.pos.y,
            SpoutState::new(spout.material, spout.flow, Some(spout.max)),
        );
        if state.bodies.add_body(body, &mut state.grid).is_none() {
            log::warn!("level {}: spout at {},{} is blocked", level.level, spout.pos.x, spout.pos.y);
        }
    }

    state.level = Some(level.clone());
    log::info!(
        "loaded level {} ({} molds, {} spouts, {} hammers)",
        level.level,
        level.starting_molds.len(),
        level.spouts.len(),
        level.max_hammers
    );
    Ok(())
}

pub(super) fn load_sandbox(state: &mut SimulationState) {
    wipe(state);
    state.level = None;
    state.settings.sandbox = true;
    state.progress = LevelProgress::fresh();

    let max_x = state.grid.width() as i32 - 1;
    for (x, y, material) in SANDBOX_SPOUTS {
        let x = x.min(max_x).max(0);
        let body = RigidBody::spout(x, y, SpoutState::new(material, SANDBOX_SPOUT_FLOW, None));
        if state.bodies.add_body(body, &mut state.grid).is_none() {
            log::warn!("sandbox spout at {},{} does not fit", x, y);
        }
    }
    log::info!("sandbox loaded");
}

pub(super) fn reset(state: &mut SimulationState) {
    if state.settings.sandbox {
        state.bodies.retain_spouts(&mut state.grid);
        for cell in state.grid.types.iter_mut() {
            if *cell != CELL_EMPTY && !is_solid(*cell) {
                *cell = CELL_EMPTY;
            }
        }
        for id in state.bodies.spout_ids() {
            if let Some(spout) = state.bodies.get_mut(id).and_then(|b| b.spout_state_mut()) {
                spout.flowing = false;
                spout.to_pour = 0;
            }
        }
        state.clusters.clear();
        state.drag = None;
        state.progress = LevelProgress::fresh();
        return;
    }

    if let Some(level) = state.level.clone() {
        if let Err(e) = load_level_data(state, &level) {
            log::warn!("reload of level {} failed: {}", level.level, e);
        }
    }
}

pub(super) fn add_particle(state: &mut SimulationState, x: i32, y: i32, material: Material) -> bool {
    if state.progress.status != GameStatus::Playing || !state.grid.is_empty(x, y) {
        return false;
    }
    state.grid.set(x, y, material.molten_cell())
}

pub(super) fn activate_spout(state: &mut SimulationState, index: usize) -> bool {
    if state.progress.status != GameStatus::Playing {
        return false;
    }
    let Some(&id) = state.bodies.spout_ids().get(index) else {
        return false;
    };
    let activated = state.bodies.activate_spout(id);
    if activated {
        log::debug!("spout {} pouring", index);
    }
    activated
}

pub(super) fn hammer_strike(state: &mut SimulationState, id: BodyId, local: Point) -> DestroyOutcome {
    if state.progress.status != GameStatus::Playing {
        return DestroyOutcome::Rejected;
    }
    let level_mode = !state.settings.sandbox;
    if level_mode && state.progress.hammers_left == 0 {
        log::debug!("hammer refused: no uses left");
        return DestroyOutcome::Rejected;
    }

    let outcome = state.bodies.destroy_tile(id, local, &mut state.grid);
    if outcome != DestroyOutcome::Rejected {
        if level_mode {
            state.progress.hammers_left -= 1;
        }
        if state.drag.map(|d| d.body) == Some(id) {
            state.drag = None;
        }
        log::debug!("hammer on body {} at {},{}: {:?}", id, local.x, local.y, outcome);
    }
    outcome
}

pub(super) fn paint_preview(state: &mut SimulationState, gx: i32, gy: i32) -> bool {
    if !state.settings.sandbox || !state.grid.is_empty(gx, gy) {
        return false;
    }
    state.grid.set(gx, gy, CELL_PREVIEW_MOLD)
}

pub(super) fn finish_molds(state: &mut SimulationState) -> Vec<BodyId> {
    let components = grid_components(&state.grid, Neighborhood::Four, |c| c == CELL_PREVIEW_MOLD);
    let mut created = Vec::with_capacity(components.len());
    for component in components {
        for p in component.points.iter() {
            state.grid.set(p.x, p.y, CELL_EMPTY);
        }
        let mold = RigidBody::from_world_points(&component.points, Material::Iron, true);
        if let Some(id) = state.bodies.add_body(mold, &mut state.grid) {
            created.push(id);
        }
    }
    log::debug!("mold editor produced {} molds", created.len());
    created
}

pub(super) fn preview_target(state: &mut SimulationState, ox: i32, oy: i32) -> usize {
    let Some(level) = state.level.as_ref() else {
        return 0;
    };
    let mut painted = 0;
    for p in level.target_shape.iter() {
        let (x, y) = (ox + p.x, oy + p.y);
        if state.grid.is_empty(x, y) && state.grid.set(x, y, CELL_TARGET_PREVIEW) {
            painted += 1;
        }
    }
    painted
}

pub(super) fn clear_previews(state: &mut SimulationState) {
    for cell in state.grid.types.iter_mut() {
        if is_marker(*cell) {
            *cell = CELL_EMPTY;
        }
    }
}
