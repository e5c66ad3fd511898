use crate::domain::cells::is_molten;
use crate::systems::behaviors::{update_grid, FlowMode};
use crate::systems::connectivity::enforce_leveling;
use crate::systems::rigid_body_system::HammerEvent;

use super::{GameStatus, PerfTimer, SimulationState, TickStats};

pub(super) fn tick(state: &mut SimulationState) -> bool {
    if state.progress.status != GameStatus::Playing {
        return false;
    }
    let timer = PerfTimer::start();
    let mut stats = TickStats::default();

    state.grid.snapshot_previous();

    // === RIGID BODIES ===
    // Bodies move before particles so loose metal reacts to their new spots.
    let held = state.drag.map(|d| d.body);
    let gravity = state.bodies.step_gravity(
        &mut state.grid,
        state.rng.as_mut(),
        held,
        state.settings.bottom_boundary,
    );
    stats.bodies_moved = gravity.moved;

    for event in state.bodies.step_hammers(&mut state.grid, state.rng.as_mut()) {
        if let HammerEvent::Struck { target, outcome } = event {
            log::debug!("drop hammer hit body {}: {:?}", target, outcome);
        }
    }
    if let Some(drag) = state.drag {
        if state.bodies.get(drag.body).is_none() {
            state.drag = None;
        }
    }

    // === PARTICLES ===
    let rules = state.settings.flow_rules();
    stats.particles_moved = update_grid(&mut state.grid, state.rng.as_mut(), &rules);

    if rules.mode == FlowMode::Water {
        state.clusters.refresh(&state.grid);
        if state.settings.leveling {
            enforce_leveling(&mut state.grid, &state.clusters, state.rng.as_mut());
        }
        stats.cluster_count = state.clusters.len() as u32;
        stats.stable_clusters = state.clusters.stable_count() as u32;
    }

    // === SPOUTS ===
    stats.poured = state.bodies.pour_spouts(&mut state.grid);

    check_loss(state);

    state.tick += 1;
    stats.molten_count = state.grid.count_where(is_molten) as u32;
    stats.body_count = state.bodies.body_count() as u32;
    stats.tick_ms = timer.elapsed_ms();
    state.stats = stats;
    true
}

/// A level is lost once every spout is dry and no molten metal is left.
fn check_loss(state: &mut SimulationState) {
    if state.settings.sandbox || state.progress.status != GameStatus::Playing {
        return;
    }
    if state.bodies.spouts_exhausted() && !state.grid.any(is_molten) {
        state.progress.status = GameStatus::Lost;
        log::info!("level {:?} lost: out of metal", state.progress.level);
    }
}

pub(super) fn frame(state: &mut SimulationState, now_ms: f64) -> bool {
    let interval = state.settings.tick_interval_ms();
    if state.clock.frame(now_ms, interval) {
        tick(state)
    } else {
        false
    }
}
