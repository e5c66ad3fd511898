use std::collections::HashSet;

use crate::core::point::Point;
use crate::domain::cells::{is_molten, CELL_EMPTY};
use crate::domain::material::Material;
use crate::systems::connectivity::{grid_components, Neighborhood};
use crate::systems::rigid_body::{BodyId, RigidBody};
use crate::systems::shape_hash::shape_hash;

use super::{GameStatus, SimulationState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolidifyReport {
    /// Bodies that exist after the pass (merged bodies included).
    pub created: Vec<BodyId>,
    /// The body matching the level target, if one does.
    pub winner: Option<BodyId>,
}

pub(super) fn solidify(state: &mut SimulationState) -> SolidifyReport {
    let mut report = SolidifyReport::default();
    if state.progress.status != GameStatus::Playing {
        return report;
    }

    for component in grid_components(&state.grid, Neighborhood::Four, is_molten) {
        let Some(material) = Material::from_cell(component.cell) else {
            continue;
        };
        for p in component.points.iter() {
            state.grid.set(p.x, p.y, CELL_EMPTY);
        }
        let body = RigidBody::from_world_points(&component.points, material, false);
        if let Some(id) = state.bodies.add_solidified(body, &mut state.grid) {
            report.created.push(id);
        }
    }
    // A later cluster may have fused with an earlier one.
    let mut seen = HashSet::new();
    report.created.retain(|&id| state.bodies.get(id).is_some() && seen.insert(id));

    if !state.settings.sandbox {
        report.winner = find_winner(state, &report.created);
    }
    if let Some(id) = report.winner {
        state.progress.status = GameStatus::Won;
        state.progress.winner = Some(id);
        log::info!("level {:?} complete: body {} matches the target", state.progress.level, id);
    }
    log::debug!("solidified into {} bodies", report.created.len());
    report
}

fn find_winner(state: &SimulationState, candidates: &[BodyId]) -> Option<BodyId> {
    let level = state.level.as_ref()?;
    let target = shape_hash(&level.target_shape);
    candidates.iter().copied().find(|&id| {
        state.bodies.get(id).is_some_and(|body| {
            let points: Vec<Point> = body.world_points().collect();
            body.material == level.target_material && shape_hash(&points) == target
        })
    })
}
