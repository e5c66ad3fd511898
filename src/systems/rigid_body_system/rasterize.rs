use crate::core::grid::Grid;
use crate::domain::cells::CELL_EMPTY;
use crate::systems::rigid_body::RigidBody;

/// Write the body's footprint into the grid. Off-grid points are skipped.
pub(super) fn place_body(body: &RigidBody, grid: &mut Grid) {
    let cell = body.cell();
    for p in body.world_points() {
        grid.set(p.x, p.y, cell);
    }
}

/// Erase the body's footprint. Only cells still carrying the body's tag are
/// touched, so a stray write elsewhere is never wiped by accident.
pub(super) fn clear_body(body: &RigidBody, grid: &mut Grid) {
    let cell = body.cell();
    for p in body.world_points() {
        if grid.is(p.x, p.y, cell) {
            grid.set(p.x, p.y, CELL_EMPTY);
        }
    }
}
