//! Cell tags
//!
//! Stored as raw `u8` so the host can read the grid straight out of linear
//! memory. Solid tags are only ever written by a rigid body placing itself;
//! markers belong to the editor and never take part in physics.

pub type CellId = u8;

pub const CELL_EMPTY: CellId = 0;
pub const CELL_MOLTEN_IRON: CellId = 1;
pub const CELL_SOLID_IRON: CellId = 2;
pub const CELL_MOLTEN_BRASS: CellId = 3;
pub const CELL_SOLID_BRASS: CellId = 4;
pub const CELL_PREVIEW_MOLD: CellId = 5;
pub const CELL_TARGET_PREVIEW: CellId = 6;

pub const CELL_COUNT: usize = 7;

#[inline]
pub fn is_valid_cell(id: CellId) -> bool {
    (id as usize) < CELL_COUNT
}

/// Loose, physics-simulated material.
#[inline]
pub fn is_molten(id: CellId) -> bool {
    id == CELL_MOLTEN_IRON || id == CELL_MOLTEN_BRASS
}

/// Rigid-body material.
#[inline]
pub fn is_solid(id: CellId) -> bool {
    id == CELL_SOLID_IRON || id == CELL_SOLID_BRASS
}

/// Editor-only markers.
#[inline]
pub fn is_marker(id: CellId) -> bool {
    id == CELL_PREVIEW_MOLD || id == CELL_TARGET_PREVIEW
}

/// Cells a moving body may never enter (its own footprint excepted).
/// Markers are painted over.
#[inline]
pub fn blocks_body(id: CellId) -> bool {
    is_solid(id)
}
