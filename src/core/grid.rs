//! Grid - flat row-major cell storage
//!
//! One `CellId` per cell plus a `previous` copy taken once per tick before
//! anything moves. The previous copy is read-only outside
//! `snapshot_previous` and only feeds stability classification.

use crate::domain::cells::{CellId, CELL_EMPTY};

mod indexing;
mod access;
mod snapshot;
mod journal;

pub use journal::CellJournal;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    pub types: Vec<CellId>,
    pub previous: Vec<CellId>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            types: vec![CELL_EMPTY; size],
            previous: vec![CELL_EMPTY; size],
        }
    }

    /// Reset every cell (and the snapshot) to empty.
    pub fn clear(&mut self) {
        self.types.fill(CELL_EMPTY);
        self.previous.fill(CELL_EMPTY);
    }

    /// Pointer to the cell tags (for host-side rendering).
    pub fn types_ptr(&self) -> *const CellId {
        self.types.as_ptr()
    }
}
