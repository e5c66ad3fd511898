use super::*;

/// Undo log of cell writes. A move that displaces several particles records
/// every write here so a later failure can restore the grid exactly.
#[derive(Default)]
pub struct CellJournal {
    writes: Vec<(usize, CellId)>,
}

impl CellJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Write `cell` at `idx`, remembering the old value.
    #[inline]
    pub fn write(&mut self, grid: &mut Grid, idx: usize, cell: CellId) {
        self.writes.push((idx, grid.types[idx]));
        grid.types[idx] = cell;
    }

    /// Undo every recorded write, newest first.
    pub fn rollback(self, grid: &mut Grid) {
        for (idx, old) in self.writes.into_iter().rev() {
            grid.types[idx] = old;
        }
    }
}
