use super::*;

impl Grid {
    /// Cell tag, `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<CellId> {
        self.index_of(x, y).map(|i| self.types[i])
    }

    /// True only for in-bounds empty cells.
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(CELL_EMPTY)
    }

    #[inline]
    pub fn is(&self, x: i32, y: i32, cell: CellId) -> bool {
        self.get(x, y) == Some(cell)
    }

    /// Write a cell. Out-of-bounds writes are dropped and reported as `false`.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: CellId) -> bool {
        match self.index_of(x, y) {
            Some(i) => {
                self.types[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Move a cell's content to another cell, leaving the source empty.
    #[inline]
    pub fn move_cell(&mut self, from: usize, to: usize) {
        self.types[to] = self.types[from];
        self.types[from] = CELL_EMPTY;
    }
}
