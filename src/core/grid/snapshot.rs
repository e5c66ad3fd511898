use super::*;

impl Grid {
    /// Copy the current cells into `previous`. Called once per tick, before
    /// bodies or particles move.
    pub fn snapshot_previous(&mut self) {
        self.previous.copy_from_slice(&self.types);
    }

    #[inline]
    pub fn previous_at(&self, x: i32, y: i32) -> Option<CellId> {
        self.index_of(x, y).map(|i| self.previous[i])
    }

    pub fn count(&self, cell: CellId) -> usize {
        self.types.iter().filter(|&&c| c == cell).count()
    }

    pub fn count_where(&self, pred: impl Fn(CellId) -> bool) -> usize {
        self.types.iter().filter(|&&c| pred(c)).count()
    }

    pub fn any(&self, pred: impl Fn(CellId) -> bool) -> bool {
        self.types.iter().any(|&c| pred(c))
    }
}
