use std::collections::{HashSet, VecDeque};

use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::domain::cells::CellId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    Four,
    Eight,
}

const FOUR: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const EIGHT: [(i32, i32); 8] = [(0, 1), (0, -1), (1, 0), (-1, 0), (1, 1), (-1, -1), (1, -1), (-1, 1)];

impl Neighborhood {
    #[inline]
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Neighborhood::Four => &FOUR,
            Neighborhood::Eight => &EIGHT,
        }
    }
}

/// A maximal connected run of one cell tag.
#[derive(Debug, Clone)]
pub struct Component {
    pub cell: CellId,
    /// Discovery (BFS) order, seed first.
    pub points: Vec<Point>,
}

/// Every component made of cells accepted by `select`. Each component holds
/// a single tag; seeds are taken in row-major order.
pub fn grid_components(
    grid: &Grid,
    neighborhood: Neighborhood,
    select: impl Fn(CellId) -> bool,
) -> Vec<Component> {
    let mut visited = vec![false; grid.size()];
    let mut out = Vec::new();

    for idx in 0..grid.size() {
        let cell = grid.types[idx];
        if visited[idx] || !select(cell) {
            continue;
        }
        let points = flood_from(grid, idx, neighborhood, &mut visited);
        out.push(Component { cell, points });
    }
    out
}

fn flood_from(grid: &Grid, seed: usize, neighborhood: Neighborhood, visited: &mut [bool]) -> Vec<Point> {
    let cell = grid.types[seed];
    let mut points = Vec::new();
    let mut queue = VecDeque::new();
    visited[seed] = true;
    queue.push_back(grid.point_at(seed));

    while let Some(p) = queue.pop_front() {
        points.push(p);
        for &(dx, dy) in neighborhood.offsets() {
            let Some(ni) = grid.index_of(p.x + dx, p.y + dy) else {
                continue;
            };
            if !visited[ni] && grid.types[ni] == cell {
                visited[ni] = true;
                queue.push_back(grid.point_at(ni));
            }
        }
    }
    points
}

/// Components of a free-standing point set (no grid involved).
pub fn point_components(points: &[Point], neighborhood: Neighborhood) -> Vec<Vec<Point>> {
    let members: HashSet<Point> = points.iter().copied().collect();
    let mut visited: HashSet<Point> = HashSet::with_capacity(members.len());
    let mut out = Vec::new();

    for &seed in points {
        if !visited.insert(seed) {
            continue;
        }
        let mut part = Vec::new();
        let mut queue = VecDeque::from([seed]);
        while let Some(p) = queue.pop_front() {
            part.push(p);
            for &(dx, dy) in neighborhood.offsets() {
                let n = p.offset(dx, dy);
                if members.contains(&n) && visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        out.push(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cells::{is_molten, CELL_MOLTEN_BRASS, CELL_MOLTEN_IRON};

    #[test]
    fn diagonal_touch_counts_only_for_eight() {
        let mut grid = Grid::new(4, 4);
        grid.set(0, 0, CELL_MOLTEN_IRON);
        grid.set(1, 1, CELL_MOLTEN_IRON);
        assert_eq!(grid_components(&grid, Neighborhood::Four, is_molten).len(), 2);
        assert_eq!(grid_components(&grid, Neighborhood::Eight, is_molten).len(), 1);
    }

    #[test]
    fn different_tags_never_share_a_component() {
        let mut grid = Grid::new(3, 1);
        grid.set(0, 0, CELL_MOLTEN_IRON);
        grid.set(1, 0, CELL_MOLTEN_BRASS);
        grid.set(2, 0, CELL_MOLTEN_IRON);
        let comps = grid_components(&grid, Neighborhood::Eight, is_molten);
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[1].cell, CELL_MOLTEN_BRASS);
    }

    #[test]
    fn point_sets_split_into_islands() {
        let pts = [Point::new(0, 0), Point::new(1, 0), Point::new(3, 0), Point::new(3, 1)];
        let parts = point_components(&pts, Neighborhood::Four);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1].len(), 2);
    }
}
