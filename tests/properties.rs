//! Property-based tests for the grid, connectivity and displacement
//!
//! These check invariants over random tables:
//! - shape hashes ignore translation and point order
//! - connected components partition the selected cells
//! - displacement relocates particles without creating or destroying any
//! - a failed move leaves the grid byte-for-byte unchanged

use std::collections::HashSet;

use foundry_engine::cells::*;
use foundry_engine::core::grid::{CellJournal, Grid};
use foundry_engine::core::point::Point;
use foundry_engine::core::random::PcgTieBreak;
use foundry_engine::domain::material::Material;
use foundry_engine::rigid_body::RigidBody;
use foundry_engine::rigid_body_system::{MoveOutcome, RigidBodySystem};
use foundry_engine::systems::connectivity::{grid_components, Neighborhood};
use foundry_engine::systems::displacement::displace_particle;
use foundry_engine::systems::shape_hash::shape_hash;
use proptest::prelude::*;

const W: u32 = 8;
const H: u32 = 8;

fn cell_strategy() -> impl Strategy<Value = CellId> {
    prop_oneof![
        4 => Just(CELL_EMPTY),
        3 => Just(CELL_MOLTEN_IRON),
        2 => Just(CELL_MOLTEN_BRASS),
        1 => Just(CELL_SOLID_IRON),
    ]
}

fn grid_from(cells: &[CellId]) -> Grid {
    let mut grid = Grid::new(W, H);
    grid.types.copy_from_slice(cells);
    grid
}

fn census(grid: &Grid) -> [usize; CELL_COUNT] {
    let mut counts = [0; CELL_COUNT];
    for &c in grid.types.iter() {
        counts[c as usize] += 1;
    }
    counts
}

proptest! {
    #[test]
    fn shape_hash_ignores_translation_and_order(
        raw in prop::collection::hash_set((0i32..10, 0i32..10), 1..20),
        dx in -20i32..20,
        dy in -20i32..20,
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        let moved: Vec<Point> = points.iter().rev().map(|p| p.offset(dx, dy)).collect();
        prop_assert_eq!(shape_hash(&points), shape_hash(&moved));
    }

    #[test]
    fn components_partition_the_selected_cells(cells in prop::collection::vec(cell_strategy(), (W * H) as usize)) {
        let grid = grid_from(&cells);
        for neighborhood in [Neighborhood::Four, Neighborhood::Eight] {
            let components = grid_components(&grid, neighborhood, is_molten);
            let mut seen = HashSet::new();
            for component in components.iter() {
                for p in component.points.iter() {
                    prop_assert_eq!(grid.get(p.x, p.y), Some(component.cell));
                    prop_assert!(seen.insert(*p), "cell {:?} in two components", p);
                }
            }
            prop_assert_eq!(seen.len(), grid.count_where(is_molten));
        }
    }

    #[test]
    fn displacement_conserves_material(
        cells in prop::collection::vec(cell_strategy(), (W * H) as usize),
        bx in 0i32..W as i32,
        by in 0i32..H as i32,
        seed in any::<u64>(),
    ) {
        let mut grid = grid_from(&cells);
        prop_assume!(is_molten(grid.types[grid.index(bx as u32, by as u32)]));

        let before = census(&grid);
        let mover = RigidBody::new(bx, by, vec![Point::new(0, 0)], Material::Iron, false);
        let mut rng = PcgTieBreak::new(seed);
        let mut journal = CellJournal::new();

        if displace_particle(&mut grid, Point::new(bx, by), &mover, &mut rng, &mut journal) {
            prop_assert!(grid.is_empty(bx, by));
            prop_assert_eq!(census(&grid), before);
        } else {
            prop_assert!(journal.is_empty());
            prop_assert_eq!(&grid.types[..], &cells[..]);
        }
    }

    #[test]
    fn failed_moves_change_nothing(
        cells in prop::collection::vec(cell_strategy(), (W * H) as usize),
        bx in 0i32..(W as i32 - 1),
        by in 0i32..(H as i32 - 2),
        seed in any::<u64>(),
    ) {
        let mut grid = grid_from(&cells);
        for (x, y) in [(bx, by), (bx + 1, by), (bx, by + 1), (bx + 1, by + 1)] {
            grid.set(x, y, CELL_EMPTY);
        }
        let mut bodies = RigidBodySystem::new();
        let id = bodies.add_body(RigidBody::rectangle(bx, by, 2, 2, Material::Iron), &mut grid);
        prop_assert!(id.is_some());
        let id = id.unwrap_or_default();

        let before = grid.types.clone();
        let before_census = census(&grid);
        let mut rng = PcgTieBreak::new(seed);
        let outcome = bodies.move_body(id, bx, by + 1, &mut grid, &mut rng);

        match outcome {
            Some(MoveOutcome::Moved) => {
                prop_assert_eq!(census(&grid), before_census);
                prop_assert_eq!(bodies.get(id).map(|b| b.y), Some(by + 1));
            }
            _ => {
                prop_assert_eq!(&grid.types, &before);
                prop_assert_eq!(bodies.get(id).map(|b| (b.x, b.y)), Some((bx, by)));
            }
        }
    }
}
