//! GranularBehavior - "sand mode" molten metal
//!
//! Cohesion model instead of pressure: a particle counts how many of the
//! three cells below it are open (grid edges count as open) and only drops
//! straight down when that count beats `cohesion`. Low cohesion (< 2) still
//! lets it roll off diagonally.

use super::{Behavior, UpdateContext};

pub struct GranularBehavior {
    viscosity: f32,
    cohesion: u8,
}

impl GranularBehavior {
    pub fn new(viscosity: f32, cohesion: u8) -> Self {
        Self { viscosity, cohesion }
    }

    #[inline]
    fn open(&self, ctx: &UpdateContext, x: i32, y: i32) -> bool {
        !ctx.grid.in_bounds(x, y) || ctx.grid.is_empty(x, y)
    }
}

impl Behavior for GranularBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        if ctx.rng.percent() < self.viscosity {
            return false;
        }

        let (x, down) = (ctx.x, ctx.y + 1);
        if !ctx.grid.in_bounds(x, down) {
            return false;
        }

        let below = ctx.grid.is_empty(x, down);
        let left = self.open(ctx, x - 1, down);
        let right = self.open(ctx, x + 1, down);
        let unsupported = below as u8 + left as u8 + right as u8;

        if below && unsupported > self.cohesion {
            ctx.move_to(x, down);
            return true;
        }

        if self.cohesion < 2 {
            // Grid edges count as open for support but are never a destination.
            let dx = ctx.rng.side();
            let open = if dx < 0 { left } else { right };
            if open && ctx.grid.is_empty(x + dx, down) {
                ctx.move_to(x + dx, down);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::super::{update_grid, FlowMode, FlowRules};
    use crate::core::grid::Grid;
    use crate::core::random::SequenceTieBreak;
    use crate::domain::cells::*;

    fn rules(viscosity: f32, cohesion: u8) -> FlowRules {
        FlowRules { mode: FlowMode::Granular, viscosity, cohesion }
    }

    #[test]
    fn full_viscosity_freezes_everything() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 0, CELL_MOLTEN_IRON);
        let mut rng = SequenceTieBreak::constant(true).with_percent(50.0);
        assert_eq!(update_grid(&mut grid, &mut rng, &rules(100.0, 0)), 0);
        assert!(grid.is(1, 0, CELL_MOLTEN_IRON));
    }

    #[test]
    fn high_cohesion_needs_all_three_cells_open() {
        // Left diagonal filled: only two of three open, cohesion 2 holds it.
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, CELL_MOLTEN_IRON);
        grid.set(0, 2, CELL_SOLID_IRON);
        let mut rng = SequenceTieBreak::constant(true);
        update_grid(&mut grid, &mut rng, &rules(0.0, 2));
        assert!(grid.is(1, 1, CELL_MOLTEN_IRON));

        // Clear it and the particle drops.
        grid.set(0, 2, CELL_EMPTY);
        update_grid(&mut grid, &mut rng, &rules(0.0, 2));
        assert!(grid.is(1, 2, CELL_MOLTEN_IRON));
    }

    #[test]
    fn low_cohesion_rolls_off_a_peak() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, CELL_MOLTEN_IRON);
        grid.set(1, 2, CELL_SOLID_IRON);
        // coin=false -> left
        let mut rng = SequenceTieBreak::constant(false);
        update_grid(&mut grid, &mut rng, &rules(0.0, 0));
        assert!(grid.is(0, 2, CELL_MOLTEN_IRON));
    }
}
