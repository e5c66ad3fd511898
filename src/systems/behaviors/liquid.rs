//! LiquidBehavior - "water mode" molten metal
//!
//! Priority per particle:
//! 1. straight down into an empty cell
//! 2. diagonal slump (random side first), refused when the side cell on the
//!    particle's own row is a rigid body, so metal cannot squeeze through a
//!    body's corner
//! 3. horizontal pressure flow: scan one random direction along the row
//!    through same-material cells; if an empty cell ends the run, the whole
//!    run shifts one step toward it

use super::{Behavior, UpdateContext};
use crate::domain::cells::{is_solid, CELL_EMPTY};

pub struct LiquidBehavior;

impl LiquidBehavior {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn can_slump(&self, ctx: &UpdateContext, dx: i32) -> bool {
        let nx = ctx.x + dx;
        if !ctx.grid.is_empty(nx, ctx.y + 1) {
            return false;
        }
        !matches!(ctx.grid.get(nx, ctx.y), Some(c) if is_solid(c))
    }

    /// Pressure flow along the particle's row.
    fn flow_sideways(&self, ctx: &mut UpdateContext) -> bool {
        let dir = ctx.rng.side();
        let material = match ctx.grid.get(ctx.x, ctx.y) {
            Some(c) => c,
            None => return false,
        };
        let max_scan = ctx.grid.width() as i32;

        for i in 1..max_scan {
            let nx = ctx.x + i * dir;
            let Some(cell) = ctx.grid.get(nx, ctx.y) else {
                return false;
            };
            if cell == CELL_EMPTY {
                // The run is uniform, so shifting every link one step toward
                // the gap is the same as moving its first link into the gap.
                ctx.move_to(nx, ctx.y);
                return true;
            }
            if cell != material {
                return false;
            }
        }
        false
    }
}

impl Default for LiquidBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for LiquidBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        let down = ctx.y + 1;

        if ctx.grid.is_empty(ctx.x, down) {
            ctx.move_to(ctx.x, down);
            return true;
        }

        let dir = ctx.rng.side();
        for dx in [dir, -dir] {
            if self.can_slump(ctx, dx) {
                ctx.move_to(ctx.x + dx, down);
                return true;
            }
        }

        self.flow_sideways(ctx)
    }
}
