//! Behaviors - per-cell rules for loose molten metal
//!
//! Two interchangeable rule sets, picked by configuration:
//! - `LiquidBehavior`: gravity, diagonal slump, horizontal pressure flow
//! - `GranularBehavior`: viscosity skip + cohesion-gated falling
//!
//! The sweep writes moves immediately. Rows go bottom to top so a particle
//! that falls is not picked up again in the same tick.

mod granular;
mod liquid;

pub use granular::GranularBehavior;
pub use liquid::LiquidBehavior;

use serde::{Deserialize, Serialize};

use crate::core::grid::Grid;
use crate::core::random::TieBreak;
use crate::domain::cells::is_molten;

/// Update context passed to behaviors
pub struct UpdateContext<'a> {
    pub grid: &'a mut Grid,
    pub rng: &'a mut dyn TieBreak,
    pub x: i32,
    pub y: i32,
}

impl<'a> UpdateContext<'a> {
    /// Move the current particle to `(tx, ty)`. Caller has checked the target.
    #[inline]
    pub fn move_to(&mut self, tx: i32, ty: i32) {
        let from = self.grid.index(self.x as u32, self.y as u32);
        let to = self.grid.index(tx as u32, ty as u32);
        self.grid.move_cell(from, to);
    }
}

/// Behavior trait - returns true when the particle moved
pub trait Behavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    #[default]
    Water,
    Granular,
}

/// Tunables for one sweep.
#[derive(Debug, Clone, Copy)]
pub struct FlowRules {
    pub mode: FlowMode,
    /// Percent chance a granular particle sticks for the tick.
    pub viscosity: f32,
    /// Open cells below (out of three) a granular particle tolerates before falling.
    pub cohesion: u8,
}

impl Default for FlowRules {
    fn default() -> Self {
        Self { mode: FlowMode::Water, viscosity: 0.0, cohesion: 0 }
    }
}

/// One sweep over the grid. Returns how many particles moved.
pub fn update_grid(grid: &mut Grid, rng: &mut dyn TieBreak, rules: &FlowRules) -> u32 {
    let liquid = LiquidBehavior::new();
    let granular = GranularBehavior::new(rules.viscosity, rules.cohesion);
    let behavior: &dyn Behavior = match rules.mode {
        FlowMode::Water => &liquid,
        FlowMode::Granular => &granular,
    };

    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut moved = 0;

    // The bottom row cannot fall any further.
    for y in (0..height - 1).rev() {
        for x in 0..width {
            let idx = grid.index(x as u32, y as u32);
            if !is_molten(grid.types[idx]) {
                continue;
            }
            let mut ctx = UpdateContext { grid: &mut *grid, rng: &mut *rng, x, y };
            if behavior.update(&mut ctx) {
                moved += 1;
            }
        }
    }
    moved
}
