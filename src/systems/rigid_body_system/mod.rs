//! RigidBodySystem - grid-aligned molds, stones, spouts and hammers
//!
//! Bodies are written into the particle grid as solid tags and move one cell
//! at a time. A move clears the old footprint, pushes molten metal out of the
//! new one, then writes the body back; any failure restores the exact prior
//! state.
//!
//! Current behavior:
//! - Gravity: one row per tick, last-added body first.
//! - Destroying a tile splits the remainder into 4-connected bodies.
//! - Brass bodies fuse with touching brass when a new brass body appears.

mod destroy;
mod hammer;
mod merge;
mod movement;
mod rasterize;
mod spouts;
mod system;

pub use destroy::DestroyOutcome;
pub use hammer::{HammerEvent, HAMMER_HEIGHT, HAMMER_WIDTH};
pub use movement::{can_move_down, move_down, move_to, BottomBoundary, MoveLimits, MoveOutcome};
pub use system::{GravityReport, RigidBodySystem};
