//! RigidBody - a connected set of cells that moves as one unit
//!
//! Shape points are local (relative to the body's top-left origin) and
//! unique. One entity type covers every role; role-specific state lives in
//! `BodyKind` instead of a type hierarchy.

mod body;
mod kind;

pub use body::{BodyId, RigidBody};
pub use kind::{BodyKind, HammerPhase, SpoutState};
