//! Systems - everything that mutates the grid during a tick
//!
//! - behaviors/          - per-cell update rules for loose molten metal
//! - rigid_body/         - the body entity and its roles (spout, hammer)
//! - rigid_body_system/  - body list, placement, movement, hammer, merge
//! - connectivity/       - flood fill, stability classification, leveling
//! - displacement        - pushing particles out of a moving body's way
//! - shape_hash          - canonical fingerprint for win matching

pub mod behaviors;
pub mod connectivity;
pub mod displacement;
pub mod rigid_body;
pub mod rigid_body_system;
pub mod shape_hash;
