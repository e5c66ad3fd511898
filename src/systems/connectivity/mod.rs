//! Connectivity - flood fill over cells and point sets
//!
//! One flood-fill core, four users:
//! - stability classification of loose clusters (8-connected)
//! - solidify: loose clusters -> new bodies (4-connected)
//! - destroy: splitting what is left of a hammered body (4-connected)
//! - merge: gathering touching bondable bodies (4-connected)

mod flood;
mod leveling;
mod stability;

pub use flood::{grid_components, point_components, Component, Neighborhood};
pub use leveling::enforce_leveling;
pub use stability::{classify_clusters, ClusterCache, ClusterKey, ClusterRecord};
