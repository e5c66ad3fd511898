//! Core - storage and primitives shared by every system
//!
//! - grid/    - cell storage, bounds, previous-tick snapshot, write journal
//! - point    - integer grid coordinates
//! - random   - tie-break randomness seam (seedable in tests)

pub mod grid;
pub mod point;
pub mod random;
