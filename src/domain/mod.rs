pub mod cells;
pub mod level;
pub mod material;
