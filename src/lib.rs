//! Foundry Engine - molten-metal casting puzzle core in WASM
//!
//! Architecture:
//! - core/          - Grid storage, points, tie-break randomness
//! - domain/        - Cell tags, materials, level data
//! - systems/       - Particle rules, connectivity, displacement, bodies
//! - simulation/    - State, tick orchestration, commands, WASM facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths for the most used modules
pub use crate::core::grid;
pub use domain::cells;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }

    web_sys::console::log_1(&"Foundry engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use simulation::{GameStatus, SimSettings, SimulationState, World};

// Export cell tags for JS
#[wasm_bindgen]
pub fn cell_empty() -> u8 { cells::CELL_EMPTY }
#[wasm_bindgen]
pub fn cell_molten_iron() -> u8 { cells::CELL_MOLTEN_IRON }
#[wasm_bindgen]
pub fn cell_solid_iron() -> u8 { cells::CELL_SOLID_IRON }
#[wasm_bindgen]
pub fn cell_molten_brass() -> u8 { cells::CELL_MOLTEN_BRASS }
#[wasm_bindgen]
pub fn cell_solid_brass() -> u8 { cells::CELL_SOLID_BRASS }
#[wasm_bindgen]
pub fn cell_preview_mold() -> u8 { cells::CELL_PREVIEW_MOLD }
#[wasm_bindgen]
pub fn cell_target_preview() -> u8 { cells::CELL_TARGET_PREVIEW }
