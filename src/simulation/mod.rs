//! Simulation - the casting table
//!
//! `SimulationState` owns everything a tick touches: the cell grid, the body
//! list, settings, the tie-break source, the cluster cache and level
//! progress. Input handlers only reach the grid through the methods here, so
//! every mutation follows the same remove-before-place discipline as the
//! tick itself.
//!
//! Operations live in the submodules below; this file just wires them up.

use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::core::random::TieBreak;
use crate::domain::level::{LevelData, LevelPack};
use crate::domain::material::Material;
use crate::systems::connectivity::ClusterCache;
use crate::systems::rigid_body::BodyId;
use crate::systems::rigid_body_system::{DestroyOutcome, MoveOutcome, RigidBodySystem};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/tick_stats.rs"]
mod tick_stats;
#[path = "step/clock.rs"]
mod clock;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/solidify.rs"]
mod solidify;
#[path = "rigid/rigid.rs"]
mod rigid;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use clock::FrameClock;
pub use facade::World;
pub use settings::SimSettings;
pub use solidify::SolidifyReport;
pub use tick_stats::TickStats;

use perf_timer::PerfTimer;

pub const DEFAULT_GRID_WIDTH: u32 = 20;
pub const DEFAULT_GRID_HEIGHT: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Target matched, or the pack has no level at the requested index.
    Won,
    /// Every spout ran dry and no molten metal is left.
    Lost,
}

#[derive(Debug, Clone)]
pub struct LevelProgress {
    pub status: GameStatus,
    /// Level number as written in the level data.
    pub level: Option<u32>,
    pub hammers_left: u32,
    /// Body that matched the target, if any.
    pub winner: Option<BodyId>,
}

impl LevelProgress {
    fn fresh() -> Self {
        LevelProgress {
            status: GameStatus::Playing,
            level: None,
            hammers_left: 0,
            winner: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    body: BodyId,
    /// Cursor position relative to the body origin at grab time.
    grab: Point,
}

/// The simulation state
pub struct SimulationState {
    grid: Grid,
    bodies: RigidBodySystem,
    settings: SimSettings,
    rng: Box<dyn TieBreak>,
    clusters: ClusterCache,
    clock: FrameClock,

    level: Option<LevelData>,
    progress: LevelProgress,
    drag: Option<DragState>,

    tick: u64,
    stats: TickStats,
}

impl SimulationState {
    /// Create an empty table with given dimensions
    pub fn new(width: u32, height: u32, settings: SimSettings) -> Self {
        init::create_state(width, height, settings)
    }

    /// Same, with a caller-supplied tie-break source (tests script it).
    pub fn with_tie_break(width: u32, height: u32, settings: SimSettings, rng: Box<dyn TieBreak>) -> Self {
        init::create_state_with_rng(width, height, settings, rng)
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn bodies(&self) -> &RigidBodySystem { &self.bodies }

    pub fn clusters(&self) -> &ClusterCache { &self.clusters }

    pub fn settings(&self) -> &SimSettings { &self.settings }

    pub fn progress(&self) -> &LevelProgress { &self.progress }

    pub fn status(&self) -> GameStatus { self.progress.status }

    pub fn tick_count(&self) -> u64 { self.tick }

    pub fn stats(&self) -> &TickStats { &self.stats }

    pub fn is_sandbox(&self) -> bool { self.settings.sandbox }

    /// Get pointer to the cell tag array (for JS rendering)
    pub fn types_ptr(&self) -> *const u8 {
        self.grid.types_ptr()
    }

    pub fn types_len(&self) -> usize {
        self.grid.size()
    }

    // === SETTINGS ===

    pub fn apply_settings(&mut self, settings: SimSettings) {
        settings::apply_settings(self, settings);
    }

    pub fn set_flow_mode(&mut self, mode: crate::systems::behaviors::FlowMode) {
        settings::set_flow_mode(self, mode);
    }

    pub fn set_viscosity(&mut self, percent: f32) {
        settings::set_viscosity(self, percent);
    }

    pub fn set_cohesion(&mut self, cohesion: u8) {
        settings::set_cohesion(self, cohesion);
    }

    pub fn set_tick_rate(&mut self, hz: f64) {
        settings::set_tick_rate(self, hz);
    }

    pub fn set_bottom_boundary(&mut self, boundary: crate::systems::rigid_body_system::BottomBoundary) {
        settings::set_bottom_boundary(self, boundary);
    }

    pub fn set_leveling(&mut self, enabled: bool) {
        settings::set_leveling(self, enabled);
    }

    pub fn set_seed(&mut self, seed: u64) {
        settings::set_seed(self, seed);
    }

    // === LEVELS ===

    /// Load level `index` from a pack. An index past the end wins the game.
    pub fn load_level(&mut self, pack: &LevelPack, index: usize) -> Result<(), String> {
        commands::load_level(self, pack, index)
    }

    pub fn load_level_data(&mut self, level: &LevelData) -> Result<(), String> {
        commands::load_level_data(self, level)
    }

    pub fn load_sandbox(&mut self) {
        commands::load_sandbox(self)
    }

    /// Restart the current level, or clear the sandbox down to its spouts.
    pub fn reset(&mut self) {
        commands::reset(self)
    }

    // === PARTICLES AND SPOUTS ===

    /// Drop one molten particle into an empty cell
    pub fn add_particle(&mut self, x: i32, y: i32, material: Material) -> bool {
        commands::add_particle(self, x, y, material)
    }

    /// Stage a pour on the `index`-th spout
    pub fn activate_spout(&mut self, index: usize) -> bool {
        commands::activate_spout(self, index)
    }

    pub fn add_spout(&mut self, x: i32, y: i32, material: Material) -> Option<BodyId> {
        rigid::add_spout(self, x, y, material)
    }

    // === SOLIDIFY AND HAMMER ===

    /// Turn every molten cluster into a rigid body and check for a win
    pub fn solidify(&mut self) -> SolidifyReport {
        solidify::solidify(self)
    }

    /// Knock a tile out of a body with the hand hammer
    pub fn hammer_strike(&mut self, id: BodyId, local: Point) -> DestroyOutcome {
        commands::hammer_strike(self, id, local)
    }

    pub fn spawn_hammer(&mut self) -> Option<BodyId> {
        rigid::spawn_hammer(self)
    }

    pub fn spawn_stone(&mut self) -> Option<BodyId> {
        rigid::spawn_stone(self)
    }

    // === DRAGGING ===

    /// Grab the body under the cursor, if it may be dragged
    pub fn begin_drag(&mut self, gx: i32, gy: i32) -> Option<BodyId> {
        rigid::begin_drag(self, gx, gy)
    }

    pub fn drag_to(&mut self, gx: i32, gy: i32) -> MoveOutcome {
        rigid::drag_to(self, gx, gy)
    }

    pub fn end_drag(&mut self) {
        rigid::end_drag(self)
    }

    pub fn dragged_body(&self) -> Option<BodyId> {
        self.drag.map(|d| d.body)
    }

    // === MOLD EDITOR ===

    pub fn paint_preview(&mut self, gx: i32, gy: i32) -> bool {
        commands::paint_preview(self, gx, gy)
    }

    /// Turn painted preview cells into static iron molds
    pub fn finish_molds(&mut self) -> Vec<BodyId> {
        commands::finish_molds(self)
    }

    /// Paint the level's target silhouette as markers with its origin at (ox, oy)
    pub fn preview_target(&mut self, ox: i32, oy: i32) -> usize {
        commands::preview_target(self, ox, oy)
    }

    pub fn clear_previews(&mut self) {
        commands::clear_previews(self)
    }

    // === STEPPING ===

    /// Advance one tick. Returns false when the level is already decided.
    pub fn tick(&mut self) -> bool {
        step::tick(self)
    }

    /// Host frame callback: runs at most one tick when enough time passed
    pub fn frame(&mut self, now_ms: f64) -> bool {
        step::frame(self, now_ms)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
