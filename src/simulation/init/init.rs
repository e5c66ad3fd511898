use crate::core::grid::Grid;
use crate::core::random::{PcgTieBreak, TieBreak};
use crate::systems::connectivity::ClusterCache;
use crate::systems::rigid_body_system::RigidBodySystem;

use super::settings::SimSettings;
use super::{FrameClock, LevelProgress, SimulationState, TickStats};

pub(super) fn create_state(width: u32, height: u32, settings: SimSettings) -> SimulationState {
    let rng: Box<dyn TieBreak> = match settings.seed {
        Some(seed) => Box::new(PcgTieBreak::new(seed)),
        None => Box::new(PcgTieBreak::from_clock()),
    };
    create_state_with_rng(width, height, settings, rng)
}

pub(super) fn create_state_with_rng(
    width: u32,
    height: u32,
    settings: SimSettings,
    rng: Box<dyn TieBreak>,
) -> SimulationState {
    SimulationState {
        grid: Grid::new(width, height),
        bodies: RigidBodySystem::new(),
        settings: settings.sanitized(),
        rng,
        clusters: ClusterCache::new(),
        clock: FrameClock::new(),
        level: None,
        progress: LevelProgress::fresh(),
        drag: None,
        tick: 0,
        stats: TickStats::default(),
    }
}
