use serde::{Deserialize, Serialize};

use crate::core::random::PcgTieBreak;
use crate::systems::behaviors::{FlowMode, FlowRules};
use crate::systems::rigid_body_system::BottomBoundary;

use super::SimulationState;

pub const DEFAULT_TICK_RATE_HZ: f64 = 60.0;
pub const MAX_COHESION: u8 = 3;

/// Host-tunable simulation settings. Every field has a default, so `{}` is a
/// valid settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimSettings {
    pub flow_mode: FlowMode,
    /// Percent chance a granular particle sits out a tick.
    pub viscosity: f32,
    /// Unsupported cells below a granular particle needed before it falls.
    pub cohesion: u8,
    pub tick_rate_hz: f64,
    pub bottom_boundary: BottomBoundary,
    /// Communicating-vessels leveling of stable water clusters.
    pub leveling: bool,
    pub sandbox: bool,
    /// Seed for the tie-break source; the host clock when absent.
    pub seed: Option<u64>,
}

impl Default for SimSettings {
    fn default() -> Self {
        SimSettings {
            flow_mode: FlowMode::Water,
            viscosity: 0.0,
            cohesion: 0,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            bottom_boundary: BottomBoundary::Contained,
            leveling: false,
            sandbox: false,
            seed: None,
        }
    }
}

impl SimSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: SimSettings =
            serde_json::from_str(json).map_err(|e| format!("invalid settings JSON: {e}"))?;
        Ok(settings.sanitized())
    }

    /// Clamp every knob into its usable range.
    pub fn sanitized(mut self) -> Self {
        self.viscosity = if self.viscosity.is_finite() { self.viscosity.clamp(0.0, 100.0) } else { 0.0 };
        self.cohesion = self.cohesion.min(MAX_COHESION);
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            log::warn!("tick rate {} rejected, using {}", self.tick_rate_hz, DEFAULT_TICK_RATE_HZ);
            self.tick_rate_hz = DEFAULT_TICK_RATE_HZ;
        }
        self
    }

    pub fn flow_rules(&self) -> FlowRules {
        FlowRules {
            mode: self.flow_mode,
            viscosity: self.viscosity,
            cohesion: self.cohesion,
        }
    }

    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.tick_rate_hz
    }
}

pub(super) fn apply_settings(state: &mut SimulationState, settings: SimSettings) {
    let settings = settings.sanitized();
    if settings.seed != state.settings.seed {
        if let Some(seed) = settings.seed {
            state.rng = Box::new(PcgTieBreak::new(seed));
        }
    }
    state.settings = settings;
}

pub(super) fn set_flow_mode(state: &mut SimulationState, mode: FlowMode) {
    state.settings.flow_mode = mode;
    if mode == FlowMode::Granular {
        state.clusters.clear();
    }
}

pub(super) fn set_viscosity(state: &mut SimulationState, percent: f32) {
    state.settings.viscosity = percent;
    state.settings = state.settings.clone().sanitized();
}

pub(super) fn set_cohesion(state: &mut SimulationState, cohesion: u8) {
    state.settings.cohesion = cohesion.min(MAX_COHESION);
}

pub(super) fn set_tick_rate(state: &mut SimulationState, hz: f64) {
    state.settings.tick_rate_hz = hz;
    state.settings = state.settings.clone().sanitized();
}

pub(super) fn set_bottom_boundary(state: &mut SimulationState, boundary: BottomBoundary) {
    state.settings.bottom_boundary = boundary;
}

pub(super) fn set_leveling(state: &mut SimulationState, enabled: bool) {
    state.settings.leveling = enabled;
}

pub(super) fn set_seed(state: &mut SimulationState, seed: u64) {
    state.settings.seed = Some(seed);
    state.rng = Box::new(PcgTieBreak::new(seed));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let settings = SimSettings::from_json("{}").unwrap();
        assert_eq!(settings, SimSettings::default());
        assert!((settings.tick_interval_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn parses_and_clamps() {
        let json = r#"{"flowMode":"granular","viscosity":250,"cohesion":9,
            "tickRateHz":0,"bottomBoundary":"dispose","leveling":true,"seed":7}"#;
        let settings = SimSettings::from_json(json).unwrap();
        assert_eq!(settings.flow_mode, FlowMode::Granular);
        assert_eq!(settings.viscosity, 100.0);
        assert_eq!(settings.cohesion, MAX_COHESION);
        assert_eq!(settings.tick_rate_hz, DEFAULT_TICK_RATE_HZ);
        assert_eq!(settings.bottom_boundary, BottomBoundary::Dispose);
        assert!(settings.leveling);
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(SimSettings::from_json("{\"flowMode\":\"lava\"}").is_err());
        assert!(SimSettings::from_json("not json").is_err());
    }
}
