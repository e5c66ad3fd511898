use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::core::point::Point;
use crate::domain::level::LevelPack;
use crate::domain::material::Material;
use crate::systems::rigid_body::{BodyKind, RigidBody};
use crate::systems::rigid_body_system::DestroyOutcome;

use super::settings::SimSettings;
use super::tick_stats::TickStats;
use super::{GameStatus, SimulationState};

#[wasm_bindgen]
pub struct GridLayout {
    types_ptr: u32,
    types_len_bytes: u32,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl GridLayout {
    #[wasm_bindgen(getter)]
    pub fn types_ptr(&self) -> u32 { self.types_ptr }
    #[wasm_bindgen(getter)]
    pub fn types_len_bytes(&self) -> u32 { self.types_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.width }
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.height }
}

/// What the host needs to draw a body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BodyView<'a> {
    id: u32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    material: Material,
    is_static: bool,
    kind: &'static str,
    shape: &'a [Point],
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining: Option<u32>,
    flowing: bool,
}

impl<'a> From<&'a RigidBody> for BodyView<'a> {
    fn from(body: &'a RigidBody) -> Self {
        let (kind, remaining, flowing) = match &body.kind {
            BodyKind::Free => ("free", None, false),
            BodyKind::Spout(s) => ("spout", s.remaining, s.flowing),
            BodyKind::Hammer(_) => ("hammer", None, false),
        };
        BodyView {
            id: body.id,
            x: body.x,
            y: body.y,
            width: body.width(),
            height: body.height(),
            material: body.material,
            is_static: body.is_static,
            kind,
            shape: body.shape(),
            remaining,
            flowing,
        }
    }
}

fn parse_material(name: &str) -> Result<Material, JsValue> {
    name.parse().map_err(|e: String| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub struct World {
    state: SimulationState,
    pack: Option<LevelPack>,
    level_index: usize,
}

#[wasm_bindgen]
impl World {
    /// Create a table with given dimensions and default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: SimulationState::new(width, height, SimSettings::default()),
            pack: None,
            level_index: 0,
        }
    }

    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(width: u32, height: u32, settings_json: String) -> Result<World, JsValue> {
        let settings = SimSettings::from_json(&settings_json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            state: SimulationState::new(width, height, settings),
            pack: None,
            level_index: 0,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.state.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.state.height() }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 { self.state.tick_count() }

    /// 0 = playing, 1 = won, 2 = lost
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        match self.state.status() {
            GameStatus::Playing => 0,
            GameStatus::Won => 1,
            GameStatus::Lost => 2,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn hammers_left(&self) -> u32 { self.state.progress().hammers_left }

    /// Level number of the loaded level, -1 in sandbox or past the last level
    #[wasm_bindgen(getter)]
    pub fn level_number(&self) -> i64 {
        self.state.progress().level.map(i64::from).unwrap_or(-1)
    }

    /// Body that matched the target, 0 when none
    #[wasm_bindgen(getter)]
    pub fn winner(&self) -> u32 { self.state.progress().winner.unwrap_or(0) }

    #[wasm_bindgen(getter)]
    pub fn is_sandbox(&self) -> bool { self.state.is_sandbox() }

    pub fn apply_settings(&mut self, json: String) -> Result<(), JsValue> {
        let settings = SimSettings::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        self.state.apply_settings(settings);
        Ok(())
    }

    // === LEVELS ===

    /// Parse a level pack; returns the number of levels
    pub fn load_levels(&mut self, json: String) -> Result<u32, JsValue> {
        let pack = LevelPack::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        let count = pack.len() as u32;
        self.pack = Some(pack);
        Ok(count)
    }

    pub fn load_level(&mut self, index: usize) -> Result<(), JsValue> {
        let Some(pack) = self.pack.as_ref() else {
            return Err(JsValue::from_str("no level pack loaded"));
        };
        self.state.load_level(pack, index).map_err(|e| JsValue::from_str(&e))?;
        self.level_index = index;
        Ok(())
    }

    pub fn next_level(&mut self) -> Result<(), JsValue> {
        self.load_level(self.level_index + 1)
    }

    pub fn load_sandbox(&mut self) {
        self.state.load_sandbox();
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    // === INPUT ===

    pub fn add_particle(&mut self, x: i32, y: i32, material: String) -> Result<bool, JsValue> {
        Ok(self.state.add_particle(x, y, parse_material(&material)?))
    }

    pub fn activate_spout(&mut self, index: usize) -> bool {
        self.state.activate_spout(index)
    }

    /// Sandbox spout; returns the body ID (0 when refused)
    pub fn add_spout(&mut self, x: i32, y: i32, material: String) -> Result<u32, JsValue> {
        Ok(self.state.add_spout(x, y, parse_material(&material)?).unwrap_or(0))
    }

    /// Returns the number of bodies created
    pub fn solidify(&mut self) -> u32 {
        self.state.solidify().created.len() as u32
    }

    /// -1 = rejected, 0 = destroyed, n = split into n bodies
    pub fn hammer_strike(&mut self, id: u32, local_x: i32, local_y: i32) -> i32 {
        match self.state.hammer_strike(id, Point::new(local_x, local_y)) {
            DestroyOutcome::Rejected => -1,
            DestroyOutcome::Destroyed => 0,
            DestroyOutcome::Split(parts) => parts.len() as i32,
        }
    }

    pub fn spawn_hammer(&mut self) -> u32 {
        self.state.spawn_hammer().unwrap_or(0)
    }

    pub fn spawn_stone(&mut self) -> u32 {
        self.state.spawn_stone().unwrap_or(0)
    }

    pub fn begin_drag(&mut self, gx: i32, gy: i32) -> u32 {
        self.state.begin_drag(gx, gy).unwrap_or(0)
    }

    pub fn drag_to(&mut self, gx: i32, gy: i32) -> bool {
        self.state.drag_to(gx, gy).moved()
    }

    pub fn end_drag(&mut self) {
        self.state.end_drag();
    }

    pub fn paint_preview(&mut self, gx: i32, gy: i32) -> bool {
        self.state.paint_preview(gx, gy)
    }

    pub fn finish_molds(&mut self) -> u32 {
        self.state.finish_molds().len() as u32
    }

    pub fn preview_target(&mut self, ox: i32, oy: i32) -> u32 {
        self.state.preview_target(ox, oy) as u32
    }

    pub fn clear_previews(&mut self) {
        self.state.clear_previews();
    }

    // === STEPPING ===

    pub fn tick(&mut self) -> bool {
        self.state.tick()
    }

    /// Call from requestAnimationFrame with its timestamp
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.state.frame(now_ms)
    }

    pub fn tick_stats(&self) -> TickStats {
        self.state.stats().clone()
    }

    // === RENDERING ===

    /// Get pointer to the cell tag array (for JS rendering)
    pub fn types_ptr(&self) -> *const u8 {
        self.state.types_ptr()
    }

    pub fn types_len(&self) -> usize {
        self.state.types_len()
    }

    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            types_ptr: self.state.types_ptr() as usize as u32,
            types_len_bytes: self.state.types_len() as u32,
            width: self.state.width(),
            height: self.state.height(),
        }
    }

    pub fn body_count(&self) -> usize {
        self.state.bodies().body_count()
    }

    /// All bodies as a JSON array (id, position, extents, shape, role)
    pub fn bodies_json(&self) -> String {
        let views: Vec<BodyView> = self.state.bodies().iter().map(BodyView::from).collect();
        serde_json::to_string(&views).unwrap_or_else(|_| "[]".to_string())
    }
}
