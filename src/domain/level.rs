//! Level data
//!
//! The host parses its own level text format and hands the core JSON in the
//! shape below, with camelCase keys. Validation happens once at load time
//! and the simulation trusts a level afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::point::Point;
use super::material::Material;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPack {
    pub levels: Vec<LevelData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub level: u32,
    pub target_shape: Vec<Point>,
    #[serde(default)]
    pub target_material: Material,
    #[serde(default)]
    pub starting_molds: Vec<MoldSpec>,
    #[serde(default)]
    pub spouts: Vec<SpoutSpec>,
    #[serde(default)]
    pub max_hammers: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoldSpec {
    pub x: i32,
    pub y: i32,
    pub shape: Vec<Point>,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpoutSpec {
    pub pos: Point,
    #[serde(default)]
    pub material: Material,
    /// Particles poured per activation.
    pub flow: u32,
    /// Total particles this spout can ever pour.
    pub max: u32,
}

impl LevelPack {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let pack: LevelPack = serde_json::from_str(json).map_err(|e| e.to_string())?;
        for level in pack.levels.iter() {
            level.validate_shapes()?;
        }
        Ok(pack)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let level: LevelData = serde_json::from_str(json).map_err(|e| e.to_string())?;
        level.validate_shapes()?;
        Ok(level)
    }

    /// Grid-independent checks.
    pub fn validate_shapes(&self) -> Result<(), String> {
        check_unique(&self.target_shape)
            .map_err(|p| format!("level {}: duplicate target point {},{}", self.level, p.x, p.y))?;

        for (i, mold) in self.starting_molds.iter().enumerate() {
            if mold.shape.is_empty() {
                return Err(format!("level {}: mold {} has an empty shape", self.level, i));
            }
            if mold.shape.iter().any(|p| p.x < 0 || p.y < 0) {
                return Err(format!("level {}: mold {} has negative local points", self.level, i));
            }
            check_unique(&mold.shape).map_err(|p| {
                format!("level {}: mold {} repeats point {},{}", self.level, i, p.x, p.y)
            })?;
        }

        for (i, spout) in self.spouts.iter().enumerate() {
            if spout.flow == 0 {
                return Err(format!("level {}: spout {} has zero flow", self.level, i));
            }
        }
        Ok(())
    }

    /// Checks that need the grid size.
    pub fn validate_for_grid(&self, width: u32, height: u32) -> Result<(), String> {
        let inside = |p: Point| p.x >= 0 && p.y >= 0 && p.x < width as i32 && p.y < height as i32;
        for (i, spout) in self.spouts.iter().enumerate() {
            if !inside(spout.pos) {
                return Err(format!(
                    "level {}: spout {} at {},{} is outside the {}x{} grid",
                    self.level, i, spout.pos.x, spout.pos.y, width, height
                ));
            }
        }
        Ok(())
    }
}

fn check_unique(points: &[Point]) -> Result<(), Point> {
    let mut seen = HashSet::with_capacity(points.len());
    for p in points {
        if !seen.insert(*p) {
            return Err(*p);
        }
    }
    Ok(())
}
