use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cells::{
    CellId, CELL_MOLTEN_BRASS, CELL_MOLTEN_IRON, CELL_SOLID_BRASS, CELL_SOLID_IRON,
};

/// Alloy a body or particle is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Iron,
    Brass,
}

impl Material {
    pub const ALL: [Material; 2] = [Material::Iron, Material::Brass];

    #[inline]
    pub fn molten_cell(self) -> CellId {
        match self {
            Material::Iron => CELL_MOLTEN_IRON,
            Material::Brass => CELL_MOLTEN_BRASS,
        }
    }

    #[inline]
    pub fn solid_cell(self) -> CellId {
        match self {
            Material::Iron => CELL_SOLID_IRON,
            Material::Brass => CELL_SOLID_BRASS,
        }
    }

    /// Material of a molten or solid cell.
    pub fn from_cell(cell: CellId) -> Option<Self> {
        match cell {
            CELL_MOLTEN_IRON | CELL_SOLID_IRON => Some(Material::Iron),
            CELL_MOLTEN_BRASS | CELL_SOLID_BRASS => Some(Material::Brass),
            _ => None,
        }
    }

    /// Whether freshly solidified bodies fuse with touching bodies of the same alloy.
    #[inline]
    pub fn bonds(self) -> bool {
        matches!(self, Material::Brass)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Material::Iron => "iron",
            Material::Brass => "brass",
        }
    }

}

impl FromStr for Material {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iron" => Ok(Material::Iron),
            "brass" => Ok(Material::Brass),
            _ => Err(format!("unknown material '{s}'")),
        }
    }
}
