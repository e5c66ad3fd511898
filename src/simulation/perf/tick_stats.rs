use wasm_bindgen::prelude::*;

/// Per-tick counters, refreshed at the end of every tick.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct TickStats {
    pub(super) tick_ms: f64,
    pub(super) molten_count: u32,
    pub(super) cluster_count: u32,
    pub(super) stable_clusters: u32,
    pub(super) body_count: u32,
    pub(super) bodies_moved: u32,
    pub(super) particles_moved: u32,
    pub(super) poured: u32,
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn molten_count(&self) -> u32 { self.molten_count }
    #[wasm_bindgen(getter)]
    pub fn cluster_count(&self) -> u32 { self.cluster_count }
    #[wasm_bindgen(getter)]
    pub fn stable_clusters(&self) -> u32 { self.stable_clusters }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn bodies_moved(&self) -> u32 { self.bodies_moved }
    #[wasm_bindgen(getter)]
    pub fn particles_moved(&self) -> u32 { self.particles_moved }
    #[wasm_bindgen(getter)]
    pub fn poured(&self) -> u32 { self.poured }
}
