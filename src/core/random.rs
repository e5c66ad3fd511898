//! Randomness used for direction tie-breaks.
//!
//! Every random choice in the simulation goes through [`TieBreak`], so a
//! run can be replayed (or a unit test pinned) by swapping the source.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait TieBreak {
    /// Fair coin flip.
    fn coin(&mut self) -> bool;

    /// Uniform value in `[0, 100)`.
    fn percent(&mut self) -> f32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Reorder a direction table in place.
    fn shuffle(&mut self, dirs: &mut [(i32, i32)]);

    /// `+1` or `-1`.
    #[inline]
    fn side(&mut self) -> i32 {
        if self.coin() { 1 } else { -1 }
    }
}

/// Production source: PCG32.
pub struct PcgTieBreak {
    rng: Pcg32,
}

impl PcgTieBreak {
    pub fn new(seed: u64) -> Self {
        Self { rng: Pcg32::seed_from_u64(seed) }
    }

    /// Seed from the host clock.
    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }
}

impl TieBreak for PcgTieBreak {
    fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn percent(&mut self) -> f32 {
        self.rng.random_range(0.0..100.0)
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn shuffle(&mut self, dirs: &mut [(i32, i32)]) {
        dirs.shuffle(&mut self.rng);
    }
}

/// Scripted source: replays a fixed coin sequence (cycling), returns a
/// constant percent and never reorders direction tables.
pub struct SequenceTieBreak {
    coins: Vec<bool>,
    cursor: usize,
    percent: f32,
}

impl SequenceTieBreak {
    pub fn new(coins: Vec<bool>) -> Self {
        Self { coins, cursor: 0, percent: 99.0 }
    }

    /// Always the same coin.
    pub fn constant(coin: bool) -> Self {
        Self::new(vec![coin])
    }

    pub fn with_percent(mut self, percent: f32) -> Self {
        self.percent = percent;
        self
    }
}

impl TieBreak for SequenceTieBreak {
    fn coin(&mut self) -> bool {
        if self.coins.is_empty() {
            return false;
        }
        let c = self.coins[self.cursor % self.coins.len()];
        self.cursor = self.cursor.wrapping_add(1);
        c
    }

    fn percent(&mut self) -> f32 {
        self.percent
    }

    fn index(&mut self, _len: usize) -> usize {
        0
    }

    fn shuffle(&mut self, _dirs: &mut [(i32, i32)]) {}
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_reproducible_for_equal_seeds() {
        let mut a = PcgTieBreak::new(7);
        let mut b = PcgTieBreak::new(7);
        for _ in 0..32 {
            assert_eq!(a.coin(), b.coin());
        }
        let mut da = [(0, 1), (1, 0), (-1, 0), (0, -1)];
        let mut db = da;
        a.shuffle(&mut da);
        b.shuffle(&mut db);
        assert_eq!(da, db);
    }

    #[test]
    fn percent_stays_in_range() {
        let mut r = PcgTieBreak::new(1);
        for _ in 0..200 {
            let p = r.percent();
            assert!((0.0..100.0).contains(&p));
        }
    }

    #[test]
    fn sequence_cycles() {
        let mut s = SequenceTieBreak::new(vec![true, false]);
        assert_eq!(s.side(), 1);
        assert_eq!(s.side(), -1);
        assert_eq!(s.side(), 1);
    }
}
