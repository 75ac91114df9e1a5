//! RNG module - seeded randomness for tile values and piece shapes
//!
//! Randomness is isolated to construction time: each spawned tile picks 2 or 4,
//! and each new piece picks one of the seven kinds uniformly. A seeded LCG keeps
//! whole sessions reproducible from a single `u32`.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Low LCG bits cycle with short periods (bit 0 alternates), so the
    /// value is taken from the upper half of the state.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }

    /// Starting value for a fresh tile: 2 or 4 with equal odds
    pub fn tile_value(&mut self) -> u32 {
        if self.next_range(2) == 0 {
            2
        } else {
            4
        }
    }

    /// Uniform pick over the seven tetromino kinds
    pub fn piece_kind(&mut self) -> PieceKind {
        let idx = self.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Current RNG state (for restarting a session with a fresh but derived seed)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
