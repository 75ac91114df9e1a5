//! Tile module - numbered tiles as in 2048
//!
//! A tile holds a power-of-two value and a presentation style derived purely
//! from that value. Doubling is the only mutation.

use crate::rng::SimpleRng;
use crate::types::Rgb;

/// Colors a renderer uses for one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileStyle {
    pub background: Rgb,
    pub foreground: Rgb,
    pub border: Rgb,
}

const FOREGROUND: Rgb = Rgb::new(0, 25, 51);
const BORDER: Rgb = Rgb::new(0, 100, 200);
const FALLBACK_BACKGROUND: Rgb = Rgb::new(40, 40, 40);

/// Background palette keyed by exact tile value
const PALETTE: [(u32, Rgb); 14] = [
    (2, Rgb::new(151, 178, 199)),
    (4, Rgb::new(118, 150, 175)),
    (8, Rgb::new(100, 130, 155)),
    (16, Rgb::new(82, 110, 135)),
    (32, Rgb::new(68, 92, 115)),
    (64, Rgb::new(55, 75, 95)),
    (128, Rgb::new(230, 167, 70)),
    (256, Rgb::new(232, 149, 10)),
    (512, Rgb::new(237, 118, 15)),
    (1024, Rgb::new(237, 90, 2)),
    (2048, Rgb::new(242, 75, 12)),
    (4096, Rgb::new(255, 0, 0)),
    (8192, Rgb::new(255, 0, 0)),
    (16384, Rgb::new(255, 0, 0)),
];

/// Look up the style for a value; values outside the palette get the fallback.
pub fn style_for(value: u32) -> TileStyle {
    let background = PALETTE
        .iter()
        .find(|&&(v, _)| v == value)
        .map(|&(_, rgb)| rgb)
        .unwrap_or(FALLBACK_BACKGROUND);
    TileStyle {
        background,
        foreground: FOREGROUND,
        border: BORDER,
    }
}

/// A numbered tile. The value is always a power of two ≥ 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    value: u32,
    style: TileStyle,
}

impl Tile {
    /// Create a tile with an explicit value.
    ///
    /// Returns `None` unless `value` is a power of two ≥ 2.
    pub fn new(value: u32) -> Option<Self> {
        if value < 2 || !value.is_power_of_two() {
            return None;
        }
        Some(Self {
            value,
            style: style_for(value),
        })
    }

    /// Create a fresh spawn tile (2 or 4)
    pub fn random(rng: &mut SimpleRng) -> Self {
        let value = rng.tile_value();
        Self {
            value,
            style: style_for(value),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn style(&self) -> TileStyle {
        self.style
    }

    /// Double the value in place and refresh the style.
    ///
    /// Values are capped at 2^31, the largest `u32` power of two: doubling a
    /// tile already at the cap leaves it unchanged. Building one takes at
    /// least 2^29 spawned tiles, so normal play never reaches it.
    pub fn double(&mut self) {
        if let Some(next) = self.value.checked_mul(2) {
            self.value = next;
        }
        self.style = style_for(self.value);
    }
}
