//! Deterministic random generation for pieces and colors
//!
//! A small linear congruential generator keeps runs reproducible from a
//! seed without pulling in an RNG dependency. [`PieceRng`] layers the
//! game-specific draws on top: a uniform kind from the catalog and a
//! bright-ish random fill color.

use blockfall_types::{PieceKind, Rgb, COLOR_CHANNEL_MIN};

use crate::piece::Piece;

/// Linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            // Avoid the all-zeros fixed point
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Generate the next pseudo-random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a value in `[0, n)`
    pub fn next_range(&mut self, n: u32) -> u32 {
        self.next_u32() % n
    }
}

/// Piece and color source for a session
///
/// Draw order is fixed: kind first, then the three color channels. Two
/// generators built from the same seed produce the same piece sequence.
#[derive(Debug, Clone)]
pub struct PieceRng {
    rng: SimpleRng,
}

impl PieceRng {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Uniform draw from the seven-kind catalog
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// One color channel, clamped away from black so pieces stay visible
    fn next_channel(&mut self) -> u8 {
        COLOR_CHANNEL_MIN + self.rng.next_range(256 - COLOR_CHANNEL_MIN as u32) as u8
    }

    pub fn next_color(&mut self) -> Rgb {
        let r = self.next_channel();
        let g = self.next_channel();
        let b = self.next_channel();
        Rgb::new(r, g, b)
    }

    /// Draw a fresh piece at the spawn anchor
    pub fn next_piece(&mut self) -> Piece {
        let kind = self.next_kind();
        let color = self.next_color();
        Piece::spawn(kind, color)
    }
}
