use rand::{Rng, seq::IndexedRandom};

use crate::foundation::{
    core::Rgba8Premul,
    error::{BurstError, BurstResult},
};

const RED: Rgba8Premul = Rgba8Premul::opaque(255, 59, 48);
const ORANGE: Rgba8Premul = Rgba8Premul::opaque(255, 149, 0);
const YELLOW: Rgba8Premul = Rgba8Premul::opaque(255, 204, 0);
const GREEN: Rgba8Premul = Rgba8Premul::opaque(52, 199, 89);
const MINT: Rgba8Premul = Rgba8Premul::opaque(0, 199, 190);
const TEAL: Rgba8Premul = Rgba8Premul::opaque(48, 176, 199);
const CYAN: Rgba8Premul = Rgba8Premul::opaque(50, 173, 230);
const BLUE: Rgba8Premul = Rgba8Premul::opaque(0, 122, 255);
const INDIGO: Rgba8Premul = Rgba8Premul::opaque(88, 86, 214);
const PURPLE: Rgba8Premul = Rgba8Premul::opaque(175, 82, 222);
const PINK: Rgba8Premul = Rgba8Premul::opaque(255, 45, 85);

/// Uniform color source with a neutral fallback for an empty draw.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    colors: Vec<Rgba8Premul>,
    fallback: Rgba8Premul,
}

impl Palette {
    pub fn new(colors: Vec<Rgba8Premul>) -> Self {
        Self {
            colors,
            fallback: Rgba8Premul::WHITE,
        }
    }

    /// Parse `#rrggbb[aa]` entries.
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> BurstResult<Self> {
        let colors = entries
            .iter()
            .map(|s| Rgba8Premul::from_hex(s.as_ref()))
            .collect::<BurstResult<Vec<_>>>()?;
        if colors.is_empty() {
            return Err(BurstError::validation("palette must not be empty"));
        }
        Ok(Self::new(colors))
    }

    /// Ten bright colors plus white, used for the word formation.
    pub fn formation() -> Self {
        Self::new(vec![
            RED,
            ORANGE,
            YELLOW,
            GREEN,
            MINT,
            CYAN,
            BLUE,
            PURPLE,
            PINK,
            INDIGO,
            Rgba8Premul::WHITE,
        ])
    }

    /// The eleven confetti colors.
    pub fn confetti() -> Self {
        Self::new(vec![
            RED, ORANGE, YELLOW, GREEN, MINT, TEAL, CYAN, BLUE, INDIGO, PURPLE, PINK,
        ])
    }

    pub fn colors(&self) -> &[Rgba8Premul] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba8Premul {
        self.colors.choose(rng).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/palette.rs"]
mod tests;
