use kurbo::{RoundedRect, Shape};

use crate::{
    foundation::{
        core::BezPath,
        error::{BurstError, BurstResult},
    },
    text::outline::{FontDescriptor, GlyphOutlineProvider, OutlinePath},
};

const CELL_WIDTH_EM: f64 = 0.6;
const CELL_HEIGHT_EM: f64 = 1.0;
const GAP_EM: f64 = 0.18;
const PATH_TOLERANCE: f64 = 0.05;

// Bit order: a (top), b (upper right), c (lower right), d (bottom), e (lower left),
// f (upper left), g (middle).
const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

fn segments_for(c: char) -> Option<u8> {
    Some(match c {
        '0' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        '1' => SEG_B | SEG_C,
        '2' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
        '3' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
        '4' => SEG_B | SEG_C | SEG_F | SEG_G,
        '5' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
        '6' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '7' => SEG_A | SEG_B | SEG_C,
        '8' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '9' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
        '-' => SEG_G,
        ' ' => 0,
        _ => return None,
    })
}

/// Font-independent provider drawing heavy seven-segment glyphs from capsule strokes.
///
/// Covers digits, `-` and space. Overlapping strokes share one winding direction, so the
/// non-zero fill of the combined path is their union.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentGlyphs;

impl SegmentGlyphs {
    pub fn supports(c: char) -> bool {
        segments_for(c).is_some()
    }

    fn stroke_em(font: &FontDescriptor) -> f64 {
        0.08 + 0.10 * f64::from(font.weight.min(1000)) / 1000.0
    }

    fn push_glyph(out: &mut BezPath, mask: u8, x0: f64, font: &FontDescriptor) {
        let em = font.size_px;
        let w = CELL_WIDTH_EM * em;
        let h = CELL_HEIGHT_EM * em;
        let t = Self::stroke_em(font) * em;
        let radius = if font.rounded { t / 2.0 } else { t * 0.15 };
        let mid = h / 2.0;

        let bars: [(u8, (f64, f64, f64, f64)); 7] = [
            (SEG_A, (0.0, 0.0, w, t)),
            (SEG_B, (w - t, 0.0, w, mid + t / 2.0)),
            (SEG_C, (w - t, mid - t / 2.0, w, h)),
            (SEG_D, (0.0, h - t, w, h)),
            (SEG_E, (0.0, mid - t / 2.0, t, h)),
            (SEG_F, (0.0, 0.0, t, mid + t / 2.0)),
            (SEG_G, (0.0, mid - t / 2.0, w, mid + t / 2.0)),
        ];
        for (bit, (a, b, c, d)) in bars {
            if mask & bit == 0 {
                continue;
            }
            let bar = RoundedRect::new(x0 + a, b, x0 + c, d, radius);
            out.extend(bar.path_elements(PATH_TOLERANCE));
        }
    }
}

impl GlyphOutlineProvider for SegmentGlyphs {
    fn outline(&self, text: &str, font: &FontDescriptor) -> BurstResult<OutlinePath> {
        font.validate()?;
        let advance = (CELL_WIDTH_EM + GAP_EM) * font.size_px;

        let mut path = BezPath::new();
        let mut x = 0.0;
        for c in text.chars() {
            match segments_for(c) {
                Some(mask) => Self::push_glyph(&mut path, mask, x, font),
                None => tracing::warn!(glyph = %c, "segment glyphs skip unsupported character"),
            }
            x += advance;
        }

        let outline = OutlinePath::new(path);
        if outline.is_empty() {
            return Err(BurstError::outline(format!(
                "text '{text}' has no drawable segment glyphs"
            )));
        }
        Ok(outline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
