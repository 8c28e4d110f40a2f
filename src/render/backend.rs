use crate::foundation::core::Rgba8Premul;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Drawing parameters that are not part of the animation state.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// If set, the frame is cleared to this straight-alpha RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
    /// Outline stroke width in pixels.
    pub outline_width: f64,
    /// Stops of the outline gradient, swept around by the gradient angle.
    pub gradient: Vec<Rgba8Premul>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: Some([12, 10, 30, 255]),
            outline_width: 3.0,
            gradient: vec![
                Rgba8Premul::opaque(255, 215, 0),
                Rgba8Premul::opaque(255, 64, 129),
                Rgba8Premul::opaque(124, 77, 255),
                Rgba8Premul::opaque(0, 229, 255),
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
