use kurbo::{ParamCurve, ParamCurveArclen, PathSeg, Shape};

use crate::foundation::{
    core::{Affine, BezPath, Point, Rect},
    error::{BurstError, BurstResult},
};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Immutable filled glyph region plus its axis-aligned bounds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutlinePath {
    path: BezPath,
    bounds: Rect,
}

impl OutlinePath {
    pub fn new(path: BezPath) -> Self {
        let bounds = if path.elements().is_empty() {
            Rect::ZERO
        } else {
            path.bounding_box()
        };
        Self { path, bounds }
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.area() <= 0.0
    }

    /// Non-zero winding membership test.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p) && self.path.contains(p)
    }

    pub fn transformed(&self, affine: Affine) -> Self {
        let mut path = self.path.clone();
        path.apply_affine(affine);
        Self::new(path)
    }

    /// Uniformly scale and center the outline inside `rect`.
    pub fn fit_into(&self, rect: Rect) -> BurstResult<Self> {
        let b = self.bounds;
        if b.width() <= 0.0 || b.height() <= 0.0 {
            return Err(BurstError::outline("cannot fit an empty outline"));
        }
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(BurstError::validation(format!(
                "outline target rect must have positive size, got {rect:?}"
            )));
        }
        let scale = (rect.width() / b.width()).min(rect.height() / b.height());
        let affine = Affine::translate(rect.center().to_vec2())
            * Affine::scale(scale)
            * Affine::translate(-b.center().to_vec2());
        Ok(self.transformed(affine))
    }

    /// Total arc length of every sub-path, closing segments included.
    pub fn length(&self) -> f64 {
        self.path
            .segments()
            .map(|seg| seg.arclen(ARCLEN_ACCURACY))
            .sum()
    }

    /// Leading `progress` fraction (by arc length) of the outline, as an open stroke path.
    pub fn trimmed(&self, progress: f64) -> BezPath {
        let progress = progress.clamp(0.0, 1.0);
        if progress >= 1.0 {
            return self.path.clone();
        }
        let mut budget = self.length() * progress;
        let mut out = BezPath::new();
        let mut pen: Option<Point> = None;

        for seg in self.path.segments() {
            if budget <= 0.0 {
                break;
            }
            let len = seg.arclen(ARCLEN_ACCURACY);
            let seg = if len > budget {
                let t = seg.inv_arclen(budget, ARCLEN_ACCURACY);
                seg.subsegment(0.0..t)
            } else {
                seg
            };
            budget -= len;

            let start = seg.start();
            if pen.is_none_or(|p| (p - start).hypot() > 1e-9) {
                out.move_to(start);
            }
            push_seg(&mut out, seg);
            pen = Some(seg.end());
        }
        out
    }
}

fn push_seg(out: &mut BezPath, seg: PathSeg) {
    match seg {
        PathSeg::Line(l) => out.line_to(l.p1),
        PathSeg::Quad(q) => out.quad_to(q.p1, q.p2),
        PathSeg::Cubic(c) => out.curve_to(c.p1, c.p2, c.p3),
    }
}

/// Font request handed to a [`GlyphOutlineProvider`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    pub family: String,
    pub weight: u16,
    pub size_px: f64,
    /// Prefer a rounded family; providers fall back to their default style when none is present.
    pub rounded: bool,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::heavy_rounded(120.0)
    }
}

impl FontDescriptor {
    pub fn heavy_rounded(size_px: f64) -> Self {
        Self {
            family: "sans-serif".to_string(),
            weight: 900,
            size_px,
            rounded: true,
        }
    }

    pub fn validate(&self) -> BurstResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(BurstError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        if !(1..=1000).contains(&self.weight) {
            return Err(BurstError::validation("font weight must be in 1..=1000"));
        }
        Ok(())
    }
}

/// Turns a single line of text into a filled outline path.
pub trait GlyphOutlineProvider {
    fn outline(&self, text: &str, font: &FontDescriptor) -> BurstResult<OutlinePath>;

    /// Outline fitted (uniform scale, centered) into `rect`.
    fn outline_in(
        &self,
        text: &str,
        font: &FontDescriptor,
        rect: Rect,
    ) -> BurstResult<OutlinePath> {
        self.outline(text, font)?.fit_into(rect)
    }
}

/// Try `primary`; on an outline failure log it and use `fallback` instead.
pub fn outline_with_fallback(
    primary: &dyn GlyphOutlineProvider,
    fallback: &dyn GlyphOutlineProvider,
    text: &str,
    font: &FontDescriptor,
    rect: Rect,
) -> BurstResult<OutlinePath> {
    match primary.outline_in(text, font, rect) {
        Ok(outline) => Ok(outline),
        Err(BurstError::Outline(reason)) => {
            tracing::warn!(%reason, "primary outline provider failed, using fallback");
            fallback.outline_in(text, font, rect)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/outline.rs"]
mod tests;
