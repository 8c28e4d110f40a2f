use std::sync::Arc;

use kurbo::{Circle, Shape as _};

use crate::{
    animation::tween::Lerp,
    foundation::{
        core::{Affine, BezPath, Canvas, Rect, Rgba8Premul, Vec2},
        error::{BurstError, BurstResult},
    },
    render::backend::{FrameRGBA, RenderSettings},
    snapshot::FrameSnapshot,
    text::outline::OutlinePath,
};

/// Rasterizes [`FrameSnapshot`]s with `vello_cpu`.
///
/// The renderer holds no animation state, so one instance can be shared across threads.
#[derive(Clone, Debug)]
pub struct CpuRenderer {
    settings: RenderSettings,
    width: u16,
    height: u16,
}

impl CpuRenderer {
    pub fn new(canvas: Canvas, settings: RenderSettings) -> BurstResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| BurstError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| BurstError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(BurstError::render("canvas must be non-empty"));
        }
        if settings.gradient.is_empty() {
            return Err(BurstError::render("outline gradient needs at least one stop"));
        }
        Ok(Self {
            settings,
            width,
            height,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Draw order: outline stroke, formation dots, confetti.
    #[tracing::instrument(skip_all, fields(t = snapshot.time))]
    pub fn render(
        &self,
        snapshot: &FrameSnapshot,
        outline: &OutlinePath,
    ) -> BurstResult<FrameRGBA> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        if let Some(clear) = self.settings.clear_rgba {
            clear_pixmap(&mut pixmap, premul_rgba8(clear));
        }

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.draw_outline(&mut ctx, snapshot, outline)?;

        if snapshot.formation_visible {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            for dot in &snapshot.formation {
                set_solid(&mut ctx, dot.color);
                let disc = Circle::new(dot.position, dot.radius).to_path(0.1);
                ctx.fill_path(&bezpath_to_cpu(&disc));
            }
        }

        for c in &snapshot.confetti {
            let transform = Affine::translate(c.position.to_vec2())
                * Affine::rotate(c.rotation_deg.to_radians());
            ctx.set_transform(affine_to_cpu(transform));
            set_solid(&mut ctx, c.color);
            ctx.fill_path(&bezpath_to_cpu(&c.shape.path(c.size)));
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_outline(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        snapshot: &FrameSnapshot,
        outline: &OutlinePath,
    ) -> BurstResult<()> {
        let progress = snapshot.outline.draw_progress;
        if progress <= 0.0 || outline.is_empty() {
            return Ok(());
        }
        let visible = outline.trimmed(progress);
        if visible.elements().is_empty() {
            return Ok(());
        }

        let pad = self.settings.outline_width;
        let area = outline.bounds().inflate(pad, pad);
        let paint = gradient_paint(
            &self.settings.gradient,
            snapshot.outline.gradient_angle_deg,
            area,
        )?;

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(affine_to_cpu(Affine::translate(Vec2::new(
            area.x0.floor(),
            area.y0.floor(),
        ))));
        ctx.set_paint(paint);
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(self.settings.outline_width)
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        ctx.stroke_path(&bezpath_to_cpu(&visible));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

/// Color of a cyclic gradient at `t` (wraps at 1).
pub fn gradient_color(stops: &[Rgba8Premul], t: f64) -> Rgba8Premul {
    match stops {
        [] => Rgba8Premul::transparent(),
        [only] => *only,
        _ => {
            let pos = t.rem_euclid(1.0) * stops.len() as f64;
            let i = (pos.floor() as usize).min(stops.len() - 1);
            let next = (i + 1) % stops.len();
            Rgba8Premul::lerp(&stops[i], &stops[next], pos - i as f64)
        }
    }
}

/// Linear gradient across `area`, oriented by `angle_deg`, baked into an image paint.
fn gradient_paint(
    stops: &[Rgba8Premul],
    angle_deg: f64,
    area: Rect,
) -> BurstResult<vello_cpu::Image> {
    let w = area.width().ceil().max(1.0) as u32;
    let h = area.height().ceil().max(1.0) as u32;
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let half = 0.5 * ((w as f64) * cos.abs() + (h as f64) * sin.abs()).max(1.0);
    let (cx, cy) = (0.5 * w as f64, 0.5 * h as f64);

    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    for y in 0..h {
        for x in 0..w {
            let s = ((x as f64 + 0.5 - cx) * cos + (y as f64 + 0.5 - cy) * sin) / half;
            let c = gradient_color(stops, 0.5 * (s.clamp(-1.0, 1.0) + 1.0));
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    let pixmap = pixmap_from_premul_bytes(&bytes, w, h)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn set_solid(ctx: &mut vello_cpu::RenderContext, c: Rgba8Premul) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let c = Rgba8Premul::from_straight_rgba(r, g, b, a);
    [c.r, c.g, c.b, c.a]
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BurstResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BurstError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BurstError::render("pixmap height exceeds u16"))?;
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
