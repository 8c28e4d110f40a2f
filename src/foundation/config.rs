use std::io::Read;

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Canvas, Point, Rect, Size},
        error::{BurstError, BurstResult},
    },
    particles::{palette::Palette, shower::ShowerSettings},
    text::outline::FontDescriptor,
};

/// Every duration, rate and range of a run, in seconds / pixels / degrees.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timings {
    pub draw_in_secs: f64,
    pub draw_in_ease: Ease,
    pub gradient_period_secs: f64,
    pub formation_secs: f64,
    pub formation_ease: Ease,
    pub spawn_interval_secs: f64,
    pub shower_cap: u32,
    pub fall_secs: f64,
    pub rotation_tick_hz: u32,
    pub sample_count: usize,
    pub attempt_multiplier: usize,
    pub spawn_y: f64,
    pub fall_overshoot: f64,
    pub confetti_size_range: (f64, f64),
    pub rotation_speed_range: (f64, f64),
}

impl Default for Timings {
    fn default() -> Self {
        let shower = ShowerSettings::default();
        Self {
            draw_in_secs: 4.0,
            draw_in_ease: Ease::InOutCubic,
            gradient_period_secs: 6.0,
            formation_secs: 2.0,
            formation_ease: Ease::OutCubic,
            spawn_interval_secs: shower.spawn_interval_secs,
            shower_cap: shower.cap,
            fall_secs: shower.fall_secs,
            rotation_tick_hz: shower.rotation_tick_hz,
            sample_count: 400,
            attempt_multiplier: 10,
            spawn_y: shower.spawn_y,
            fall_overshoot: shower.fall_overshoot,
            confetti_size_range: shower.size_range,
            rotation_speed_range: shower.rotation_speed_range,
        }
    }
}

impl Timings {
    pub fn shower_settings(&self) -> ShowerSettings {
        ShowerSettings {
            spawn_interval_secs: self.spawn_interval_secs,
            cap: self.shower_cap,
            fall_secs: self.fall_secs,
            rotation_tick_hz: self.rotation_tick_hz,
            spawn_y: self.spawn_y,
            fall_overshoot: self.fall_overshoot,
            size_range: self.confetti_size_range,
            rotation_speed_range: self.rotation_speed_range,
        }
    }

    pub fn validate(&self) -> BurstResult<()> {
        for (name, v) in [
            ("draw_in_secs", self.draw_in_secs),
            ("gradient_period_secs", self.gradient_period_secs),
            ("formation_secs", self.formation_secs),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BurstError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.attempt_multiplier == 0 {
            return Err(BurstError::validation("attempt_multiplier must be > 0"));
        }
        self.shower_settings().validate()
    }
}

/// Optional `#rrggbb[aa]` color lists replacing the built-in palettes.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PaletteOverrides {
    pub formation: Option<Vec<String>>,
    pub confetti: Option<Vec<String>>,
}

impl PaletteOverrides {
    pub fn formation(&self) -> BurstResult<Palette> {
        resolve(self.formation.as_deref(), Palette::formation)
    }

    pub fn confetti(&self) -> BurstResult<Palette> {
        resolve(self.confetti.as_deref(), Palette::confetti)
    }

    pub fn validate(&self) -> BurstResult<()> {
        self.formation()?;
        self.confetti()?;
        Ok(())
    }
}

fn resolve(entries: Option<&[String]>, builtin: fn() -> Palette) -> BurstResult<Palette> {
    match entries {
        Some(entries) => Palette::from_hex(entries),
        None => Ok(builtin()),
    }
}

/// Full description of one celebration run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub text: String,
    pub font: FontDescriptor,
    pub canvas: Canvas,
    /// Size of the rectangle the word is fitted into, centered on the canvas.
    pub placement_size: Size,
    /// Shared launch point of the formation burst; bottom center of the canvas when unset.
    pub launch: Option<Point>,
    /// Radius of formation dots in the rendered output.
    pub dot_radius: f64,
    pub seed: u64,
    pub timings: Timings,
    pub palettes: PaletteOverrides,
    /// Keep the assembled word on screen once the shower starts.
    pub keep_formation: bool,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            text: "2025".to_string(),
            font: FontDescriptor::default(),
            canvas: Canvas::default(),
            placement_size: Size::new(350.0, 120.0),
            launch: None,
            dot_radius: 2.5,
            seed: 2025,
            timings: Timings::default(),
            palettes: PaletteOverrides::default(),
            keep_formation: false,
        }
    }
}

impl CelebrationConfig {
    pub fn from_json_str(s: &str) -> BurstResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> BurstResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> BurstResult<()> {
        if self.text.trim().is_empty() {
            return Err(BurstError::validation("text must not be empty"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(BurstError::validation("canvas must be non-empty"));
        }
        let ps = self.placement_size;
        if !(ps.width.is_finite() && ps.height.is_finite() && ps.width > 0.0 && ps.height > 0.0)
        {
            return Err(BurstError::validation(
                "placement_size must be finite and > 0",
            ));
        }
        if !self.dot_radius.is_finite() || self.dot_radius <= 0.0 {
            return Err(BurstError::validation("dot_radius must be finite and > 0"));
        }
        if let Some(p) = self.launch
            && !(p.x.is_finite() && p.y.is_finite())
        {
            return Err(BurstError::validation("launch point must be finite"));
        }
        self.font.validate()?;
        self.palettes.validate()?;
        self.timings.validate()
    }

    /// World-space rectangle the word occupies.
    pub fn placement_rect(&self) -> Rect {
        self.canvas.centered(self.placement_size)
    }

    pub fn launch_point(&self) -> Point {
        self.launch.unwrap_or_else(|| {
            let size = self.canvas.size();
            Point::new(size.width / 2.0, size.height)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
