use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};

use kurbo::{Circle, RoundedRect, Shape};
use rand::{Rng, rngs::StdRng};

use crate::{
    animation::{
        ease::Ease,
        scheduler::{EventId, Scheduler},
        tween::Tween,
    },
    foundation::{
        core::{BezPath, Point, Rect, Rgba8Premul, Size},
        error::{BurstError, BurstResult},
    },
    particles::palette::Palette,
};

const PATH_TOLERANCE: f64 = 0.05;
const STAR_POINTS: usize = 5;
const STAR_INNER_RATIO: f64 = 0.45;
const ROUNDED_RECT_RADIUS_RATIO: f64 = 0.2;

/// Confetti silhouette. Every shape is centered on the origin and fills a `size` box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfettiShape {
    Disc,
    Capsule,
    RoundedRect,
    Star,
}

impl ConfettiShape {
    pub const ALL: [ConfettiShape; 4] = [
        ConfettiShape::Disc,
        ConfettiShape::Capsule,
        ConfettiShape::RoundedRect,
        ConfettiShape::Star,
    ];

    /// Filled outline in local space.
    pub fn path(self, size: Size) -> BezPath {
        let rect = Rect::from_center_size(Point::ORIGIN, size);
        let short = size.width.min(size.height);
        match self {
            Self::Disc => Circle::new(Point::ORIGIN, short / 2.0).to_path(PATH_TOLERANCE),
            Self::Capsule => RoundedRect::from_rect(rect, short / 2.0).to_path(PATH_TOLERANCE),
            Self::RoundedRect => {
                RoundedRect::from_rect(rect, short * ROUNDED_RECT_RADIUS_RATIO)
                    .to_path(PATH_TOLERANCE)
            }
            Self::Star => star_path(size),
        }
    }

    pub fn area(self, size: Size) -> f64 {
        let short = size.width.min(size.height);
        let corner_loss = |r: f64| (4.0 - PI) * r * r;
        match self {
            Self::Disc => PI * (short / 2.0).powi(2),
            Self::Capsule => size.area() - corner_loss(short / 2.0),
            Self::RoundedRect => size.area() - corner_loss(short * ROUNDED_RECT_RADIUS_RATIO),
            Self::Star => {
                let n = STAR_POINTS as f64;
                n * STAR_INNER_RATIO * (PI / n).sin() * (size.width / 2.0) * (size.height / 2.0)
            }
        }
    }
}

fn star_path(size: Size) -> BezPath {
    let (rx, ry) = (size.width / 2.0, size.height / 2.0);
    let mut path = BezPath::new();
    for k in 0..STAR_POINTS * 2 {
        let radius = if k % 2 == 0 { 1.0 } else { STAR_INNER_RATIO };
        let angle = -PI / 2.0 + k as f64 * TAU / (STAR_POINTS * 2) as f64;
        let p = Point::new(rx * radius * angle.cos(), ry * radius * angle.sin());
        if k == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ParticleId(pub u64);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShowerParticle {
    pub id: ParticleId,
    pub position: Point,
    pub shape: ConfettiShape,
    pub size: Size,
    pub color: Rgba8Premul,
    pub rotation_deg: f64,
    pub initial_rotation_deg: f64,
    /// Degrees per second.
    pub rotation_speed: f64,
    pub spawned_at: f64,
    #[serde(skip)]
    fall: Tween<f64>,
    #[serde(skip)]
    ticks_done: u32,
    #[serde(skip)]
    fall_done: bool,
}

impl ShowerParticle {
    pub fn fall_end_y(&self) -> f64 {
        self.fall.to
    }

    pub fn has_landed(&self) -> bool {
        self.fall_done
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowerEvent {
    Spawn { index: u32 },
    RotationTick(ParticleId),
    FallComplete(ParticleId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowerState {
    Idle,
    Spawning,
    /// Spawn timer cancelled (cap reached or stopped). Not restartable.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShowerSettings {
    pub spawn_interval_secs: f64,
    pub cap: u32,
    pub fall_secs: f64,
    pub rotation_tick_hz: u32,
    pub spawn_y: f64,
    pub fall_overshoot: f64,
    pub size_range: (f64, f64),
    pub rotation_speed_range: (f64, f64),
}

impl Default for ShowerSettings {
    fn default() -> Self {
        Self {
            spawn_interval_secs: 0.15,
            cap: 50,
            fall_secs: 1.5,
            rotation_tick_hz: 60,
            spawn_y: -40.0,
            fall_overshoot: 80.0,
            size_range: (10.0, 30.0),
            rotation_speed_range: (30.0, 200.0),
        }
    }
}

impl ShowerSettings {
    /// Everything the spawner draws from must be a non-empty finite range.
    pub fn validate(&self) -> BurstResult<()> {
        for (name, v) in [
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("fall_secs", self.fall_secs),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BurstError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.rotation_tick_hz == 0 {
            return Err(BurstError::validation("rotation_tick_hz must be > 0"));
        }
        if !self.spawn_y.is_finite() || !self.fall_overshoot.is_finite() {
            return Err(BurstError::validation(
                "spawn_y and fall_overshoot must be finite",
            ));
        }
        for (name, (lo, hi)) in [
            ("size_range", self.size_range),
            ("rotation_speed_range", self.rotation_speed_range),
        ] {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(BurstError::validation(format!(
                    "{name} must be a finite [lo, hi] range with lo <= hi, got [{lo}, {hi}]"
                )));
            }
        }
        if self.size_range.0 <= 0.0 {
            return Err(BurstError::validation("confetti sizes must be > 0"));
        }
        Ok(())
    }

    pub fn rotation_ticks(&self) -> u32 {
        (f64::from(self.rotation_tick_hz) * self.fall_secs).round() as u32
    }
}

/// Timed confetti spawner: a capped periodic spawn timer plus independent per-particle fall
/// and rotation timelines.
///
/// Particles are retired once both of their timelines have finished; retired records are kept
/// for [`ShowerParticleSystem::drain_retired`] until the consumer takes them.
#[derive(Debug)]
pub struct ShowerParticleSystem {
    settings: ShowerSettings,
    palette: Palette,
    rng: StdRng,
    state: ShowerState,
    canvas: Size,
    origin: f64,
    spawned: u32,
    next_id: u64,
    spawn_timer: Option<EventId>,
    live: BTreeMap<ParticleId, ShowerParticle>,
    retired: Vec<ShowerParticle>,
}

impl ShowerParticleSystem {
    pub fn new(settings: ShowerSettings, palette: Palette, rng: StdRng) -> BurstResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            palette,
            rng,
            state: ShowerState::Idle,
            canvas: Size::ZERO,
            origin: 0.0,
            spawned: 0,
            next_id: 0,
            spawn_timer: None,
            live: BTreeMap::new(),
            retired: Vec::new(),
        })
    }

    /// Arm the spawn timer. Returns `false` (no-op) if the shower was already started.
    pub fn start<E: From<ShowerEvent>>(
        &mut self,
        now: f64,
        canvas: Size,
        scheduler: &mut Scheduler<E>,
    ) -> BurstResult<bool> {
        if self.state != ShowerState::Idle {
            tracing::debug!(state = ?self.state, "shower start ignored");
            return Ok(false);
        }
        let usable = |v: f64| v.is_finite() && v >= 0.0;
        if !usable(canvas.width) || !usable(canvas.height) {
            return Err(BurstError::validation(format!(
                "shower canvas must be finite and non-negative, got {canvas:?}"
            )));
        }
        if !now.is_finite() {
            return Err(BurstError::validation("shower start time must be finite"));
        }
        self.canvas = canvas;
        self.origin = now;
        if self.settings.cap == 0 {
            self.state = ShowerState::Finished;
            return Ok(true);
        }
        self.state = ShowerState::Spawning;
        self.arm_spawn(1, scheduler)?;
        Ok(true)
    }

    /// Cancel the spawn timer and drop every live particle. Pending per-particle events become
    /// stale and are skipped.
    pub fn stop<E>(&mut self, scheduler: &mut Scheduler<E>) {
        if let Some(id) = self.spawn_timer.take() {
            scheduler.cancel(id);
        }
        self.state = ShowerState::Finished;
        self.live.clear();
    }

    pub fn handle<E: From<ShowerEvent>>(
        &mut self,
        event: ShowerEvent,
        at: f64,
        scheduler: &mut Scheduler<E>,
    ) -> BurstResult<()> {
        match event {
            ShowerEvent::Spawn { index } => self.on_spawn(index, at, scheduler),
            ShowerEvent::RotationTick(id) => self.on_rotation_tick(id, scheduler),
            ShowerEvent::FallComplete(id) => {
                self.on_fall_complete(id);
                Ok(())
            }
        }
    }

    /// Sample fall positions at `now`.
    pub fn update(&mut self, now: f64) {
        for p in self.live.values_mut() {
            if !p.fall_done {
                p.position.y = p.fall.sample(now);
            }
        }
    }

    fn arm_spawn<E: From<ShowerEvent>>(
        &mut self,
        index: u32,
        scheduler: &mut Scheduler<E>,
    ) -> BurstResult<()> {
        // Fire times are computed from the origin, not accumulated, so the period never drifts.
        let at = self.origin + f64::from(index) * self.settings.spawn_interval_secs;
        self.spawn_timer = Some(scheduler.schedule(at, ShowerEvent::Spawn { index }.into())?);
        Ok(())
    }

    fn on_spawn<E: From<ShowerEvent>>(
        &mut self,
        index: u32,
        at: f64,
        scheduler: &mut Scheduler<E>,
    ) -> BurstResult<()> {
        if self.state != ShowerState::Spawning || index != self.spawned + 1 {
            tracing::trace!(index, "stale spawn tick");
            return Ok(());
        }
        self.spawn_timer = None;

        let particle = self.spawn_particle(at);
        let id = particle.id;
        let ticks = self.settings.rotation_ticks();
        scheduler.schedule(particle.fall.end(), ShowerEvent::FallComplete(id).into())?;
        self.live.insert(id, particle);
        if ticks > 0 {
            self.arm_rotation_tick(id, at, 1, scheduler)?;
        }
        self.spawned = index;

        if self.spawned >= self.settings.cap {
            self.state = ShowerState::Finished;
            tracing::debug!(spawned = self.spawned, "shower cap reached, spawn timer cancelled");
        } else {
            self.arm_spawn(index + 1, scheduler)?;
        }
        Ok(())
    }

    fn spawn_particle(&mut self, at: f64) -> ShowerParticle {
        let s = self.settings;
        let rng = &mut self.rng;
        let x = rng.random_range(0.0..=self.canvas.width);
        let shape = ConfettiShape::ALL[rng.random_range(0..ConfettiShape::ALL.len())];
        let size = Size::new(
            rng.random_range(s.size_range.0..=s.size_range.1),
            rng.random_range(s.size_range.0..=s.size_range.1),
        );
        let color = self.palette.pick(rng);
        let rotation = rng.random_range(0.0..360.0);
        let speed = rng.random_range(s.rotation_speed_range.0..=s.rotation_speed_range.1);

        let id = ParticleId(self.next_id);
        self.next_id += 1;
        let end_y = self.canvas.height + s.fall_overshoot;
        ShowerParticle {
            id,
            position: Point::new(x, s.spawn_y),
            shape,
            size,
            color,
            rotation_deg: rotation,
            initial_rotation_deg: rotation,
            rotation_speed: speed,
            spawned_at: at,
            fall: Tween::new(s.spawn_y, end_y, at, s.fall_secs, Ease::Linear),
            ticks_done: 0,
            fall_done: false,
        }
    }

    fn arm_rotation_tick<E: From<ShowerEvent>>(
        &mut self,
        id: ParticleId,
        spawned_at: f64,
        tick: u32,
        scheduler: &mut Scheduler<E>,
    ) -> BurstResult<()> {
        let at = spawned_at + f64::from(tick) / f64::from(self.settings.rotation_tick_hz);
        scheduler.schedule(at, ShowerEvent::RotationTick(id).into())?;
        Ok(())
    }

    fn on_rotation_tick<E: From<ShowerEvent>>(
        &mut self,
        id: ParticleId,
        scheduler: &mut Scheduler<E>,
    ) -> BurstResult<()> {
        let hz = f64::from(self.settings.rotation_tick_hz);
        let total = self.settings.rotation_ticks();
        let Some(p) = self.live.get_mut(&id) else {
            tracing::trace!(particle = id.0, "rotation tick for a removed particle");
            return Ok(());
        };
        p.rotation_deg = (p.rotation_deg + p.rotation_speed / hz).rem_euclid(360.0);
        p.ticks_done += 1;
        let (done, spawned_at, next) = (p.ticks_done, p.spawned_at, p.ticks_done + 1);
        if done < total {
            self.arm_rotation_tick(id, spawned_at, next, scheduler)
        } else {
            self.retire_if_settled(id);
            Ok(())
        }
    }

    fn on_fall_complete(&mut self, id: ParticleId) {
        let Some(p) = self.live.get_mut(&id) else {
            tracing::trace!(particle = id.0, "fall completion for a removed particle");
            return;
        };
        p.position.y = p.fall.to;
        p.fall_done = true;
        self.retire_if_settled(id);
    }

    fn retire_if_settled(&mut self, id: ParticleId) {
        let total = self.settings.rotation_ticks();
        let settled = self
            .live
            .get(&id)
            .is_some_and(|p| p.fall_done && p.ticks_done >= total);
        if settled && let Some(p) = self.live.remove(&id) {
            self.retired.push(p);
        }
    }

    pub fn state(&self) -> ShowerState {
        self.state
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn settings(&self) -> &ShowerSettings {
        &self.settings
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&ShowerParticle> {
        self.live.get(&id)
    }

    /// Remove a live particle ahead of its timelines.
    pub fn remove(&mut self, id: ParticleId) -> Option<ShowerParticle> {
        self.live.remove(&id)
    }

    pub fn live(&self) -> impl Iterator<Item = &ShowerParticle> {
        self.live.values()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Take every particle retired since the last call.
    pub fn drain_retired(&mut self) -> Vec<ShowerParticle> {
        std::mem::take(&mut self.retired)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/shower.rs"]
mod tests;
