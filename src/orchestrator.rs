//! Stage sequencing: outline draw-in, then the formation burst, then the confetti shower.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::{
        scheduler::Scheduler,
        signal::StageState,
        tween::{Tween, looping_angle_deg},
    },
    foundation::{
        config::CelebrationConfig,
        core::{Affine, Fps, Point, Rect},
        error::{BurstError, BurstResult},
    },
    particles::{
        formation::{FormationEvent, FormationParticleSystem, TriggerOutcome},
        sampler::{SampleOutcome, ShapePointSampler},
        shower::{ShowerEvent, ShowerParticleSystem},
    },
    snapshot::{ConfettiSnapshot, DotSnapshot, FrameSnapshot, OutlineSnapshot},
    text::outline::{GlyphOutlineProvider, OutlinePath},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Drawing,
    Forming,
    /// Terminal for the orchestration; the shower keeps its own lifecycle.
    Showering,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageEvent {
    DrawInComplete,
}

/// Every event on the shared timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Stage(StageEvent),
    Formation(FormationEvent),
    Shower(ShowerEvent),
}

impl From<StageEvent> for Event {
    fn from(e: StageEvent) -> Self {
        Self::Stage(e)
    }
}

impl From<FormationEvent> for Event {
    fn from(e: FormationEvent) -> Self {
        Self::Formation(e)
    }
}

impl From<ShowerEvent> for Event {
    fn from(e: ShowerEvent) -> Self {
        Self::Shower(e)
    }
}

/// One celebration run: owns the timeline and both particle systems, but no particle data of
/// its own.
#[derive(Debug)]
pub struct Celebration {
    config: CelebrationConfig,
    outline: OutlinePath,
    sampling: SampleOutcome,
    scheduler: Scheduler<Event>,
    now: f64,
    stage: Stage,
    flags: StageState,
    started_at: Option<f64>,
    draw_in: Option<Tween<f64>>,
    formation: FormationParticleSystem,
    shower: ShowerParticleSystem,
}

impl Celebration {
    /// Trace the configured text with `provider` and prepare the formation batch.
    pub fn new(
        config: CelebrationConfig,
        provider: &dyn GlyphOutlineProvider,
    ) -> BurstResult<Self> {
        config.validate()?;
        let local = Rect::from_origin_size(Point::ORIGIN, config.placement_size);
        let outline = provider.outline_in(&config.text, &config.font, local)?;
        Self::with_outline(config, outline)
    }

    /// Use an outline already expressed in placement-local coordinates
    /// (`(0, 0)..placement_size`).
    pub fn with_outline(
        config: CelebrationConfig,
        local_outline: OutlinePath,
    ) -> BurstResult<Self> {
        config.validate()?;
        let t = &config.timings;
        let local = Rect::from_origin_size(Point::ORIGIN, config.placement_size);
        let placement = config.placement_rect();

        let mut rng = StdRng::seed_from_u64(config.seed);
        let sampling = ShapePointSampler::new(t.attempt_multiplier).sample(
            &local_outline,
            t.sample_count,
            local,
            &mut rng,
        );

        let mut formation = FormationParticleSystem::new(t.formation_secs, t.formation_ease);
        formation.prepare(
            &sampling.points,
            config.launch_point(),
            placement,
            &config.palettes.formation()?,
            &mut rng,
        );

        let shower = ShowerParticleSystem::new(
            t.shower_settings(),
            config.palettes.confetti()?,
            StdRng::from_rng(&mut rng),
        )?;

        let outline = local_outline.transformed(Affine::translate(placement.origin().to_vec2()));
        Ok(Self {
            config,
            outline,
            sampling,
            scheduler: Scheduler::new(),
            now: 0.0,
            stage: Stage::Idle,
            flags: StageState::new(),
            started_at: None,
            draw_in: None,
            formation,
            shower,
        })
    }

    /// `Idle -> Drawing`. Returns `false` if the run was already started.
    pub fn start(&mut self, now: f64) -> BurstResult<bool> {
        if self.stage != Stage::Idle {
            return Ok(false);
        }
        if !now.is_finite() || now < self.now {
            return Err(BurstError::validation(format!(
                "start time {now} precedes the timeline ({})",
                self.now
            )));
        }
        let t = &self.config.timings;
        self.now = now;
        self.started_at = Some(now);
        self.draw_in = Some(Tween::new(0.0, 1.0, now, t.draw_in_secs, t.draw_in_ease));
        self.scheduler
            .schedule(now + t.draw_in_secs, StageEvent::DrawInComplete.into())?;
        self.stage = Stage::Drawing;
        tracing::debug!(at = now, "stage: idle -> drawing");
        Ok(true)
    }

    /// Process every event due up to `t`, then sample positions at `t`.
    #[tracing::instrument(skip(self), fields(stage = ?self.stage))]
    pub fn advance_to(&mut self, t: f64) -> BurstResult<()> {
        if !t.is_finite() || t < self.now {
            return Err(BurstError::validation(format!(
                "cannot advance from {} back to {t}",
                self.now
            )));
        }
        while let Some((at, event)) = self.scheduler.pop_due(t) {
            self.now = at;
            self.handle(at, event)?;
        }
        self.now = t;
        self.formation.update(t);
        self.shower.update(t);
        Ok(())
    }

    /// Deliver one event. Duplicate stage signals are ignored rather than re-triggering
    /// downstream stages.
    pub fn handle(&mut self, at: f64, event: Event) -> BurstResult<()> {
        match event {
            Event::Stage(StageEvent::DrawInComplete) => self.on_draw_in_complete(at),
            Event::Formation(e) => {
                if self.formation.handle(e) {
                    self.on_formation_complete(at)?;
                }
                Ok(())
            }
            Event::Shower(e) => self.shower.handle(e, at, &mut self.scheduler),
        }
    }

    fn on_draw_in_complete(&mut self, at: f64) -> BurstResult<()> {
        if !self.flags.complete_drawing() {
            tracing::warn!(at, "duplicate draw-in completion ignored");
            return Ok(());
        }
        self.stage = Stage::Forming;
        tracing::debug!(at, particles = self.formation.len(), "stage: drawing -> forming");
        match self.formation.trigger(at, &mut self.scheduler)? {
            TriggerOutcome::CompletedImmediately => self.on_formation_complete(at),
            TriggerOutcome::Started { .. } | TriggerOutcome::Ignored => Ok(()),
        }
    }

    fn on_formation_complete(&mut self, at: f64) -> BurstResult<()> {
        if !self.flags.complete_formation() {
            tracing::warn!(at, "formation completion ignored");
            return Ok(());
        }
        if self.flags.start_shower() {
            self.stage = Stage::Showering;
            tracing::debug!(at, "stage: forming -> showering");
            if !self.config.keep_formation {
                self.formation.discard();
            }
            self.shower
                .start(at, self.config.canvas.size(), &mut self.scheduler)?;
        }
        Ok(())
    }

    /// Stop spawning, drop every particle and every pending event.
    pub fn teardown(&mut self) {
        self.shower.stop(&mut self.scheduler);
        self.formation.discard();
        self.scheduler.clear();
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let now = self.now;
        let draw_progress = self.draw_in.map_or(0.0, |tw| tw.sample(now));
        let gradient_angle_deg = self.started_at.map_or(0.0, |start| {
            looping_angle_deg(start, self.config.timings.gradient_period_secs, now)
        });
        let radius = self.config.dot_radius;

        FrameSnapshot {
            time: now,
            stage: self.stage,
            drawing_complete: self.flags.drawing_complete(),
            formation_complete: self.flags.formation_complete(),
            shower_started: self.flags.shower_started(),
            outline: OutlineSnapshot {
                draw_progress,
                gradient_angle_deg,
            },
            formation_visible: self.formation.is_launched() && !self.formation.is_empty(),
            formation: self
                .formation
                .particles()
                .iter()
                .map(|p| DotSnapshot {
                    position: p.position,
                    radius,
                    color: p.color,
                })
                .collect(),
            confetti: self
                .shower
                .live()
                .map(|p| ConfettiSnapshot {
                    id: p.id,
                    position: p.position,
                    rotation_deg: p.rotation_deg,
                    size: p.size,
                    shape: p.shape,
                    color: p.color,
                })
                .collect(),
        }
    }

    /// Start (if idle) and sample `frames` evenly spaced snapshots at `fps`.
    pub fn record(&mut self, fps: Fps, frames: u64) -> BurstResult<Vec<FrameSnapshot>> {
        self.start(self.now)?;
        let origin = self.started_at.unwrap_or(self.now);
        let mut out = Vec::with_capacity(frames as usize);
        for f in 0..frames {
            let t = origin + fps.frames_to_secs(f);
            self.advance_to(t.max(self.now))?;
            out.push(self.snapshot());
            // Retired confetti is not part of any later frame.
            self.shower.drain_retired();
        }
        Ok(out)
    }

    pub fn config(&self) -> &CelebrationConfig {
        &self.config
    }

    /// Word outline in world space.
    pub fn outline(&self) -> &OutlinePath {
        &self.outline
    }

    pub fn sampling(&self) -> &SampleOutcome {
        &self.sampling
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn flags(&self) -> &StageState {
        &self.flags
    }

    pub fn formation(&self) -> &FormationParticleSystem {
        &self.formation
    }

    pub fn shower(&self) -> &ShowerParticleSystem {
        &self.shower
    }

    pub fn shower_mut(&mut self) -> &mut ShowerParticleSystem {
        &mut self.shower
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }
}

#[cfg(test)]
#[path = "../tests/unit/orchestrator/orchestrator.rs"]
mod tests;
