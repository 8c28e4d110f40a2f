use rand::Rng;

use crate::{
    animation::{ease::Ease, scheduler::Scheduler, signal::OneShot},
    foundation::{
        core::{Point, Rect, Rgba8Premul},
        error::BurstResult,
    },
    particles::{palette::Palette, sampler::SampledPoint},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FormationParticle {
    pub id: u32,
    pub position: Point,
    pub launch: Point,
    pub target: Point,
    pub color: Rgba8Premul,
}

/// Scheduled by [`FormationParticleSystem::trigger`]; `batch` guards against a batch that was
/// replaced while in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationEvent {
    Complete { batch: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerOutcome {
    Started { completes_at: f64 },
    /// Empty batch: completion already signalled.
    CompletedImmediately,
    /// The batch is already flying or complete.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Ready,
    Flying { start: f64 },
    Complete,
}

/// A batch of particles that fly together from one launch point to their sampled targets.
#[derive(Debug)]
pub struct FormationParticleSystem {
    particles: Vec<FormationParticle>,
    duration: f64,
    ease: Ease,
    phase: Phase,
    batch: u64,
    completed: OneShot,
}

impl FormationParticleSystem {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            particles: Vec::new(),
            duration: duration.max(0.0),
            ease,
            phase: Phase::Ready,
            batch: 0,
            completed: OneShot::new(),
        }
    }

    /// Replace the batch: one particle per point, all waiting at `launch`.
    pub fn prepare<R: Rng + ?Sized>(
        &mut self,
        points: &[SampledPoint],
        launch: Point,
        placement: Rect,
        palette: &Palette,
        rng: &mut R,
    ) -> &[FormationParticle] {
        self.particles = points
            .iter()
            .enumerate()
            .map(|(i, p)| FormationParticle {
                id: i as u32,
                position: launch,
                launch,
                target: p.to_world(placement),
                color: palette.pick(rng),
            })
            .collect();
        self.phase = Phase::Ready;
        self.batch += 1;
        self.completed = OneShot::new();
        tracing::debug!(
            batch = self.batch,
            particles = self.particles.len(),
            "formation batch prepared"
        );
        &self.particles
    }

    /// Start the burst. Repeated triggers of a flying or completed batch are no-ops.
    pub fn trigger<E: From<FormationEvent>>(
        &mut self,
        now: f64,
        scheduler: &mut Scheduler<E>,
    ) -> BurstResult<TriggerOutcome> {
        if self.phase != Phase::Ready {
            tracing::debug!(batch = self.batch, "formation trigger ignored");
            return Ok(TriggerOutcome::Ignored);
        }
        if self.particles.is_empty() {
            self.phase = Phase::Complete;
            self.completed.fire();
            return Ok(TriggerOutcome::CompletedImmediately);
        }

        let completes_at = now + self.duration;
        scheduler.schedule(completes_at, FormationEvent::Complete { batch: self.batch }.into())?;
        self.phase = Phase::Flying { start: now };
        Ok(TriggerOutcome::Started { completes_at })
    }

    /// Apply a completion event. Returns `true` exactly once per batch.
    pub fn handle(&mut self, event: FormationEvent) -> bool {
        let FormationEvent::Complete { batch } = event;
        if batch != self.batch || !matches!(self.phase, Phase::Flying { .. }) {
            tracing::trace!(batch, current = self.batch, "stale formation completion");
            return false;
        }
        for p in &mut self.particles {
            p.position = p.target;
        }
        self.phase = Phase::Complete;
        self.completed.fire()
    }

    /// Move every particle to its position at `now`. All particles share one start and duration.
    pub fn update(&mut self, now: f64) {
        let Phase::Flying { start } = self.phase else {
            return;
        };
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            self.ease.apply((now - start) / self.duration)
        };
        for p in &mut self.particles {
            p.position = p.launch.lerp(p.target, t);
        }
    }

    pub fn particles(&self) -> &[FormationParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_launched(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn is_complete(&self) -> bool {
        self.completed.is_set()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Drop the batch once its stage is over.
    pub fn discard(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/formation.rs"]
mod tests;
