use rand::Rng;

use crate::{
    foundation::core::{Point, Rect, Vec2},
    text::outline::OutlinePath,
};

/// A point inside an outline's fill, relative to the sampling rectangle's origin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampledPoint {
    pub local: Point,
}

impl SampledPoint {
    /// Place the point into a rectangle whose origin corresponds to the sampling origin.
    pub fn to_world(self, placement: Rect) -> Point {
        self.local + placement.origin().to_vec2()
    }
}

/// Result of a rejection sampling run. Fewer points than requested is a degraded result,
/// not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleOutcome {
    pub points: Vec<SampledPoint>,
    pub requested: usize,
    pub attempts: usize,
}

impl SampleOutcome {
    pub fn is_degraded(&self) -> bool {
        self.points.len() < self.requested
    }
}

/// Rejection sampler distributing points uniformly inside a filled outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapePointSampler {
    attempt_multiplier: usize,
}

impl Default for ShapePointSampler {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ShapePointSampler {
    pub fn new(attempt_multiplier: usize) -> Self {
        Self { attempt_multiplier }
    }

    pub fn attempt_budget(&self, count: usize) -> usize {
        count.saturating_mul(self.attempt_multiplier)
    }

    /// Draw uniformly inside `bounds` until `count` points land in `path` or the attempt
    /// budget runs out.
    #[tracing::instrument(skip(self, path, rng), fields(budget = self.attempt_budget(count)))]
    pub fn sample<R: Rng + ?Sized>(
        &self,
        path: &OutlinePath,
        count: usize,
        bounds: Rect,
        rng: &mut R,
    ) -> SampleOutcome {
        let budget = self.attempt_budget(count);
        let mut points = Vec::with_capacity(count);
        let mut attempts = 0usize;

        let drawable = bounds.width() > 0.0 && bounds.height() > 0.0;
        while drawable && points.len() < count && attempts < budget {
            attempts += 1;
            let p = Point::new(
                bounds.x0 + rng.random::<f64>() * bounds.width(),
                bounds.y0 + rng.random::<f64>() * bounds.height(),
            );
            if path.contains(p) {
                points.push(SampledPoint {
                    local: p - Vec2::new(bounds.x0, bounds.y0),
                });
            }
        }

        let outcome = SampleOutcome {
            points,
            requested: count,
            attempts,
        };
        if outcome.is_degraded() {
            tracing::info!(
                found = outcome.points.len(),
                requested = count,
                attempts,
                "point sampling stopped at the attempt budget"
            );
        }
        outcome
    }

    /// Sample within the outline's own bounds.
    pub fn sample_outline<R: Rng + ?Sized>(
        &self,
        path: &OutlinePath,
        count: usize,
        rng: &mut R,
    ) -> SampleOutcome {
        self.sample(path, count, path.bounds(), rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/sampler.rs"]
mod tests;
