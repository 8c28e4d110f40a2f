use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Rgba8Premul},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Rgba8Premul {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// A single eased transition between two values on the shared timeline (seconds).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, start: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
            ease,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Linear (un-eased) progress in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return if now >= self.start { 1.0 } else { 0.0 };
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn sample(&self, now: f64) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to.clone();
        }
        if p <= 0.0 {
            return self.from.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(p))
    }
}

/// Perpetual sawtooth angle in degrees, restarting at 0 each `period` (never reversing).
pub fn looping_angle_deg(start: f64, period: f64, now: f64) -> f64 {
    if period <= 0.0 || now <= start {
        return 0.0;
    }
    ((now - start) / period).fract() * 360.0
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
