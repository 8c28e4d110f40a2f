//! Plain per-frame state handed to renderers. Nothing here draws.

use crate::{
    foundation::core::{Point, Rgba8Premul, Size},
    orchestrator::Stage,
    particles::shower::{ConfettiShape, ParticleId},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    pub time: f64,
    pub stage: Stage,
    pub drawing_complete: bool,
    pub formation_complete: bool,
    pub shower_started: bool,
    pub outline: OutlineSnapshot,
    pub formation_visible: bool,
    pub formation: Vec<DotSnapshot>,
    pub confetti: Vec<ConfettiSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OutlineSnapshot {
    /// Eased fraction of the outline stroke drawn so far.
    pub draw_progress: f64,
    pub gradient_angle_deg: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DotSnapshot {
    pub position: Point,
    pub radius: f64,
    pub color: Rgba8Premul,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ConfettiSnapshot {
    pub id: ParticleId,
    pub position: Point,
    pub rotation_deg: f64,
    pub size: Size,
    pub shape: ConfettiShape,
    pub color: Rgba8Premul,
}
