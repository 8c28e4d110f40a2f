//! glyphburst is a staged celebration animation engine.
//!
//! A word is traced as a vector outline, its interior is sampled into a point cloud, particles
//! burst from a launch point to assemble the word, and a timed confetti shower follows.
//!
//! # Pipeline overview
//!
//! 1. **Outline**: `text + FontDescriptor -> OutlinePath` via a [`GlyphOutlineProvider`]
//! 2. **Sample**: `OutlinePath -> Vec<SampledPoint>` (rejection sampling with an attempt budget)
//! 3. **Animate**: [`Celebration`] drives draw-in, formation and shower on one event timeline
//! 4. **Snapshot**: [`FrameSnapshot`] is the plain per-frame state handed to renderers
//! 5. **Render** (optional): [`CpuRenderer`] rasterizes snapshots to premultiplied RGBA8
//!
//! Time is an explicit `f64` in seconds. Nothing reads a wall clock, and every random choice
//! comes from a seeded generator, so a run is reproducible for a given configuration.
#![forbid(unsafe_code)]

/// Timeline primitives: easing, tweens, the event scheduler and one-shot stage signals.
pub mod animation;
/// Shared value types, configuration and errors.
pub mod foundation;
/// Stage sequencing.
pub mod orchestrator;
/// Particle systems and the point sampler.
pub mod particles;
/// CPU rasterizer for snapshots.
pub mod render;
/// Per-frame render boundary.
pub mod snapshot;
/// Glyph outline providers.
pub mod text;

pub use animation::ease::Ease;
pub use animation::scheduler::{EventId, Scheduler};
pub use animation::signal::{OneShot, StageState};
pub use animation::tween::{Lerp, Tween, looping_angle_deg};
pub use foundation::config::{CelebrationConfig, PaletteOverrides, Timings};
pub use foundation::core::{Affine, BezPath, Canvas, Fps, Point, Rect, Rgba8Premul, Size, Vec2};
pub use foundation::error::{BurstError, BurstResult};
pub use orchestrator::{Celebration, Event, Stage, StageEvent};
pub use particles::formation::{
    FormationEvent, FormationParticle, FormationParticleSystem, TriggerOutcome,
};
pub use particles::palette::Palette;
pub use particles::sampler::{SampleOutcome, SampledPoint, ShapePointSampler};
pub use particles::shower::{
    ConfettiShape, ParticleId, ShowerEvent, ShowerParticle, ShowerParticleSystem, ShowerSettings,
    ShowerState,
};
pub use render::backend::{FrameRGBA, RenderSettings};
pub use render::cpu::CpuRenderer;
pub use snapshot::{ConfettiSnapshot, DotSnapshot, FrameSnapshot, OutlineSnapshot};
pub use text::outline::{FontDescriptor, GlyphOutlineProvider, OutlinePath, outline_with_fallback};
pub use text::segment::SegmentGlyphs;
pub use text::system::SystemFontOutlines;
