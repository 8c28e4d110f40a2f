//! Demo consumer of frame snapshots: a CPU rasterizer.

/// Frame buffer and render settings.
pub mod backend;
/// `vello_cpu` renderer.
pub mod cpu;
