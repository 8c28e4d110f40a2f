pub mod ease;
pub mod scheduler;
pub mod signal;
pub mod tween;
