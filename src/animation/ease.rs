use std::f64::consts::PI;

/// Timing curve for a normalized `[0, 1]` progress value.
///
/// Everything in a celebration either settles into place (`Out*`), sweeps evenly through a
/// stroke (`InOut*`) or falls at constant speed (`Linear`), so only those shapes exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    OutQuad,
    OutCubic,
    OutQuart,
    InOutSine,
    InOutCubic,
}

impl Ease {
    pub const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::OutQuad,
        Ease::OutCubic,
        Ease::OutQuart,
        Ease::InOutSine,
        Ease::InOutCubic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => settle(t, 2),
            Self::OutCubic => settle(t, 3),
            Self::OutQuart => settle(t, 4),
            Self::InOutSine => 0.5 * (1.0 - (PI * t).cos()),
            Self::InOutCubic => {
                // Accelerate over the first half, mirror it over the second.
                let half = |x: f64| 0.5 * (2.0 * x).powi(3);
                if t < 0.5 { half(t) } else { 1.0 - half(1.0 - t) }
            }
        }
    }

    /// Whether the curve decelerates into its end value.
    pub fn is_ease_out(self) -> bool {
        matches!(self, Self::OutQuad | Self::OutCubic | Self::OutQuart)
    }
}

/// `1 - (1 - t)^n`: fast start, soft landing.
fn settle(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
