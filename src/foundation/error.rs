/// Convenience result type used across glyphburst.
pub type BurstResult<T> = Result<T, BurstError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degraded sampling, empty formation batches and stale per-particle events are not errors;
/// they are reported through ordinary return values and absorbed where they occur.
#[derive(thiserror::Error, Debug)]
pub enum BurstError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Glyph outline extraction failed (no fonts, unparsable text document, empty glyph run).
    #[error("outline error: {0}")]
    Outline(String),

    /// Rasterization of a frame snapshot failed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BurstError {
    /// Build a [`BurstError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BurstError::Outline`] value.
    pub fn outline(msg: impl Into<String>) -> Self {
        Self::Outline(msg.into())
    }

    /// Build a [`BurstError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for BurstError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
