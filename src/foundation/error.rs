/// Convenience result type used across heartfx.
pub type HeartResult<T> = Result<T, HeartError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Runtime drawing never produces errors: out-of-bounds pixels are dropped and degenerate
/// timing falls back to a nominal step. Errors only surface while building assets or
/// reading configuration.
#[derive(thiserror::Error, Debug)]
pub enum HeartError {
    /// Font face could not be loaded or shaped. Fatal at startup.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid caller-provided input (dimensions, tables, parameters).
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization failed for reasons other than bad input.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failures while reading configuration or assets.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeartError {
    /// Build a [`HeartError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`HeartError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeartError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HeartError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`HeartError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// True for the startup failures that must abort the process.
    pub fn is_fatal_init(&self) -> bool {
        matches!(self, Self::Font(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
