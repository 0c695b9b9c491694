/// Convenience result type used across graphfold.
pub type GraphfoldResult<T> = Result<T, GraphfoldError>;

/// Top-level error taxonomy. Every variant is fatal for a run.
#[derive(thiserror::Error, Debug)]
pub enum GraphfoldError {
    /// Invalid input data or configuration (empty slice set, degenerate ranges, bad colors).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while rasterizing layers or composing pages.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when decoding snapshot or config JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraphfoldError {
    /// Build a [`GraphfoldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GraphfoldError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GraphfoldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
