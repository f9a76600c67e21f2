/// Convenience result type used across Gridshot.
pub type GridshotResult<T> = Result<T, GridshotError>;

/// Top-level error taxonomy used by capture APIs.
#[derive(thiserror::Error, Debug)]
pub enum GridshotError {
    /// Artifact name contains characters outside the allowed set.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// An operation was invoked in a state that forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The surface could not be captured.
    #[error("capture error: {0}")]
    Capture(String),

    /// The album failed to persist or load an artifact.
    #[error("storage error: {0}")]
    Storage(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridshotError {
    /// Build a [`GridshotError::InvalidName`] value.
    pub fn invalid_name(msg: impl Into<String>) -> Self {
        Self::InvalidName(msg.into())
    }

    /// Build a [`GridshotError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`GridshotError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`GridshotError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
