//! Error types for the rf-timeline core.
//!
//! Per-item failures (a bad capture row, an empty detection band) are absorbed
//! by the extractors and never surface here. [`CoreError`] only covers values
//! that would break the [`Event`](crate::Event) invariants or cannot be
//! persisted.

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the core event model.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CoreError {
    /// An event could not be constructed.
    #[error("Invalid event: {reason}")]
    InvalidEvent {
        /// Which invariant was violated
        reason: String,
    },

    /// A time offset is NaN or infinite.
    #[error("Invalid time offset: {value} is not a finite number of seconds")]
    InvalidOffset {
        /// The rejected offset
        value: f64,
    },

    /// Event attributes could not be rendered for persistence.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Create an [`CoreError::InvalidEvent`] from any displayable reason.
    pub fn invalid_event(reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
