//! Paires Error Types
//!
//! Centralized error handling. None of these are fatal: every caller
//! recovers into a well-defined prior or default state.

use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the round controller and its collaborators
#[derive(Error, Debug)]
pub enum PairsError {
    #[error("Resource missing: {0}")]
    ResourceMissing(PathBuf),

    #[error("No active round")]
    NoActiveRound,

    #[error("No pair list selected")]
    NoSelection,

    #[error("Unknown category: {0}")]
    InvalidCategoryLabel(String),

    #[error("Settings load failure: {0}")]
    SettingsLoad(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Feedback playback in progress")]
    FeedbackInProgress,

    #[error("Audio error: {0}")]
    Audio(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PairsError {
    /// Transitions that are silently ignored rather than reported to the learner
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            PairsError::NoActiveRound | PairsError::NoSelection | PairsError::FeedbackInProgress
        )
    }
}

/// Result type alias for Paires operations
pub type PairsResult<T> = Result<T, PairsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_errors() {
        assert!(PairsError::NoActiveRound.is_silent());
        assert!(PairsError::NoSelection.is_silent());
        assert!(PairsError::FeedbackInProgress.is_silent());
        assert!(!PairsError::InvalidCategoryLabel("x_y".into()).is_silent());
    }

    #[test]
    fn test_display() {
        let err = PairsError::InvalidCategoryLabel("x_y".to_string());
        assert_eq!(err.to_string(), "Unknown category: x_y");
        let err = PairsError::Audio("Audio thread disconnected".to_string());
        assert_eq!(err.to_string(), "Audio error: Audio thread disconnected");
        assert!(!err.is_silent());
    }
}
