use thiserror::Error;

/// Tracker error types
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("No absolute fix received yet; nothing to hold or dead-reckon from")]
    NoFixYet,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Evaluation interval is empty")]
    EmptyInterval,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Reject non-finite or non-positive scale parameters.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::InvalidConfig(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}
