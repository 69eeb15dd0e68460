use thiserror::Error;

/// Activity smoother error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmootherError {
    #[error("Run {position} has no neighbouring run to borrow a label from")]
    NoReplacementLabel { position: usize },

    #[error("Run {position} has no neighbouring run to compare against")]
    ContextUnavailable { position: usize },

    #[error("Location {index}: invalid timestamp {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("Location {index}: unknown activity type {value:?}")]
    UnknownActivity { index: usize, value: String },

    #[error("Location {index}: {field} must be a non-negative number, got {value}")]
    NegativeValue {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Location {index}: missing {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SmootherError {
    /// True for errors caused by malformed input records, false for engine
    /// invariant violations and configuration errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SmootherError::InvalidTimestamp { .. }
                | SmootherError::UnknownActivity { .. }
                | SmootherError::NegativeValue { .. }
                | SmootherError::MissingField { .. }
        )
    }
}

/// Result type for smoother operations
pub type SmootherResult<T> = Result<T, SmootherError>;
