use thiserror::Error;

/// Failures shared by every stage of the dead-reckoning pipeline.
///
/// All of these are fatal for the run that hit them. An analysis that simply
/// finds nothing (no peak above threshold, no angle past the turn threshold)
/// is not an error and yields empty event lists instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid filter configuration: {reason}")]
    InvalidFilter { reason: String },

    #[error("Trace too short for filter: need at least {required} samples, have {available}")]
    TooShort { required: usize, available: usize },

    #[error("Degenerate timing: non-positive time step ending at sample {index}")]
    DegenerateTiming { index: usize },

    #[error("Insufficient samples: need {required}, have {available}")]
    InsufficientSamples { required: usize, available: usize },

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
