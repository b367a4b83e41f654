//! Model error types.

use std::fmt::{Display, Formatter};

/// Error produced while validating external input or evaluating the power model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A required field is missing from an externally supplied document.
    MissingField(String),
    /// A timing parameter used as a divisor is zero or negative.
    NonPositiveTiming { field: String, value: f64 },
    /// A parameter is outside its physically plausible bounds.
    InvalidValue { field: String, reason: String },
    /// An external document could not be parsed.
    Parse(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::MissingField(field) => {
                write!(f, "required field {} is missing", field)
            }
            ModelError::NonPositiveTiming { field, value } => {
                write!(f, "timing parameter {} must be positive, got {}", field, value)
            }
            ModelError::InvalidValue { field, reason } => {
                write!(f, "invalid value for {}: {}", field, reason)
            }
            ModelError::Parse(message) => {
                write!(f, "cannot parse document: {}", message)
            }
        }
    }
}

impl std::error::Error for ModelError {}
