//! Error types for time-series construction and arithmetic.

use std::fmt;

/// Errors arising from series construction or element-wise operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// A convolution was given no weights.
    EmptyWeights,
    /// A convolution weight is negative or not finite.
    InvalidWeight {
        /// Position of the offending weight.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// Two series, or a series and its time axis, disagree in length.
    LengthMismatch {
        /// Length required by the time axis or left operand.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWeights => write!(f, "convolution weights must not be empty"),
            Self::InvalidWeight { index, value } => {
                write!(f, "convolution weight {index} is invalid: {value}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "series length {actual} does not match expected {expected}")
            }
        }
    }
}

impl std::error::Error for SeriesError {}
