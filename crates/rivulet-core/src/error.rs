//! Error types for parameter and time-axis validation.

use std::error::Error;
use std::fmt;

/// Errors from unit-hydrograph parameter validation.
///
/// Raised when a [`UhgParameter`](crate::UhgParameter) or a hydrological
/// distance cannot describe a physical unit hydrograph.
#[derive(Clone, Debug, PartialEq)]
pub enum UhgError {
    /// A shape, rate, velocity or distance value is out of range.
    InvalidParameter {
        /// Which parameter was rejected (`"alpha"`, `"beta"`, `"velocity"`,
        /// `"distance"`, `"dt"`, `"n_steps"` or `"travel_steps"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for UhgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid unit-hydrograph parameter {name}: {value}")
            }
        }
    }
}

impl Error for UhgError {}

/// Errors from [`TimeAxis`](crate::TimeAxis) construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeAxisError {
    /// The step length must be strictly positive.
    InvalidDelta {
        /// The rejected step length in seconds.
        delta: i64,
    },
}

impl fmt::Display for TimeAxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDelta { delta } => {
                write!(f, "time axis delta must be positive, got {delta}s")
            }
        }
    }
}

impl Error for TimeAxisError {}
