//! Error types for the routing model.

use rivulet_core::{CellIndex, RiverId, UhgError};
use rivulet_network::NetworkError;
use rivulet_series::SeriesError;
use std::error::Error;
use std::fmt;

/// Errors from binding or querying a [`RoutingModel`](crate::RoutingModel).
///
/// All validation happens when the model is bound; afterwards only
/// lookups of unregistered rivers or cells can fail.
#[derive(Clone, Debug, PartialEq)]
pub enum RoutingError {
    /// A cell drains into a river id that is not in the network.
    DanglingCellBinding {
        /// The offending cell.
        cell: CellIndex,
        /// The river id it references.
        river: RiverId,
    },
    /// A cell index is out of range.
    UnknownCell {
        /// The requested cell.
        cell: CellIndex,
    },
    /// A cell's routing parameters or distance are invalid.
    InvalidCellParameter {
        /// The offending cell.
        cell: CellIndex,
        /// What was wrong.
        source: UhgError,
    },
    /// A cell's area is negative or not finite.
    InvalidCellArea {
        /// The offending cell.
        cell: CellIndex,
        /// The rejected area in m².
        area: f64,
    },
    /// A cell's discharge series does not match the model time axis.
    CellSeriesLength {
        /// The offending cell.
        cell: CellIndex,
        /// Length of the time axis.
        expected: usize,
        /// Length of the cell series.
        actual: usize,
    },
    /// A river lookup or river parameter failed.
    Network(NetworkError),
    /// A series operation failed.
    Series(SeriesError),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingCellBinding { cell, river } => {
                write!(f, "cell {cell} drains into river {river}, which is not in the network")
            }
            Self::UnknownCell { cell } => write!(f, "cell {cell} does not exist"),
            Self::InvalidCellParameter { cell, source } => write!(f, "cell {cell}: {source}"),
            Self::InvalidCellArea { cell, area } => {
                write!(f, "cell {cell}: area must be finite and >= 0, got {area}")
            }
            Self::CellSeriesLength {
                cell,
                expected,
                actual,
            } => write!(
                f,
                "cell {cell}: discharge series has {actual} values, time axis has {expected}"
            ),
            Self::Network(e) => write!(f, "network: {e}"),
            Self::Series(e) => write!(f, "series: {e}"),
        }
    }
}

impl Error for RoutingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCellParameter { source, .. } => Some(source),
            Self::Network(e) => Some(e),
            Self::Series(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NetworkError> for RoutingError {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

impl From<SeriesError> for RoutingError {
    fn from(e: SeriesError) -> Self {
        Self::Series(e)
    }
}
