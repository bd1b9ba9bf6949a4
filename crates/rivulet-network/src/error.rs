//! Error types for river network operations.

use rivulet_core::{RiverId, UhgError};
use std::error::Error;
use std::fmt;

/// Errors from river network construction, lookup and rewiring.
///
/// Every variant carries the id(s) involved. A failed mutation leaves the
/// network exactly as it was before the call.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkError {
    /// A river id must be strictly positive.
    InvalidId {
        /// The rejected id.
        id: RiverId,
    },
    /// A river with this id is already registered.
    DuplicateId {
        /// The duplicated id.
        id: RiverId,
    },
    /// No river with this id is registered.
    UnknownId {
        /// The missing id.
        id: RiverId,
    },
    /// A river may not drain into itself.
    SelfLoop {
        /// The river pointing at itself.
        id: RiverId,
    },
    /// A new river references a downstream river that is not registered.
    ///
    /// Downstream rivers must be added before the rivers draining into them.
    UnknownDownstream {
        /// The river being added.
        id: RiverId,
        /// Its unregistered downstream id.
        downstream: RiverId,
    },
    /// The mutation would introduce a directed cycle and was rolled back.
    WouldCycle {
        /// The river being linked.
        id: RiverId,
        /// The downstream target that would close the cycle.
        downstream: RiverId,
    },
    /// The river's unit-hydrograph parameters or distance are invalid.
    InvalidUhgParam {
        /// The river carrying the parameters.
        id: RiverId,
        /// What was wrong with them.
        source: UhgError,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { id } => write!(f, "river id must be > 0, got {id}"),
            Self::DuplicateId { id } => write!(f, "river {id} is already registered"),
            Self::UnknownId { id } => write!(f, "river {id} is not registered"),
            Self::SelfLoop { id } => write!(f, "river {id} may not drain into itself"),
            Self::UnknownDownstream { id, downstream } => write!(
                f,
                "river {id} references downstream river {downstream}, which is not \
                 registered; add downstream rivers first"
            ),
            Self::WouldCycle { id, downstream } => {
                write!(f, "linking river {id} to {downstream} would create a cycle")
            }
            Self::InvalidUhgParam { id, source } => {
                write!(f, "river {id}: {source}")
            }
        }
    }
}

impl Error for NetworkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUhgParam { source, .. } => Some(source),
            _ => None,
        }
    }
}
