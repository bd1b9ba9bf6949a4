//! Strongly-typed identifiers.

use std::fmt;

/// User-assigned identifier of a river (routing point).
///
/// Valid ids are strictly positive. [`RiverId::NONE`] (zero) is the null
/// reference used by a terminal [`RoutingInfo`](crate::RoutingInfo) and by
/// cells that do not drain into any river.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RiverId(pub i64);

impl RiverId {
    /// The null river reference.
    pub const NONE: RiverId = RiverId(0);

    /// Whether this id may name a river (`id > 0`).
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }

    /// Whether this is the null reference.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RiverId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Position of a cell within the cell collection bound to a routing model.
///
/// Cells are owned by the host simulator; the routing core only ever
/// refers to them by their index in the slice it was handed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(pub usize);

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CellIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_not_valid() {
        assert!(RiverId::NONE.is_none());
        assert!(!RiverId::NONE.is_valid());
        assert!(!RiverId(-3).is_valid());
        assert!(RiverId(1).is_valid());
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(RiverId(42).to_string(), "42");
        assert_eq!(CellIndex(7).to_string(), "7");
    }
}
