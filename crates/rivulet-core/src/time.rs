//! Fixed-step time axis.

use crate::error::TimeAxisError;
use std::fmt;
use std::ops::Range;

/// Seconds since the Unix epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtcTime(pub i64);

impl fmt::Display for UtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<i64> for UtcTime {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// A time axis of `n` consecutive periods of equal length `delta` seconds,
/// starting at `start`.
///
/// Period `i` covers `[start + i*delta, start + (i+1)*delta)`. The axis is
/// fixed for the lifetime of a routing model.
///
/// # Examples
///
/// ```
/// use rivulet_core::{TimeAxis, UtcTime};
///
/// let ta = TimeAxis::new(UtcTime(0), 3600, 24).unwrap();
/// assert_eq!(ta.len(), 24);
/// assert_eq!(ta.time(2), UtcTime(7200));
/// assert_eq!(ta.index_of(UtcTime(7199)), Some(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeAxis {
    start: UtcTime,
    delta: i64,
    n: usize,
}

impl TimeAxis {
    /// Create a new axis. `delta` is the step length in seconds.
    ///
    /// Returns `Err(TimeAxisError::InvalidDelta)` if `delta <= 0`.
    pub fn new(start: UtcTime, delta: i64, n: usize) -> Result<Self, TimeAxisError> {
        if delta <= 0 {
            return Err(TimeAxisError::InvalidDelta { delta });
        }
        Ok(Self { start, delta, n })
    }

    /// Start of the first period.
    pub fn start(&self) -> UtcTime {
        self.start
    }

    /// Step length in seconds.
    pub fn delta(&self) -> i64 {
        self.delta
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the axis has no periods.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Start time of period `i`.
    pub fn time(&self, i: usize) -> UtcTime {
        UtcTime(self.start.0 + self.delta * i as i64)
    }

    /// Half-open time range covered by period `i`.
    pub fn period(&self, i: usize) -> Range<UtcTime> {
        self.time(i)..self.time(i + 1)
    }

    /// Half-open time range covered by the whole axis.
    pub fn total_period(&self) -> Range<UtcTime> {
        self.start..self.time(self.n)
    }

    /// Index of the period containing `t`, or `None` if outside the axis.
    pub fn index_of(&self, t: UtcTime) -> Option<usize> {
        if t < self.start {
            return None;
        }
        let i = ((t.0 - self.start.0) / self.delta) as usize;
        (i < self.n).then_some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_delta() {
        assert_eq!(
            TimeAxis::new(UtcTime(0), 0, 10),
            Err(TimeAxisError::InvalidDelta { delta: 0 })
        );
        assert!(TimeAxis::new(UtcTime(0), -3600, 10).is_err());
    }

    #[test]
    fn periods_are_contiguous() {
        let ta = TimeAxis::new(UtcTime(100), 10, 5).unwrap();
        assert_eq!(ta.period(0), UtcTime(100)..UtcTime(110));
        assert_eq!(ta.period(4).end, ta.total_period().end);
        assert_eq!(ta.total_period(), UtcTime(100)..UtcTime(150));
    }

    #[test]
    fn index_of_outside_axis() {
        let ta = TimeAxis::new(UtcTime(100), 10, 5).unwrap();
        assert_eq!(ta.index_of(UtcTime(99)), None);
        assert_eq!(ta.index_of(UtcTime(100)), Some(0));
        assert_eq!(ta.index_of(UtcTime(149)), Some(4));
        assert_eq!(ta.index_of(UtcTime(150)), None);
    }
}
