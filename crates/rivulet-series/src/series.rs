//! The core `TimeSeries` read trait.

use crate::point::PointInterpretation;
use rivulet_core::TimeAxis;

/// Read access to a series of values aligned to a fixed-step time axis.
///
/// Implemented by the materialized [`PointSeries`](crate::PointSeries)
/// and by lazy views such as [`ConvolveSeries`](crate::ConvolveSeries),
/// whose values are computed on demand.
pub trait TimeSeries {
    /// The time axis the values are aligned to.
    fn time_axis(&self) -> &TimeAxis;

    /// How a value relates to its period.
    fn point_interpretation(&self) -> PointInterpretation;

    /// Value of period `i`. `i` must be `< self.len()`.
    fn value(&self, i: usize) -> f64;

    /// Number of values, equal to the length of the time axis.
    fn len(&self) -> usize {
        self.time_axis().len()
    }

    /// Whether the series has no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Realize every value into a vector.
    fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }
}

impl<S: TimeSeries + ?Sized> TimeSeries for &S {
    fn time_axis(&self) -> &TimeAxis {
        (**self).time_axis()
    }

    fn point_interpretation(&self) -> PointInterpretation {
        (**self).point_interpretation()
    }

    fn value(&self, i: usize) -> f64 {
        (**self).value(i)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn values(&self) -> Vec<f64> {
        (**self).values()
    }
}
