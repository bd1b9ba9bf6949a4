//! Materialized point series.

use crate::error::SeriesError;
use crate::series::TimeSeries;
use rivulet_core::TimeAxis;

/// How a series value relates to the period it is stored at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointInterpretation {
    /// The value is the average over the period (discharge, fluxes).
    #[default]
    Average,
    /// The value is an instantaneous sample at the period start (states).
    Instant,
}

/// A series with one stored value per period of its time axis.
///
/// The length of `values` always equals the length of the axis.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSeries {
    axis: TimeAxis,
    values: Vec<f64>,
    fx: PointInterpretation,
}

impl PointSeries {
    /// A series holding `value` in every period, average-interpreted.
    pub fn filled(axis: TimeAxis, value: f64) -> Self {
        Self {
            values: vec![value; axis.len()],
            axis,
            fx: PointInterpretation::Average,
        }
    }

    /// A zero series, average-interpreted.
    pub fn zeros(axis: TimeAxis) -> Self {
        Self::filled(axis, 0.0)
    }

    /// Wrap `values` aligned to `axis`, average-interpreted.
    ///
    /// Returns `Err(SeriesError::LengthMismatch)` if the lengths differ.
    pub fn from_values(axis: TimeAxis, values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.len() != axis.len() {
            return Err(SeriesError::LengthMismatch {
                expected: axis.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            axis,
            values,
            fx: PointInterpretation::Average,
        })
    }

    /// Realize any series into stored values, keeping its axis and
    /// interpretation.
    pub fn from_series<S: TimeSeries + ?Sized>(source: &S) -> Self {
        Self {
            axis: *source.time_axis(),
            values: source.values(),
            fx: source.point_interpretation(),
        }
    }

    /// Replace the point interpretation.
    pub fn with_interpretation(mut self, fx: PointInterpretation) -> Self {
        self.fx = fx;
        self
    }

    /// Overwrite the value of period `i`.
    pub fn set(&mut self, i: usize, value: f64) {
        self.values[i] = value;
    }

    /// Add `value` to period `i`.
    pub fn add(&mut self, i: usize, value: f64) {
        self.values[i] += value;
    }

    /// Element-wise accumulate `other` into `self`.
    ///
    /// Returns `Err(SeriesError::LengthMismatch)` if the lengths differ.
    pub fn add_series<S: TimeSeries + ?Sized>(&mut self, other: &S) -> Result<(), SeriesError> {
        if other.len() != self.values.len() {
            return Err(SeriesError::LengthMismatch {
                expected: self.values.len(),
                actual: other.len(),
            });
        }
        for (i, v) in self.values.iter_mut().enumerate() {
            *v += other.value(i);
        }
        Ok(())
    }

    /// Multiply every value by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }

    /// Stored values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consume the series, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl TimeSeries for PointSeries {
    fn time_axis(&self) -> &TimeAxis {
        &self.axis
    }

    fn point_interpretation(&self) -> PointInterpretation {
        self.fx
    }

    fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> Vec<f64> {
        self.values.clone()
    }
}
