//! Lazy convolution of a series with a weight vector.

use crate::error::SeriesError;
use crate::point::{PointInterpretation, PointSeries};
use crate::policy::ConvolvePolicy;
use crate::series::TimeSeries;
use rivulet_core::TimeAxis;

/// A series formed by convolving `source` with a finite weight vector.
///
/// `y[t] = Σ_j w[j] · x̂(t - j)`, where `x̂` reads the source for
/// non-negative indices and consults the [`ConvolvePolicy`] before the
/// start. Values are computed on demand; the output has the same axis,
/// length and point interpretation as the source.
///
/// Weights must be finite and non-negative but need not sum to one.
#[derive(Clone, Debug)]
pub struct ConvolveSeries<S> {
    source: S,
    weights: Vec<f64>,
    policy: ConvolvePolicy,
}

impl<S: TimeSeries> ConvolveSeries<S> {
    /// Build a convolution view over `source`.
    ///
    /// Returns `Err(SeriesError::EmptyWeights)` if `weights` is empty, or
    /// `Err(SeriesError::InvalidWeight)` for a negative or non-finite weight.
    pub fn new(source: S, weights: Vec<f64>, policy: ConvolvePolicy) -> Result<Self, SeriesError> {
        if weights.is_empty() {
            return Err(SeriesError::EmptyWeights);
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(SeriesError::InvalidWeight { index, value });
        }
        Ok(Self {
            source,
            weights,
            policy,
        })
    }

    /// The convolution weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The edge policy.
    pub fn policy(&self) -> ConvolvePolicy {
        self.policy
    }

    /// The underlying source series.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Materialize every value into a [`PointSeries`].
    pub fn realize(&self) -> PointSeries {
        PointSeries::from_series(self)
    }
}

impl<S: TimeSeries> TimeSeries for ConvolveSeries<S> {
    fn time_axis(&self) -> &TimeAxis {
        self.source.time_axis()
    }

    fn point_interpretation(&self) -> PointInterpretation {
        self.source.point_interpretation()
    }

    fn value(&self, t: usize) -> f64 {
        let mut y = 0.0;
        for (j, &w) in self.weights.iter().enumerate() {
            if j <= t {
                y += w * self.source.value(t - j);
            } else {
                match self.policy {
                    ConvolvePolicy::UseZero => break,
                    ConvolvePolicy::UseFirst => y += w * self.source.value(0),
                }
            }
        }
        y
    }

    fn len(&self) -> usize {
        self.source.len()
    }
}
