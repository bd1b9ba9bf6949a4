//! Edge policy for the unfilled prefix of a convolution.

/// What a convolution reads for source indices before the first value.
///
/// For output index `t` and weight index `j`, the source index `t - j` is
/// negative during the first `k - 1` steps of a `k`-weight convolution.
/// The policy decides what stands in for those values.
///
/// # Examples
///
/// ```
/// use rivulet_core::{TimeAxis, UtcTime};
/// use rivulet_series::{ConvolvePolicy, ConvolveSeries, PointSeries, TimeSeries};
///
/// let ta = TimeAxis::new(UtcTime(0), 3600, 3).unwrap();
/// let src = PointSeries::from_values(ta, vec![2.0, 2.0, 2.0]).unwrap();
///
/// // UseZero: the prefix is empty, so the first output only sees half.
/// let zero = ConvolveSeries::new(&src, vec![0.5, 0.5], ConvolvePolicy::UseZero).unwrap();
/// assert_eq!(zero.values(), vec![1.0, 2.0, 2.0]);
///
/// // UseFirst: the prefix repeats the first value.
/// let first = ConvolveSeries::new(&src, vec![0.5, 0.5], ConvolvePolicy::UseFirst).unwrap();
/// assert_eq!(first.values(), vec![2.0, 2.0, 2.0]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConvolvePolicy {
    /// Values before the start are zero (nothing was flowing).
    #[default]
    UseZero,
    /// Values before the start repeat the first source value (steady state).
    UseFirst,
}
