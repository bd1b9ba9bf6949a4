//! Gamma unit-hydrograph generation.
//!
//! A unit hydrograph (UHG) is a normalized impulse response. Rivulet
//! discretizes a gamma density by sampling it at evenly spaced quantiles
//! of the gamma CDF, which concentrates resolution where the mass is,
//! then normalizes the samples to sum to one.

use crate::error::UhgError;
use statrs::distribution::{Continuous, ContinuousCDF, Gamma};

/// Upper bound on bisection steps for the quantile search.
const QUANTILE_MAX_ITER: usize = 1100;

/// Relative bracket width at which the quantile search stops.
const QUANTILE_REL_TOL: f64 = 1e-15;

/// Longest unit hydrograph, in steps, that [`make_uhg`] and [`uhg_steps`]
/// accept. At an hourly step this is a travel time of over a year.
pub const MAX_UHG_STEPS: usize = 10_000;

/// Build a normalized unit hydrograph of `n_steps` nominal length from a
/// gamma distribution with shape `alpha` and scale `beta`.
///
/// The density is sampled at the quantiles `i / n_steps` for
/// `i = 1..n_steps-1`, so the result has `n_steps - 1` weights summing
/// to one. When that leaves nothing (`n_steps <= 1`) the result is the
/// pass-through `[1.0]`.
///
/// If the sampled density sums to zero or overflows (extreme shapes), the
/// weights are spread evenly instead, so the result is always normalized.
///
/// Returns `Err(UhgError::InvalidParameter)` for a non-positive or
/// non-finite `alpha` or `beta`, or for `n_steps > MAX_UHG_STEPS`.
///
/// # Examples
///
/// ```
/// use rivulet_core::make_uhg;
///
/// assert_eq!(make_uhg(0, 3.0, 0.7).unwrap(), vec![1.0]);
/// let w = make_uhg(5, 3.0, 0.7).unwrap();
/// assert_eq!(w.len(), 4);
/// assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
pub fn make_uhg(n_steps: usize, alpha: f64, beta: f64) -> Result<Vec<f64>, UhgError> {
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(UhgError::InvalidParameter {
            name: "alpha",
            value: alpha,
        });
    }
    if !beta.is_finite() || beta <= 0.0 {
        return Err(UhgError::InvalidParameter {
            name: "beta",
            value: beta,
        });
    }
    if n_steps > MAX_UHG_STEPS {
        return Err(UhgError::InvalidParameter {
            name: "n_steps",
            value: n_steps as f64,
        });
    }
    if n_steps <= 1 {
        return Ok(vec![1.0]);
    }

    // statrs parameterizes by rate; beta is a scale.
    let gamma = Gamma::new(alpha, 1.0 / beta).map_err(|_| UhgError::InvalidParameter {
        name: "beta",
        value: beta,
    })?;

    let d = 1.0 / n_steps as f64;
    let weights: Vec<f64> = (1..n_steps)
        .map(|i| gamma.pdf(gamma_quantile(&gamma, i as f64 * d, alpha * beta)))
        .collect();
    Ok(normalize_or_spread(weights))
}

/// Scale `weights` to sum to one, or spread them evenly when their sum is
/// zero, NaN or infinite.
fn normalize_or_spread(mut weights: Vec<f64>) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 || weights.iter().any(|w| !w.is_finite()) {
        let even = 1.0 / weights.len() as f64;
        weights.iter_mut().for_each(|w| *w = even);
        return weights;
    }
    weights.iter_mut().for_each(|w| *w /= sum);
    weights
}

/// Number of UHG steps for travelling `distance` metres at `velocity` m/s
/// with a step of `dt` seconds, rounded to the nearest step.
///
/// Returns `Err(UhgError::InvalidParameter)` for a negative distance, a
/// non-positive velocity or step, or a travel time longer than
/// [`MAX_UHG_STEPS`] steps.
pub fn uhg_steps(distance: f64, velocity: f64, dt: i64) -> Result<usize, UhgError> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(UhgError::InvalidParameter {
            name: "distance",
            value: distance,
        });
    }
    if !velocity.is_finite() || velocity <= 0.0 {
        return Err(UhgError::InvalidParameter {
            name: "velocity",
            value: velocity,
        });
    }
    if dt <= 0 {
        return Err(UhgError::InvalidParameter {
            name: "dt",
            value: dt as f64,
        });
    }
    let steps = (distance / velocity / dt as f64 + 0.5).floor();
    if !steps.is_finite() || steps > MAX_UHG_STEPS as f64 {
        return Err(UhgError::InvalidParameter {
            name: "travel_steps",
            value: steps,
        });
    }
    Ok(steps as usize)
}

/// Inverse CDF of `gamma` at `q` in `(0, 1)`, by bracketed bisection.
///
/// `mean` seeds the upper bracket, which is doubled until it encloses `q`.
fn gamma_quantile(gamma: &Gamma, q: f64, mean: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = mean.max(f64::MIN_POSITIVE);
    while gamma.cdf(hi) < q && hi.is_finite() {
        lo = hi;
        hi *= 2.0;
    }
    for _ in 0..QUANTILE_MAX_ITER {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi || hi - lo <= QUANTILE_REL_TOL * hi {
            break;
        }
        if gamma.cdf(mid) < q {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
