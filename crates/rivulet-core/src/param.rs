//! Routing links and unit-hydrograph parameter bundles.

use crate::error::UhgError;
use crate::id::RiverId;
use crate::uhg::{make_uhg, uhg_steps};

/// Parameters that describe a gamma-shaped unit hydrograph.
///
/// The shape comes from `alpha` (gamma shape) and `beta` (gamma scale);
/// the length of the discretized hydrograph comes from the hydrological
/// distance divided by `velocity` (m/s) and the model step.
///
/// # Examples
///
/// ```
/// use rivulet_core::UhgParameter;
///
/// let p = UhgParameter::default();
/// assert_eq!((p.velocity, p.alpha, p.beta), (1.0, 3.0, 0.7));
/// assert!(UhgParameter::new(0.0, 3.0, 0.7).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UhgParameter {
    /// Flow velocity in m/s. Must be positive.
    pub velocity: f64,
    /// Gamma shape parameter. Must be positive.
    pub alpha: f64,
    /// Gamma scale parameter. Must be positive.
    pub beta: f64,
}

impl Default for UhgParameter {
    fn default() -> Self {
        Self {
            velocity: 1.0,
            alpha: 3.0,
            beta: 0.7,
        }
    }
}

impl UhgParameter {
    /// Create a validated parameter bundle.
    pub fn new(velocity: f64, alpha: f64, beta: f64) -> Result<Self, UhgError> {
        let p = Self {
            velocity,
            alpha,
            beta,
        };
        p.validate()?;
        Ok(p)
    }

    /// Check that every value is finite and strictly positive.
    pub fn validate(&self) -> Result<(), UhgError> {
        for (name, value) in [
            ("velocity", self.velocity),
            ("alpha", self.alpha),
            ("beta", self.beta),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(UhgError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Discretized unit hydrograph for travelling `distance` metres with
    /// a model step of `dt` seconds.
    ///
    /// A delay shorter than half a step yields the pass-through `[1.0]`.
    pub fn uhg(&self, distance: f64, dt: i64) -> Result<Vec<f64>, UhgError> {
        self.validate()?;
        let n_steps = uhg_steps(distance, self.velocity, dt)?;
        make_uhg(n_steps, self.alpha, self.beta)
    }
}

/// Where something drains to, and how far it travels to get there.
///
/// Embedded in rivers (link to the downstream river) and in cells (link
/// to the receiving river). `id == RiverId::NONE` marks a terminal link.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoutingInfo {
    /// Receiving river, or [`RiverId::NONE`].
    pub id: RiverId,
    /// Hydrological distance in metres. Must be `>= 0`.
    pub distance: f64,
}

impl RoutingInfo {
    /// A link to `id` over `distance` metres.
    pub fn new(id: RiverId, distance: f64) -> Self {
        Self { id, distance }
    }

    /// A terminal link: drains nowhere.
    pub fn terminal() -> Self {
        Self::default()
    }

    /// Whether this link drains nowhere.
    pub fn is_terminal(&self) -> bool {
        self.id.is_none()
    }
}
