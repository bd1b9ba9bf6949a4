//! The river value type.

use rivulet_core::{RiverId, RoutingInfo, UhgError, UhgParameter};

/// A named routing point.
///
/// A river collects lateral inflow from cells and outflow from upstream
/// rivers, and passes the sum through its own unit hydrograph. The
/// `downstream` link names the river it drains into (or none) and the
/// hydrological distance to it, which sets the length of that hydrograph.
///
/// Rivers are plain values; the [`RiverNetwork`](crate::RiverNetwork)
/// owns them and validates their links.
///
/// # Examples
///
/// ```
/// use rivulet_core::RiverId;
/// use rivulet_network::River;
///
/// let r = River::new(RiverId(2)).with_downstream(RiverId(1), 7200.0);
/// assert_eq!(r.downstream.id, RiverId(1));
/// // 7200 m at the default 1 m/s is two hourly steps: one gamma sample.
/// assert_eq!(r.uhg(3600).unwrap(), vec![1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct River {
    /// This river's id. Must be `> 0` to be registered.
    pub id: RiverId,
    /// Link to the downstream river, or terminal.
    pub downstream: RoutingInfo,
    /// Unit-hydrograph shape and velocity for the reach below this river.
    pub parameter: UhgParameter,
}

impl River {
    /// A terminal river with default unit-hydrograph parameters.
    pub fn new(id: RiverId) -> Self {
        Self {
            id,
            downstream: RoutingInfo::terminal(),
            parameter: UhgParameter::default(),
        }
    }

    /// Set the downstream link.
    pub fn with_downstream(mut self, id: RiverId, distance: f64) -> Self {
        self.downstream = RoutingInfo::new(id, distance);
        self
    }

    /// Set the unit-hydrograph parameters.
    pub fn with_parameter(mut self, parameter: UhgParameter) -> Self {
        self.parameter = parameter;
        self
    }

    /// Unit hydrograph for a model step of `dt` seconds.
    ///
    /// Its length is `round(distance / velocity / dt)` steps; a sub-step
    /// delay gives the pass-through `[1.0]`.
    pub fn uhg(&self, dt: i64) -> Result<Vec<f64>, UhgError> {
        self.parameter.uhg(self.downstream.distance, dt)
    }

    /// Validate parameters and distance.
    pub(crate) fn validate_hydrograph(&self) -> Result<(), UhgError> {
        self.parameter.validate()?;
        let d = self.downstream.distance;
        if !d.is_finite() || d < 0.0 {
            return Err(UhgError::InvalidParameter {
                name: "distance",
                value: d,
            });
        }
        Ok(())
    }
}
