//! The cell boundary: what the routing core needs from a simulated cell.

use rivulet_core::{RoutingInfo, UhgParameter};
use rivulet_series::PointSeries;

/// Seconds per hour times millimetres per metre.
const MMH_PER_M3S_PER_M2: f64 = 3.6e6;

/// Convert a depth rate in mm/h over `area_m2` into a flow in m³/s.
pub fn mmh_to_m3s(q_mmh: f64, area_m2: f64) -> f64 {
    q_mmh * area_m2 / MMH_PER_M3S_PER_M2
}

/// Convert a flow in m³/s over `area_m2` into a depth rate in mm/h.
pub fn m3s_to_mmh(q_m3s: f64, area_m2: f64) -> f64 {
    q_m3s * MMH_PER_M3S_PER_M2 / area_m2
}

/// A spatial unit that produces discharge and drains into a river.
///
/// Cells are simulated and owned by the host; the routing model only reads
/// them. `Sync` is required so cell contributions can be evaluated in
/// parallel.
pub trait RoutingCell: Sync {
    /// Cell area in m².
    fn area_m2(&self) -> f64;

    /// Receiving river and hydrological distance to it.
    /// A terminal link means the cell drains into no river.
    fn routing(&self) -> RoutingInfo;

    /// Unit-hydrograph parameters for the cell-to-river reach.
    fn routing_uhg(&self) -> UhgParameter;

    /// Average discharge per step in mm/h, aligned to the model time axis.
    fn avg_discharge_mmh(&self) -> &PointSeries;
}

/// A plain cell record.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Area in m².
    pub area_m2: f64,
    /// Link to the receiving river.
    pub routing: RoutingInfo,
    /// Cell-to-river unit-hydrograph parameters.
    pub routing_uhg: UhgParameter,
    /// Average discharge per step in mm/h.
    pub avg_discharge: PointSeries,
}

impl RoutingCell for Cell {
    fn area_m2(&self) -> f64 {
        self.area_m2
    }

    fn routing(&self) -> RoutingInfo {
        self.routing
    }

    fn routing_uhg(&self) -> UhgParameter {
        self.routing_uhg
    }

    fn avg_discharge_mmh(&self) -> &PointSeries {
        &self.avg_discharge
    }
}
