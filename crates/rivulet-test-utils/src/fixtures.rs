//! Reusable routing fixtures.

use rivulet_core::{RiverId, RoutingInfo, TimeAxis, UhgParameter, UtcTime};
use rivulet_network::{River, RiverNetwork};
use rivulet_routing::Cell;
use rivulet_series::PointSeries;

/// Model step used by every fixture: one hour.
pub const STEP_SECONDS: i64 = 3600;

/// Cell area at which 1 mm/h equals 1 m³/s.
pub const IDENTITY_AREA_M2: f64 = 3.6e6;

/// An hourly axis of `n` steps starting at the epoch.
pub fn hourly_axis(n: usize) -> TimeAxis {
    TimeAxis::new(UtcTime(0), STEP_SECONDS, n).expect("positive step")
}

/// A cell of identity area draining into `river` over `distance` metres,
/// discharging a constant `q_mmh` on every step of `axis`.
///
/// Uses the default routing parameters (1 m/s), so `distance` in metres
/// divided by 3600 is the delay in steps.
pub fn constant_cell(river: i64, distance: f64, q_mmh: f64, axis: TimeAxis) -> Cell {
    Cell {
        area_m2: IDENTITY_AREA_M2,
        routing: RoutingInfo::new(RiverId(river), distance),
        routing_uhg: UhgParameter::default(),
        avg_discharge: PointSeries::filled(axis, q_mmh),
    }
}

/// Like [`constant_cell`] but with an explicit discharge series.
pub fn cell_with_series(river: i64, distance: f64, values: Vec<f64>, axis: TimeAxis) -> Cell {
    Cell {
        avg_discharge: PointSeries::from_values(axis, values).expect("series matches axis"),
        ..constant_cell(river, distance, 0.0, axis)
    }
}

/// A network from `(id, downstream, distance)` triples, added in order.
pub fn network(links: &[(i64, i64, f64)]) -> RiverNetwork {
    let rivers = links.iter().map(|&(id, ds, distance)| {
        River::new(RiverId(id)).with_downstream(RiverId(ds), distance)
    });
    RiverNetwork::from_rivers(rivers).expect("valid fixture network")
}

/// A chain `n -> n-1 -> ... -> 1 -> terminal`, each reach `distance` long.
pub fn chain_network(n: i64, distance: f64) -> RiverNetwork {
    let links: Vec<(i64, i64, f64)> = (1..=n).map(|i| (i, i - 1, distance)).collect();
    network(&links)
}
