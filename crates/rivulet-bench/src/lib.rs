//! Benchmark basins for Rivulet.
//!
//! Provides deterministic synthetic basins for benchmarking:
//!
//! - [`reference_basin`]: 500 rivers, 10 cells each, one week hourly
//! - [`stress_basin`]: 5000 rivers, 20 cells each, one week hourly
//! - [`generate_basin`]: arbitrary size, deterministic per seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rivulet_core::{RiverId, RoutingInfo, TimeAxis, UhgParameter, UtcTime};
use rivulet_network::{River, RiverNetwork};
use rivulet_routing::Cell;
use rivulet_series::PointSeries;
use std::error::Error;

/// One hour.
pub const STEP_SECONDS: i64 = 3600;

/// A synthetic basin: a river tree, the cells draining into it, and the
/// time axis their discharge is aligned to.
#[derive(Clone, Debug)]
pub struct Basin {
    /// The river tree. River 1 is the outlet.
    pub network: RiverNetwork,
    /// Cells, `cells_per_river` per river, grouped by river.
    pub cells: Vec<Cell>,
    /// Hourly axis.
    pub axis: TimeAxis,
}

/// 500 rivers with 10 cells each over 168 hourly steps.
pub fn reference_basin(seed: u64) -> Result<Basin, Box<dyn Error>> {
    generate_basin(seed, 500, 10, 168)
}

/// 5000 rivers with 20 cells each over 168 hourly steps.
pub fn stress_basin(seed: u64) -> Result<Basin, Box<dyn Error>> {
    generate_basin(seed, 5000, 20, 168)
}

/// Build a basin of `rivers` rivers, each fed by `cells_per_river` cells.
///
/// River `i > 1` drains into a pseudo-random river `< i`, so the tree is
/// valid whatever the seed. Reach lengths, cell distances and discharge
/// are drawn from the same deterministic sequence.
pub fn generate_basin(
    seed: u64,
    rivers: usize,
    cells_per_river: usize,
    steps: usize,
) -> Result<Basin, Box<dyn Error>> {
    let axis = TimeAxis::new(UtcTime(0), STEP_SECONDS, steps)?;
    let mut rng = Lcg(seed);

    let mut network = RiverNetwork::new();
    for i in 1..=rivers as u64 {
        let downstream = if i == 1 { 0 } else { 1 + rng.next() % (i - 1) };
        let reach = (1 + rng.next() % 12) as f64 * 3600.0;
        network.add(
            River::new(RiverId(i as i64)).with_downstream(RiverId(downstream as i64), reach),
        )?;
    }

    let mut cells = Vec::with_capacity(rivers * cells_per_river);
    for river in 1..=rivers as i64 {
        for _ in 0..cells_per_river {
            let distance = (rng.next() % 6) as f64 * 3600.0;
            let values = (0..steps)
                .map(|_| (rng.next() % 1000) as f64 / 100.0)
                .collect();
            cells.push(Cell {
                area_m2: 1.0e6,
                routing: RoutingInfo::new(RiverId(river), distance),
                routing_uhg: UhgParameter::default(),
                avg_discharge: PointSeries::from_values(axis, values)?,
            });
        }
    }
    Ok(Basin {
        network,
        cells,
        axis,
    })
}

/// Deterministic multiplicative sequence.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}
