//! The routing model: cell discharge through unit hydrographs, down the
//! river network.
//!
//! For a river `r` with cells `C(r)` and upstream rivers `U(r)`:
//!
//! ```text
//! cell_output(c) = convolve(q_m3s(c), uhg(c), UseZero)
//! local(r)       = Σ_{c ∈ C(r)} cell_output(c)
//! upstream(r)    = Σ_{u ∈ U(r)} output(u)
//! output(r)      = convolve(local(r) + upstream(r), uhg(r), UseZero)
//! ```
//!
//! Sums run in ascending cell index and ascending upstream id, so every
//! evaluation path produces bit-identical results.

use crate::cell::{mmh_to_m3s, RoutingCell};
use crate::config::{Evaluation, RoutingConfig};
use crate::error::RoutingError;
use indexmap::IndexMap;
use rivulet_core::{CellIndex, RiverId, TimeAxis};
use rivulet_network::{NetworkError, RiverNetwork};
use rivulet_series::{ConvolvePolicy, ConvolveSeries, PointSeries, TimeSeries};
use tracing::{debug, trace};

/// Check that every cell draining into a river names a registered one.
///
/// Cells with a terminal link ([`RiverId::NONE`]) drain nowhere and are
/// accepted.
///
/// # Errors
///
/// [`RoutingError::DanglingCellBinding`] for the first cell, in index
/// order, whose river is not in `network`.
pub fn verify_cell_river_connections<C: RoutingCell>(
    network: &RiverNetwork,
    cells: &[C],
) -> Result<(), RoutingError> {
    for (i, cell) in cells.iter().enumerate() {
        let river = cell.routing().id;
        if !river.is_none() && !network.contains(river) {
            return Err(RoutingError::DanglingCellBinding {
                cell: CellIndex(i),
                river,
            });
        }
    }
    Ok(())
}

/// Routes cell discharge through a river network over a fixed time axis.
///
/// The model borrows the network and the cells for its whole lifetime, so
/// neither can change while it exists. Everything that can fail is checked
/// when the model is bound; afterwards queries only fail for unknown ids.
///
/// # Examples
///
/// ```
/// use rivulet_core::{RiverId, RoutingInfo, TimeAxis, UhgParameter, UtcTime};
/// use rivulet_network::{River, RiverNetwork};
/// use rivulet_routing::{Cell, RoutingModel};
/// use rivulet_series::{PointSeries, TimeSeries};
///
/// let axis = TimeAxis::new(UtcTime(0), 3600, 4).unwrap();
/// let net = RiverNetwork::from_rivers([River::new(RiverId(1))]).unwrap();
/// let cells = vec![Cell {
///     area_m2: 3.6e6,
///     routing: RoutingInfo::new(RiverId(1), 0.0),
///     routing_uhg: UhgParameter::default(),
///     avg_discharge: PointSeries::filled(axis, 1.0),
/// }];
///
/// let model = RoutingModel::new(&net, &cells, axis).unwrap();
/// assert_eq!(model.output_m3s(RiverId(1)).unwrap().values(), vec![1.0; 4]);
/// ```
#[derive(Debug)]
pub struct RoutingModel<'a, C: RoutingCell> {
    network: &'a RiverNetwork,
    cells: &'a [C],
    axis: TimeAxis,
    config: RoutingConfig,
    /// Cell indices per river, ascending.
    bindings: IndexMap<RiverId, Vec<usize>>,
    cell_uhgs: Vec<Vec<f64>>,
    river_uhgs: IndexMap<RiverId, Vec<f64>>,
}

impl<'a, C: RoutingCell> RoutingModel<'a, C> {
    /// Bind a model with the default configuration.
    ///
    /// See [`with_config`](Self::with_config) for the checks performed.
    pub fn new(
        network: &'a RiverNetwork,
        cells: &'a [C],
        axis: TimeAxis,
    ) -> Result<Self, RoutingError> {
        Self::with_config(network, cells, axis, RoutingConfig::default())
    }

    /// Bind a model.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::DanglingCellBinding`] if a cell drains into an
    ///   unregistered river.
    /// - [`RoutingError::InvalidCellArea`] for a negative or non-finite area.
    /// - [`RoutingError::CellSeriesLength`] if a cell's discharge series is
    ///   not as long as `axis`.
    /// - [`RoutingError::InvalidCellParameter`] for invalid cell
    ///   unit-hydrograph parameters or distance.
    /// - [`RoutingError::Network`] if a river's hydrograph cannot be built.
    pub fn with_config(
        network: &'a RiverNetwork,
        cells: &'a [C],
        axis: TimeAxis,
        config: RoutingConfig,
    ) -> Result<Self, RoutingError> {
        verify_cell_river_connections(network, cells)?;

        let dt = axis.delta();
        let mut bindings: IndexMap<RiverId, Vec<usize>> = IndexMap::new();
        let mut cell_uhgs = Vec::with_capacity(cells.len());
        for (i, cell) in cells.iter().enumerate() {
            let index = CellIndex(i);
            let area = cell.area_m2();
            if !area.is_finite() || area < 0.0 {
                return Err(RoutingError::InvalidCellArea { cell: index, area });
            }
            let actual = cell.avg_discharge_mmh().len();
            if actual != axis.len() {
                return Err(RoutingError::CellSeriesLength {
                    cell: index,
                    expected: axis.len(),
                    actual,
                });
            }
            let routing = cell.routing();
            let uhg = cell
                .routing_uhg()
                .uhg(routing.distance, dt)
                .map_err(|source| RoutingError::InvalidCellParameter {
                    cell: index,
                    source,
                })?;
            cell_uhgs.push(uhg);
            if !routing.is_terminal() {
                bindings.entry(routing.id).or_default().push(i);
            }
        }

        let mut river_uhgs = IndexMap::with_capacity(network.len());
        for river in network.rivers() {
            let uhg = river
                .uhg(dt)
                .map_err(|source| NetworkError::InvalidUhgParam {
                    id: river.id,
                    source,
                })?;
            river_uhgs.insert(river.id, uhg);
        }

        debug!(
            rivers = network.len(),
            cells = cells.len(),
            steps = axis.len(),
            evaluation = ?config.evaluation,
            parallel = config.parallel_enabled(),
            "routing model bound"
        );
        Ok(Self {
            network,
            cells,
            axis,
            config,
            bindings,
            cell_uhgs,
            river_uhgs,
        })
    }

    /// The river network.
    pub fn network(&self) -> &'a RiverNetwork {
        self.network
    }

    /// The cells.
    pub fn cells(&self) -> &'a [C] {
        self.cells
    }

    /// The model time axis.
    pub fn time_axis(&self) -> &TimeAxis {
        &self.axis
    }

    /// The configuration.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Re-run the cell binding check against the bound network.
    pub fn verify_cell_river_connections(&self) -> Result<(), RoutingError> {
        verify_cell_river_connections(self.network, self.cells)
    }

    /// Cells draining directly into `id`, ascending.
    pub fn cells_of(&self, id: RiverId) -> Result<Vec<CellIndex>, RoutingError> {
        self.network.check_id(id)?;
        Ok(self.bound_cells(id).iter().copied().map(CellIndex).collect())
    }

    /// Unit hydrograph from cell `cell` to its river.
    pub fn cell_uhg(&self, cell: CellIndex) -> Result<&[f64], RoutingError> {
        self.cell_uhgs
            .get(cell.0)
            .map(Vec::as_slice)
            .ok_or(RoutingError::UnknownCell { cell })
    }

    /// Discharge of `cell` at its river, in m³/s.
    ///
    /// The cell's mm/h series converted by its area, delayed through its
    /// unit hydrograph. Values are computed lazily.
    pub fn cell_output_m3s(
        &self,
        cell: CellIndex,
    ) -> Result<ConvolveSeries<PointSeries>, RoutingError> {
        let c = self
            .cells
            .get(cell.0)
            .ok_or(RoutingError::UnknownCell { cell })?;
        let uhg = self.cell_uhg(cell)?;
        let area = c.area_m2();
        let mmh = c.avg_discharge_mmh();
        let m3s = (0..self.axis.len())
            .map(|t| mmh_to_m3s(mmh.value(t), area))
            .collect();
        let source = PointSeries::from_values(self.axis, m3s)?
            .with_interpretation(mmh.point_interpretation());
        Ok(ConvolveSeries::new(
            source,
            uhg.to_vec(),
            ConvolvePolicy::UseZero,
        )?)
    }

    /// Sum of the outputs of every cell draining directly into `id`.
    ///
    /// A zero series if no cell drains into it.
    pub fn local_inflow(&self, id: RiverId) -> Result<PointSeries, RoutingError> {
        self.network.check_id(id)?;
        let cells = self.bound_cells(id);
        let mut acc = PointSeries::zeros(self.axis);

        if self.config.parallel_enabled() {
            #[cfg(feature = "parallel")]
            {
                for out in &self.realize_cells_parallel(cells)? {
                    acc.add_series(out)?;
                }
                return Ok(acc);
            }
        }

        for &i in cells {
            acc.add_series(&self.cell_output_m3s(CellIndex(i))?)?;
        }
        Ok(acc)
    }

    /// Sum of the outputs of every river draining directly into `id`.
    pub fn upstream_inflow(&self, id: RiverId) -> Result<PointSeries, RoutingError> {
        match self.config.evaluation {
            Evaluation::Recursive => self.upstream_recursive(id),
            Evaluation::Memoized => {
                let mut closure = self.network.upstream_closure(id)?;
                // Post-order: `id` itself comes last.
                closure.pop();
                let memo = self.evaluate(closure)?;
                self.sum_upstream(id, |u, acc| add_memoized(&memo, u, acc))
            }
        }
    }

    /// Discharge leaving river `id`, in m³/s.
    ///
    /// Local plus upstream inflow, delayed through the river's unit
    /// hydrograph and materialized on the model time axis.
    pub fn output_m3s(&self, id: RiverId) -> Result<PointSeries, RoutingError> {
        match self.config.evaluation {
            Evaluation::Recursive => self.output_recursive(id),
            Evaluation::Memoized => {
                let closure = self.network.upstream_closure(id)?;
                let mut memo = self.evaluate(closure)?;
                memo.swap_remove(&id)
                    .ok_or(RoutingError::Network(NetworkError::UnknownId { id }))
            }
        }
    }

    /// Output of every river, upstream rivers first.
    pub fn outputs_m3s(&self) -> Result<IndexMap<RiverId, PointSeries>, RoutingError> {
        let order = self.network.topological_order();
        match self.config.evaluation {
            Evaluation::Memoized => self.evaluate(order),
            Evaluation::Recursive => order
                .into_iter()
                .map(|id| self.output_recursive(id).map(|out| (id, out)))
                .collect(),
        }
    }

    fn bound_cells(&self, id: RiverId) -> &[usize] {
        self.bindings.get(&id).map_or(&[][..], Vec::as_slice)
    }

    /// Cell outputs realized on the rayon pool, in the order of `cells`.
    #[cfg(feature = "parallel")]
    fn realize_cells_parallel(&self, cells: &[usize]) -> Result<Vec<PointSeries>, RoutingError> {
        use rayon::prelude::*;
        cells
            .par_iter()
            .map(|&i| self.cell_output_m3s(CellIndex(i)).map(|s| s.realize()))
            .collect()
    }

    /// Evaluate rivers in `order`, which must list every river after its
    /// upstreams.
    fn evaluate(&self, order: Vec<RiverId>) -> Result<IndexMap<RiverId, PointSeries>, RoutingError> {
        let mut memo = IndexMap::with_capacity(order.len());
        for id in order {
            let upstream = self.sum_upstream(id, |u, acc| add_memoized(&memo, u, acc))?;
            let out = self.route(id, upstream)?;
            memo.insert(id, out);
        }
        Ok(memo)
    }

    fn output_recursive(&self, id: RiverId) -> Result<PointSeries, RoutingError> {
        let upstream = self.upstream_recursive(id)?;
        self.route(id, upstream)
    }

    fn upstream_recursive(&self, id: RiverId) -> Result<PointSeries, RoutingError> {
        self.sum_upstream(id, |u, acc| {
            acc.add_series(&self.output_recursive(u)?)?;
            Ok(())
        })
    }

    /// Accumulate upstream outputs of `id` in ascending id order.
    fn sum_upstream<F>(&self, id: RiverId, mut add: F) -> Result<PointSeries, RoutingError>
    where
        F: FnMut(RiverId, &mut PointSeries) -> Result<(), RoutingError>,
    {
        let mut acc = PointSeries::zeros(self.axis);
        for u in self.network.upstreams(id)? {
            add(u, &mut acc)?;
        }
        Ok(acc)
    }

    /// Delay local plus `upstream` inflow through the hydrograph of `id`.
    fn route(&self, id: RiverId, upstream: PointSeries) -> Result<PointSeries, RoutingError> {
        let mut inflow = self.local_inflow(id)?;
        inflow.add_series(&upstream)?;
        let uhg = self
            .river_uhgs
            .get(&id)
            .ok_or(RoutingError::Network(NetworkError::UnknownId { id }))?;
        trace!(river = %id, uhg_len = uhg.len(), "river evaluated");
        Ok(ConvolveSeries::new(inflow, uhg.clone(), ConvolvePolicy::UseZero)?.realize())
    }
}

fn add_memoized(
    memo: &IndexMap<RiverId, PointSeries>,
    id: RiverId,
    acc: &mut PointSeries,
) -> Result<(), RoutingError> {
    let out = memo
        .get(&id)
        .ok_or(RoutingError::Network(NetworkError::UnknownId { id }))?;
    acc.add_series(out)?;
    Ok(())
}
