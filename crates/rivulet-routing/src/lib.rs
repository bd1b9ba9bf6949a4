//! River routing for Rivulet.
//!
//! A [`RoutingModel`] binds a [`RiverNetwork`](rivulet_network::RiverNetwork)
//! to a collection of [`RoutingCell`]s and a fixed-step time axis, and
//! computes discharge (m³/s) at any river:
//!
//! 1. each cell's discharge is delayed through its own unit hydrograph
//!    to its receiving river ([`RoutingModel::cell_output_m3s`]);
//! 2. a river's inflow is the sum of its cells ([`RoutingModel::local_inflow`])
//!    and of its upstream rivers' outflow ([`RoutingModel::upstream_inflow`]);
//! 3. the inflow is delayed through the river's unit hydrograph
//!    ([`RoutingModel::output_m3s`]).
//!
//! The network and the cells are borrowed read-only for the lifetime of
//! the model.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod config;
pub mod error;
pub mod model;

pub use cell::{m3s_to_mmh, mmh_to_m3s, Cell, RoutingCell};
pub use config::{Evaluation, RoutingConfig};
pub use error::RoutingError;
pub use model::{verify_cell_river_connections, RoutingModel};
