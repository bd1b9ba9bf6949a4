//! Rivulet: unit-hydrograph river routing.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Rivulet sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use rivulet::prelude::*;
//!
//! let axis = TimeAxis::new(UtcTime(0), 3600, 24).unwrap();
//!
//! // Two headwaters feeding an outlet.
//! let mut net = RiverNetwork::new();
//! net.add(River::new(RiverId(1))).unwrap()
//!     .add(River::new(RiverId(2)).with_downstream(RiverId(1), 0.0)).unwrap()
//!     .add(River::new(RiverId(3)).with_downstream(RiverId(1), 0.0)).unwrap();
//!
//! // One cell per headwater, 1 mm/h over 3.6 km² (= 1 m³/s).
//! let cells: Vec<Cell> = [2, 3]
//!     .into_iter()
//!     .map(|r| Cell {
//!         area_m2: 3.6e6,
//!         routing: RoutingInfo::new(RiverId(r), 0.0),
//!         routing_uhg: UhgParameter::default(),
//!         avg_discharge: PointSeries::filled(axis, 1.0),
//!     })
//!     .collect();
//!
//! let model = RoutingModel::new(&net, &cells, axis).unwrap();
//! let outlet = model.output_m3s(RiverId(1)).unwrap();
//! assert_eq!(outlet.len(), 24);
//! assert!((outlet.value(12) - 2.0).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rivulet-core` | Ids, parameters, time axis, gamma UHG |
//! | [`series`] | `rivulet-series` | Point and convolution time-series |
//! | [`network`] | `rivulet-network` | Rivers and the validated river network |
//! | [`routing`] | `rivulet-routing` | Cell boundary and the routing model |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers, parameters, time axis and UHG generation (`rivulet-core`).
pub use rivulet_core as types;

/// Time-series (`rivulet-series`).
///
/// [`series::PointSeries`] stores values; [`series::ConvolveSeries`]
/// delays a source lazily.
pub use rivulet_series as series;

/// Rivers and the validated network (`rivulet-network`).
pub use rivulet_network as network;

/// The routing model (`rivulet-routing`).
pub use rivulet_routing as routing;

/// Common imports for typical Rivulet usage.
///
/// ```rust
/// use rivulet::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use rivulet_core::{
        make_uhg, CellIndex, RiverId, RoutingInfo, TimeAxis, UhgParameter, UtcTime,
    };

    // Series
    pub use rivulet_series::{ConvolvePolicy, ConvolveSeries, PointSeries, TimeSeries};

    // Network
    pub use rivulet_network::{River, RiverNetwork};

    // Routing
    pub use rivulet_routing::{Cell, Evaluation, RoutingCell, RoutingConfig, RoutingModel};

    // Errors
    pub use rivulet_core::UhgError;
    pub use rivulet_network::NetworkError;
    pub use rivulet_routing::RoutingError;
    pub use rivulet_series::SeriesError;
}
