//! Test fixtures for Rivulet development.
//!
//! Provides hourly time axes, constant-discharge [`Cell`]s and small
//! scenario networks, plus [`init_tracing`] for test log output.
//!
//! All fixtures use [`IDENTITY_AREA_M2`] by default, so cell discharge in
//! mm/h and routed flow in m³/s are numerically equal.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    cell_with_series, chain_network, constant_cell, hourly_axis, network, IDENTITY_AREA_M2,
    STEP_SECONDS,
};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing through the test harness.
///
/// Filtered by `RUST_LOG` (default `warn`). Safe to call from every test;
/// only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
