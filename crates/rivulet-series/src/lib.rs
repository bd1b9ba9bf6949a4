//! Time-series for Rivulet routing.
//!
//! This crate defines the [`TimeSeries`] trait (read access to values
//! aligned to a fixed-step [`TimeAxis`](rivulet_core::TimeAxis)) along
//! with the materialized [`PointSeries`] and the lazy [`ConvolveSeries`].
//!
//! # Convolution
//!
//! A [`ConvolveSeries`] delays a source series through a weight vector
//! (typically a unit hydrograph). Values before the start of the source
//! are supplied by a [`ConvolvePolicy`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod convolve;
pub mod error;
pub mod point;
pub mod policy;
pub mod series;

pub use convolve::ConvolveSeries;
pub use error::SeriesError;
pub use point::{PointInterpretation, PointSeries};
pub use policy::ConvolvePolicy;
pub use series::TimeSeries;
