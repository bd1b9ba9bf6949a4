//! Core types for the Rivulet river-routing framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types shared by every other Rivulet crate: river
//! identifiers, routing links, unit-hydrograph parameters, the fixed-step
//! time axis, and the gamma unit-hydrograph generator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod param;
pub mod time;
pub mod uhg;

pub use error::{TimeAxisError, UhgError};
pub use id::{CellIndex, RiverId};
pub use param::{RoutingInfo, UhgParameter};
pub use time::{TimeAxis, UtcTime};
pub use uhg::{make_uhg, uhg_steps, MAX_UHG_STEPS};
