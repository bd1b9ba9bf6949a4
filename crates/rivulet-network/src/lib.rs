//! River network topology for Rivulet.
//!
//! A [`RiverNetwork`] owns a set of [`River`]s linked upstream → downstream
//! and keeps the link graph a directed acyclic graph at all times. Every
//! mutation is validated, and a mutation that would close a cycle is
//! rolled back before [`NetworkError::WouldCycle`] is returned, so readers
//! (the routing model in particular) may walk the graph without cycle
//! guards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod network;
pub mod river;

pub use error::NetworkError;
pub use network::{RiverMut, RiverNetwork};
pub use river::River;
