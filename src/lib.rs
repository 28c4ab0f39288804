//! `filter-plot` library crate.
//!
//! The binary (`filter-plot`) is a thin wrapper around this library so that:
//!
//! - the load/validate/interpolate pipeline is testable without spawning processes
//! - renderers can be driven directly with an in-memory `Chart`

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod tui;
