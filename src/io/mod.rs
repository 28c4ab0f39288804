//! Input/output helpers.
//!
//! - sample file loading + readability checks (`loader`)
//! - chart data exports (CSV/JSON) (`export`)

pub mod export;
pub mod loader;

pub use export::*;
pub use loader::*;
