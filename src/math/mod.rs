//! Mathematical utilities: axis generation and quadratic spline interpolation.

pub mod axis;
pub mod spline;

pub use axis::*;
pub use spline::*;
