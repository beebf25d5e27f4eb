//! Table-driven interpolation.
//!
//! The two table types default to different out-of-domain behavior:
//!
//! - [`Table1D`] extrapolates linearly along its end segments.
//! - [`Table2D`] returns `NaN` outside its grid.
//!
//! Both accept an explicit [`Extrapolate`] policy when a caller needs the
//! other behavior, as the condenser reference grids do.

mod error;
mod extrapolate;
mod one;
mod spline;
mod trilinear;
mod two;

pub use error::{InterpError, TableError};
pub use extrapolate::Extrapolate;
pub use one::Table1D;
pub use spline::Spline2D;
pub use trilinear::Trilinear;
pub use two::Table2D;
