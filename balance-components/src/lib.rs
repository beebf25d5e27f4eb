//! Interpolation tables and condenser performance strategies.
//!
//! The [`interpolation`] module holds the table primitives: [`Table1D`],
//! [`Table2D`], the trilinear composition of two surfaces, and a tensor
//! spline. The [`condenser`] module builds the Berman, Metro-Vickers, VKU,
//! and table-pressure methods on top of them and dispatches parameter maps
//! to the right one.
//!
//! [`Table1D`]: interpolation::Table1D
//! [`Table2D`]: interpolation::Table2D

pub mod condenser;
pub mod interpolation;
