//! Core abstractions shared by the condenser balance crates.
//!
//! A [`Model`] maps an input to an output and may fail. Solvers drive models,
//! and condenser strategies implement them. The [`constraint`] module provides
//! checked wrappers for values with physical bounds, such as a nominal flow
//! that must be positive or a dryness fraction in `(0, 1]`.

pub mod constraint;
pub mod model;

pub use model::{Model, Snapshot};
