//! Scalar root finders built on the [`Model`] trait.
//!
//! An [`equation::EquationProblem`] maps solver variables to a model input and
//! turns the model's output into residuals. The [`equation::bisection`],
//! [`equation::newton`], and [`equation::analytical`] solvers drive those
//! residuals to zero.

pub mod equation;

pub use balance_core::model::{Model, Snapshot};
