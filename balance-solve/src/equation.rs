//! Scalar root finding.
//!
//! All solvers share the [`EquationProblem`] seam and report a [`Solution`]
//! with the iteration count and the model snapshot at the root. Bisection and
//! Newton accept an [`Observer`] that sees every step and may stop early.

mod evaluate;
mod observe;
mod problem;
mod solution;

pub mod analytical;
pub mod bisection;
pub mod newton;
pub mod power_law;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, EvaluationFailure, evaluate};
pub use observe::{Observer, Step};
pub use problem::{EquationProblem, ResidualDerivative};
pub use solution::{Solution, Status};
