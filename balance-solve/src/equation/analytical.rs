//! Closed-form "solver" used as a correctness oracle.
//!
//! Problems that know their exact root implement [`ClosedForm`]; [`solve`]
//! wraps that root in the same reporting shape as the iterative solvers.

use std::error::Error as StdError;

use thiserror::Error;

/// A problem whose root can be written down directly.
pub trait ClosedForm {
    type Error: StdError + Send + Sync + 'static;

    /// Returns the exact root.
    ///
    /// # Errors
    ///
    /// Returns an error if the closed form is undefined for this problem.
    fn root(&self) -> Result<f64, Self::Error>;
}

/// Errors from the closed-form solver.
#[derive(Debug, Error)]
pub enum Error {
    #[error("closed form is undefined")]
    Undefined(#[source] Box<dyn StdError + Send + Sync>),

    #[error("closed form produced a non-finite root: {x}")]
    NonFinite { x: f64 },
}

/// The closed-form root. `iters` is always one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub x: f64,
    pub iters: usize,
}

/// Evaluates the problem's closed form.
///
/// # Errors
///
/// Returns an error if the closed form is undefined or not finite.
pub fn solve(problem: &impl ClosedForm) -> Result<Solution, Error> {
    let x = problem
        .root()
        .map_err(|err| Error::Undefined(Box::new(err)))?;

    if !x.is_finite() {
        return Err(Error::NonFinite { x });
    }

    Ok(Solution { x, iters: 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::equation::power_law::{PowerLaw, PowerLawTarget};

    #[test]
    fn power_law_root() {
        let problem = PowerLawTarget::new(PowerLaw::default(), 0.001);

        let solution = solve(&problem).expect("closed form exists");

        assert_relative_eq!(solution.x, 2.069_405_827_3, epsilon = 1e-7);
        assert_eq!(solution.iters, 1);
    }

    #[test]
    fn undefined_closed_form_is_an_error() {
        let problem = PowerLawTarget::new(PowerLaw::default(), 2.0);

        let err = solve(&problem).unwrap_err();
        assert!(matches!(err, Error::Undefined(_)));
    }
}
