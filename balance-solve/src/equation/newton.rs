//! Derivative-based root finder.
//!
//! Steps `x <- x - f(x) / f'(x)` from an initial guess, with the slope
//! supplied by the problem through [`ResidualDerivative`]. Unlike bisection,
//! exhausting the iteration cap is an error.

mod config;

pub use config::Config;

use std::ops::ControlFlow;

use balance_core::model::Model;
use thiserror::Error;
use tracing::trace;

use crate::equation::{
    EvaluationFailure, Observer, ResidualDerivative, Solution, Status, Step,
    evaluate::evaluate_scalar,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("did not converge within {iters} iterations")]
    NotConverged { iters: usize, last_x: f64 },

    #[error("derivative {derivative} at x = {x} is too small to step")]
    ZeroDerivative { x: f64, derivative: f64 },

    #[error("initial guess is not finite: {x}")]
    NonFiniteGuess { x: f64 },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error(transparent)]
    Evaluation(#[from] EvaluationFailure),
}

/// Iterates from `guess` until `|f(x)| < residual_tol`.
///
/// The returned status is [`Status::Converged`] or
/// [`Status::StoppedByObserver`].
///
/// # Errors
///
/// Returns [`Error::NotConverged`] once `max_iters` evaluations pass without
/// converging, [`Error::ZeroDerivative`] when the slope vanishes, and an
/// evaluation error if a point cannot be evaluated or is not finite.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    guess: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: ResidualDerivative<Input = M::Input, Output = M::Output>,
    Obs: Observer<M::Input, M::Output>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;
    if !guess.is_finite() {
        return Err(Error::NonFiniteGuess { x: guess });
    }

    let mut x = guess;
    for iter in 1..=config.max_iters {
        let eval = evaluate_scalar(model, problem, x)?;
        let residual = eval.residual();
        trace!(iter, x, residual, "newton step");

        let step = Step {
            iter,
            eval: &eval,
            bracket: None,
        };
        if let ControlFlow::Break(()) = observer.observe(&step) {
            return Ok(Solution::new(eval, Status::StoppedByObserver, iter));
        }
        if residual.abs() < config.residual_tol {
            return Ok(Solution::new(eval, Status::Converged, iter));
        }

        let derivative = problem
            .derivative(&eval.snapshot.input, &eval.snapshot.output)
            .map_err(|source| EvaluationFailure::Residual {
                x,
                source: Box::new(source),
            })?;
        if derivative.is_nan() || derivative.abs() < config.min_derivative {
            return Err(Error::ZeroDerivative { x, derivative });
        }

        x -= residual / derivative;
    }

    Err(Error::NotConverged {
        iters: config.max_iters,
        last_x: x,
    })
}

/// [`solve`] with no observer.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    guess: f64,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: ResidualDerivative<Input = M::Input, Output = M::Output>,
{
    solve(model, problem, guess, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::equation::power_law::{PowerLaw, PowerLawOutput, PowerLawTarget};

    fn reference() -> (PowerLaw, PowerLawTarget) {
        let model = PowerLaw::default();
        (model, PowerLawTarget::new(model, 0.001))
    }

    #[test]
    fn converges_from_nearby_guess() {
        let (model, problem) = reference();

        let solution = solve_unobserved(&model, &problem, 2.0, &Config::default())
            .expect("should converge");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 2.069_405_827_3, epsilon = 1e-8);
        assert!(
            solution.iters > 1 && solution.iters < 10,
            "took {} iterations",
            solution.iters
        );
    }

    #[test]
    fn reports_iteration_cap() {
        let (model, problem) = reference();
        let config = Config {
            max_iters: 1,
            ..Config::default()
        };

        let err = solve_unobserved(&model, &problem, 10.0, &config).unwrap_err();

        assert!(matches!(err, Error::NotConverged { iters: 1, .. }));
        assert_eq!(err.to_string(), "did not converge within 1 iterations");
    }

    #[test]
    fn overshoot_into_undefined_region_is_an_error() {
        let (model, problem) = reference();

        // From x = 10 the first step lands at a negative x.
        let err = solve_unobserved(&model, &problem, 10.0, &Config::default()).unwrap_err();

        assert!(matches!(
            err,
            Error::Evaluation(EvaluationFailure::NonFiniteResidual { .. })
        ));
    }

    #[test]
    fn observer_can_stop_iteration() {
        let (model, problem) = reference();
        let observer = |step: &Step<'_, f64, PowerLawOutput>| {
            assert!(step.bracket.is_none());
            if step.iter == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };

        let solution = solve(&model, &problem, 1.0, &Config::default(), observer)
            .expect("should stop cleanly");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 2);
    }

    #[test]
    fn rejects_zero_iteration_budget() {
        let (model, problem) = reference();
        let config = Config {
            max_iters: 0,
            ..Config::default()
        };

        let err = solve_unobserved(&model, &problem, 2.0, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
