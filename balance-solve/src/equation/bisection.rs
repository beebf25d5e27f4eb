//! Bracketing root finder.
//!
//! Requires residuals of opposite sign at the two bounds and halves the
//! bracket until it is narrower than the configured tolerance. Running out of
//! iterations is not an error; the best point seen is returned with
//! [`Status::MaxIters`].

mod bracket;
mod config;

pub use config::Config;

use balance_core::model::Model;
use thiserror::Error;
use tracing::trace;

use crate::equation::{
    EquationProblem, EvaluationFailure, Observer, Solution, Status, Step,
    evaluate::evaluate_scalar,
};

use bracket::Bracket;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bracket has zero width: both bounds are {value}")]
    ZeroWidthBracket { value: f64 },

    #[error("bracket contains non-finite bound: {value}")]
    NonFiniteBracket { value: f64 },

    #[error(
        "function has the same sign at both bounds: \
         f({left})={left_residual}, f({right})={right_residual}"
    )]
    NoBracket {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error(transparent)]
    Evaluation(#[from] EvaluationFailure),
}

/// Bisects `bracket` until the residual changes sign within tolerance.
///
/// Either endpoint is returned directly if its residual already meets
/// `residual_tol`. The bounds may be given in either order.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, the residuals at
/// the bounds share a sign, or any evaluation fails or is not finite.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: Observer<M::Input, M::Output>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;
    let [lo, hi] = Bracket::ordered(bracket)?;

    let lo_eval = evaluate_scalar(model, problem, lo)?;
    if lo_eval.residual().abs() <= config.residual_tol {
        return Ok(Solution::new(lo_eval, Status::Converged, 0));
    }
    let hi_eval = evaluate_scalar(model, problem, hi)?;
    if hi_eval.residual().abs() <= config.residual_tol {
        return Ok(Solution::new(hi_eval, Status::Converged, 0));
    }

    let mut bracket = Bracket::new([lo, hi], lo_eval.residual(), hi_eval.residual())?;
    let mut best = if lo_eval.residual().abs() <= hi_eval.residual().abs() {
        lo_eval
    } else {
        hi_eval
    };

    for iter in 1..=config.max_iters {
        let mid = bracket.mid();
        let eval = evaluate_scalar(model, problem, mid)?;
        let f_mid = eval.residual();
        trace!(iter, lo = bracket.lo, hi = bracket.hi, mid, f_mid, "bisection step");

        let converged =
            config.is_narrow(bracket.width(), mid) || f_mid.abs() <= config.residual_tol;
        let improves = f_mid.abs() < best.residual().abs();

        let step = Step {
            iter,
            eval: &eval,
            bracket: Some([bracket.lo, bracket.hi]),
        };
        if observer.observe(&step).is_break() {
            let best = if improves { eval } else { best };
            return Ok(Solution::new(best, Status::StoppedByObserver, iter));
        }

        if converged {
            return Ok(Solution::new(eval, Status::Converged, iter));
        }

        bracket.narrow(mid, f_mid);
        if improves {
            best = eval;
        }
    }

    Ok(Solution::new(best, Status::MaxIters, config.max_iters))
}

/// [`solve`] with no observer.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}
