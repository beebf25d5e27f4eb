use std::error::Error as StdError;

use balance_core::model::{Model, Snapshot};
use thiserror::Error;

use super::EquationProblem;

/// Residuals at `x` together with the model call that produced them.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

impl<I, O> Evaluation<I, O, 1> {
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residuals[0]
    }
}

/// A failed [`evaluate`], with each stage's own error type.
#[derive(Debug, Error)]
pub enum EvalError<IE, ME, RE> {
    #[error("failed to compute input")]
    Input(#[source] IE),
    #[error("model call failed")]
    Model(#[source] ME),
    #[error("failed to compute residuals")]
    Residual(#[source] RE),
}

pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<
        <P as EquationProblem<N>>::InputError,
        <M as Model>::Error,
        <P as EquationProblem<N>>::ResidualError,
    >,
>;

/// Maps `x` to an input, calls the model, and computes the residuals.
///
/// # Errors
///
/// Returns the error of whichever stage failed.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Input)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Residual)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

/// Why an iterative solver could not use a point.
///
/// Stage errors are boxed so solver errors stay independent of the problem's
/// types.
#[derive(Debug, Error)]
pub enum EvaluationFailure {
    #[error("failed to compute input at x = {x}")]
    Input {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("model call failed at x = {x}")]
    Model {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("failed to compute residual at x = {x}")]
    Residual {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },
}

/// Evaluates a scalar problem and insists on a finite residual.
pub(crate) fn evaluate_scalar<M, P>(
    model: &M,
    problem: &P,
    x: f64,
) -> Result<Evaluation<M::Input, M::Output, 1>, EvaluationFailure>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let eval = evaluate(model, problem, [x]).map_err(|err| match err {
        EvalError::Input(source) => EvaluationFailure::Input {
            x,
            source: Box::new(source),
        },
        EvalError::Model(source) => EvaluationFailure::Model {
            x,
            source: Box::new(source),
        },
        EvalError::Residual(source) => EvaluationFailure::Residual {
            x,
            source: Box::new(source),
        },
    })?;

    let residual = eval.residual();
    if residual.is_finite() {
        Ok(eval)
    } else {
        Err(EvaluationFailure::NonFiniteResidual { x, residual })
    }
}
