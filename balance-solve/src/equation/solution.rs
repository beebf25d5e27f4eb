use balance_core::model::Snapshot;

use super::Evaluation;

/// Why an iterative solve returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Converged,
    /// The iteration budget ran out. Only bisection returns this; Newton
    /// reports it as an error instead.
    MaxIters,
    StoppedByObserver,
}

/// The point an iterative solver settled on.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    pub x: f64,
    pub residual: f64,
    pub snapshot: Snapshot<I, O>,
    /// Iterations taken. Bracket endpoint checks do not count.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    pub(crate) fn new(eval: Evaluation<I, O, 1>, status: Status, iters: usize) -> Self {
        let Evaluation {
            x: [x],
            residuals: [residual],
            snapshot,
        } = eval;

        Self {
            status,
            x,
            residual,
            snapshot,
            iters,
        }
    }
}
