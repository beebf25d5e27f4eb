use std::ops::ControlFlow;

use super::Evaluation;

/// One iteration as seen by an [`Observer`].
#[derive(Debug)]
pub struct Step<'a, I, O> {
    /// 1-based iteration number.
    pub iter: usize,
    /// Evaluation at the point just tried.
    pub eval: &'a Evaluation<I, O, 1>,
    /// The bracket being searched, for bracketing solvers.
    pub bracket: Option<[f64; 2]>,
}

/// Watches solver iterations and may end them early.
///
/// Returning [`ControlFlow::Break`] makes the solver return its best point
/// with [`Status::StoppedByObserver`](super::Status::StoppedByObserver).
/// Any `FnMut(&Step) -> ControlFlow<()>` closure is an observer, and `()`
/// never stops.
pub trait Observer<I, O> {
    fn observe(&mut self, step: &Step<'_, I, O>) -> ControlFlow<()>;
}

impl<I, O, F> Observer<I, O> for F
where
    F: FnMut(&Step<'_, I, O>) -> ControlFlow<()>,
{
    fn observe(&mut self, step: &Step<'_, I, O>) -> ControlFlow<()> {
        self(step)
    }
}

impl<I, O> Observer<I, O> for () {
    fn observe(&mut self, _step: &Step<'_, I, O>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
