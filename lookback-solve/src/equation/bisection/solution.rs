use lookback_core::Snapshot;

use crate::equation::Evaluation;

/// How a bisection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Met the configured tolerances.
    Converged,
    /// Hit `max_iters` first; the solution holds the best point seen.
    MaxIters,
    /// An observer asked the solver to stop.
    StoppedByObserver,
}

/// The result of a bisection run.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,
    /// Root estimate.
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,
    /// Midpoint evaluations performed.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    pub(super) fn from_eval(eval: Evaluation<I, O>, status: Status, iters: usize) -> Self {
        Self {
            status,
            x: eval.x,
            residual: eval.residual,
            snapshot: eval.snapshot,
            iters,
        }
    }

    /// Returns true if the solver met its tolerances.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
