use crate::equation::Evaluation;

use super::Bracket;

/// Control actions an observer may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the best evaluation so far.
    StopEarly,
}

/// An evaluation made by the bisection solver.
#[derive(Debug)]
pub enum Event<'a, I, O> {
    /// One of the two initial endpoints.
    Endpoint { eval: &'a Evaluation<I, O> },
    /// A midpoint of the current bracket.
    Midpoint {
        /// 1-based iteration counter.
        iter: usize,
        /// Bracket before it is shrunk by this evaluation.
        bracket: Bracket,
        eval: &'a Evaluation<I, O>,
    },
}

impl<'a, I, O> Event<'a, I, O> {
    #[must_use]
    pub fn eval(&self) -> &'a Evaluation<I, O> {
        match self {
            Event::Endpoint { eval } | Event::Midpoint { eval, .. } => eval,
        }
    }
}
