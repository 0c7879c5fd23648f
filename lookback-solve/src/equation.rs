//! Scalar equations `residual(x) = 0` posed over a [`Model`].
//!
//! An [`Equation`] maps the solver variable `x` to a model input and turns
//! the model's output into a residual. Solvers in this module drive that
//! residual toward zero.
//!
//! [`Model`]: lookback_core::Model

mod evaluate;
mod observe;
mod problem;

pub mod bisection;

pub use evaluate::{EvalError, Evaluation, evaluate};
pub use observe::Observer;
pub use problem::Equation;
