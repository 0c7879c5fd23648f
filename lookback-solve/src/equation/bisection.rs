//! Bisection on a bracketed scalar equation.
//!
//! Contract:
//!
//! - The bracket must be finite with non-zero width. Endpoints may be given
//!   in either order.
//! - The endpoint residuals must differ in sign unless one of them already
//!   satisfies `residual_tol`, in which case that endpoint is returned.
//! - Each iteration halves the bracket, so `max_iters` bounds the work.
//!   Hitting the cap is reported through [`Status::MaxIters`], not an error.

mod bracket;
mod config;
mod error;
mod event;
mod solution;

pub use bracket::{Bracket, BracketError, Sign};
pub use config::Config;
pub use error::Error;
pub use event::{Action, Event};
pub use solution::{Solution, Status};

use lookback_core::Model;

use crate::equation::{Equation, Evaluation, Observer, evaluate};

use bracket::Bounds;

/// Finds a root of `equation` over `model` inside `bracket`.
///
/// The observer sees every evaluation, endpoints included, and may stop the
/// run early.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, the bracket does
/// not straddle a root, a residual is non-finite, or the model or equation
/// fails during evaluation.
pub fn solve<M, E, Obs>(
    model: &M,
    equation: &E,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    E: Equation<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let bounds = Bounds::new(bracket)?;

    let left = checked_eval(model, equation, bounds.left)?;
    if let Some(Action::StopEarly) = observer.observe(&Event::Endpoint { eval: &left }) {
        return Ok(Solution::from_eval(left, Status::StoppedByObserver, 0));
    }
    if left.residual.abs() <= config.residual_tol {
        return Ok(Solution::from_eval(left, Status::Converged, 0));
    }

    let right = checked_eval(model, equation, bounds.right)?;
    if let Some(Action::StopEarly) = observer.observe(&Event::Endpoint { eval: &right }) {
        let best = closer_to_root(left, right);
        return Ok(Solution::from_eval(best, Status::StoppedByObserver, 0));
    }
    if right.residual.abs() <= config.residual_tol {
        return Ok(Solution::from_eval(right, Status::Converged, 0));
    }

    let Some(mut current) =
        Bracket::new(bounds, Sign::of(left.residual), Sign::of(right.residual))
    else {
        return Err(Error::NoBracket {
            left: left.x,
            right: right.x,
            left_residual: left.residual,
            right_residual: right.residual,
        });
    };

    let mut best = closer_to_root(left, right);

    for iter in 1..=config.max_iters {
        let mid = checked_eval(model, equation, current.midpoint())?;

        let event = Event::Midpoint {
            iter,
            bracket: current,
            eval: &mid,
        };
        let action = observer.observe(&event);

        let converged = mid.residual.abs() <= config.residual_tol
            || current.is_x_converged(config.x_abs_tol, config.x_rel_tol);

        if converged {
            return Ok(Solution::from_eval(mid, Status::Converged, iter));
        }

        current.shrink(mid.x, Sign::of(mid.residual));
        best = closer_to_root(best, mid);

        if let Some(Action::StopEarly) = action {
            return Ok(Solution::from_eval(best, Status::StoppedByObserver, iter));
        }
    }

    Ok(Solution::from_eval(best, Status::MaxIters, config.max_iters))
}

/// Runs [`solve`] with the no-op observer.
///
/// # Errors
///
/// Same as [`solve`].
pub fn solve_unobserved<M, E>(
    model: &M,
    equation: &E,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    E: Equation<Input = M::Input, Output = M::Output>,
{
    solve(model, equation, bracket, config, ())
}

/// Evaluates and rejects non-finite residuals, which would break the sign logic.
fn checked_eval<M, E>(model: &M, equation: &E, x: f64) -> Result<Evaluation<M::Input, M::Output>, Error>
where
    M: Model,
    E: Equation<Input = M::Input, Output = M::Output>,
{
    let eval = evaluate(model, equation, x)?;
    if eval.residual.is_finite() {
        Ok(eval)
    } else {
        Err(Error::NonFiniteResidual {
            x,
            residual: eval.residual,
        })
    }
}

fn closer_to_root<I, O>(a: Evaluation<I, O>, b: Evaluation<I, O>) -> Evaluation<I, O> {
    if b.residual.abs() < a.residual.abs() { b } else { a }
}
