use thiserror::Error;

use lookback_core::{Model, Snapshot};

use super::Equation;

/// One evaluation of an equation at `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O> {
    pub x: f64,
    pub residual: f64,
    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating an equation.
#[derive(Debug, Error)]
pub enum EvalError<IE, ME, RE> {
    #[error("failed to compute input")]
    Input(#[source] IE),

    #[error("model call failed")]
    Model(#[source] ME),

    #[error("failed to compute residual")]
    Residual(#[source] RE),
}

/// Evaluates `model` at `x` in the context of `equation`.
///
/// # Errors
///
/// Returns an error if input mapping, the model call, or the residual fails.
#[allow(clippy::type_complexity)]
pub fn evaluate<M, E>(
    model: &M,
    equation: &E,
    x: f64,
) -> Result<
    Evaluation<M::Input, M::Output>,
    EvalError<E::InputError, M::Error, E::ResidualError>,
>
where
    M: Model,
    E: Equation<Input = M::Input, Output = M::Output>,
{
    let input = equation.input(x).map_err(EvalError::Input)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residual = equation
        .residual(&input, &output)
        .map_err(EvalError::Residual)?;

    Ok(Evaluation {
        x,
        residual,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{convert::Infallible, fmt};

    use approx::assert_relative_eq;

    #[derive(Debug)]
    struct Negative;

    impl fmt::Display for Negative {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("negative input")
        }
    }

    impl std::error::Error for Negative {}

    struct Sqrt;

    impl Model for Sqrt {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(input.sqrt())
        }
    }

    struct HitTarget(f64);

    impl Equation for HitTarget {
        type Input = f64;
        type Output = f64;
        type InputError = Negative;
        type ResidualError = Infallible;

        fn input(&self, x: f64) -> Result<f64, Negative> {
            if x < 0.0 { Err(Negative) } else { Ok(x) }
        }

        fn residual(&self, _input: &f64, output: &f64) -> Result<f64, Infallible> {
            Ok(output - self.0)
        }
    }

    #[test]
    fn captures_input_output_and_residual() {
        let eval = evaluate(&Sqrt, &HitTarget(1.0), 4.0).expect("valid input");
        assert_relative_eq!(eval.x, 4.0);
        assert_relative_eq!(eval.snapshot.output, 2.0);
        assert_relative_eq!(eval.residual, 1.0);
    }

    #[test]
    fn input_errors_are_tagged() {
        let err = evaluate(&Sqrt, &HitTarget(1.0), -1.0).unwrap_err();
        assert!(matches!(err, EvalError::Input(Negative)));
    }
}
