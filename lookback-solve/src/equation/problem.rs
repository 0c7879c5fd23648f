/// A scalar equation posed over a model.
///
/// The solver only ever sees `x` and the residual. Everything domain
/// specific, such as wrapping `x` in a validated redshift or comparing an
/// age against a target, lives in the implementor.
pub trait Equation {
    type Input;
    type Output;
    type InputError: std::error::Error + Send + Sync + 'static;
    type ResidualError: std::error::Error + Send + Sync + 'static;

    /// Maps the solver variable into a model input.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is not a valid input.
    fn input(&self, x: f64) -> Result<Self::Input, Self::InputError>;

    /// Computes the residual from a model call.
    ///
    /// # Errors
    ///
    /// Returns an error if the residual cannot be computed.
    fn residual(&self, input: &Self::Input, output: &Self::Output)
    -> Result<f64, Self::ResidualError>;
}
