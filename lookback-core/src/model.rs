/// A callable model that maps a typed input to a typed output.
///
/// Cosmological relations such as "age at redshift" or "distance at
/// redshift" are exposed as models so the solvers can drive them without
/// knowing anything about the physics behind them.
///
/// Models must be deterministic: the same input always yields the same
/// output.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type for domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    struct Doubler;

    impl Model for Doubler {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Infallible> {
            Ok(2.0 * input)
        }
    }

    #[test]
    fn snapshot_captures_a_call() {
        let input = 1.5;
        let output = Doubler.call(&input).expect("infallible");
        let snap = Snapshot::new(input, output);
        assert_eq!(snap, Snapshot::new(1.5, 3.0));
    }
}
