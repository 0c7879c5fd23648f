use serde::{Deserialize, Serialize};

/// Tolerances and iteration cap for the bisection solver.
///
/// The solver stops as soon as either criterion is met:
///
/// - the bracket width is at most `x_abs_tol + x_rel_tol * |midpoint|`, or
/// - the midpoint residual magnitude is at most `residual_tol`.
///
/// If neither is met after `max_iters` midpoint evaluations the solver
/// returns its best estimate with [`Status::MaxIters`](super::Status::MaxIters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-10,
            x_rel_tol: 1e-12,
            residual_tol: 1e-10,
        }
    }
}

impl Config {
    /// Checks that every tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns a static description of the first invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.x_abs_tol.is_finite() || self.x_abs_tol < 0.0 {
            return Err("x_abs_tol must be finite and non-negative");
        }
        if !self.x_rel_tol.is_finite() || self.x_rel_tol < 0.0 {
            return Err("x_rel_tol must be finite and non-negative");
        }
        if !self.residual_tol.is_finite() || self.residual_tol < 0.0 {
            return Err("residual_tol must be finite and non-negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_negative_and_nan_tolerances() {
        let config = Config {
            residual_tol: -1e-9,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            x_rel_tol: f64::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
