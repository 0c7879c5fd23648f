//! Adaptive Simpson quadrature.

use thiserror::Error;

/// Tolerance and recursion limit for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadConfig {
    /// Absolute error target for the whole interval.
    pub abs_tol: f64,
    /// Maximum number of interval halvings along any branch.
    pub max_depth: u32,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            abs_tol: 1e-10,
            max_depth: 48,
        }
    }
}

/// Errors that can occur during quadrature.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadError {
    #[error("integration limits must be finite, got [{a}, {b}]")]
    NonFiniteLimits { a: f64, b: f64 },

    #[error("integrand is not finite at x = {x}: {value}")]
    NonFiniteIntegrand { x: f64, value: f64 },

    #[error("tolerance not reached on [{a}, {b}] within the depth limit")]
    DepthExceeded { a: f64, b: f64 },
}

/// Integrates `f` over `[a, b]` with adaptive Simpson's rule.
///
/// Each panel is split until the two-half estimate agrees with the
/// whole-panel estimate to within `15 * tol`, with the tolerance halved at
/// every split. Accepted panels include the Richardson correction.
/// Reversed limits give the negated integral.
///
/// # Errors
///
/// Returns [`QuadError`] if the limits or any integrand value are
/// non-finite, or if a panel fails to converge within `max_depth` splits.
pub fn integrate<F>(f: F, a: f64, b: f64, config: &QuadConfig) -> Result<f64, QuadError>
where
    F: Fn(f64) -> f64,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(QuadError::NonFiniteLimits { a, b });
    }

    #[allow(clippy::float_cmp)]
    if a == b {
        return Ok(0.0);
    }

    let eval = |x: f64| {
        let value = f(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(QuadError::NonFiniteIntegrand { x, value })
        }
    };

    let fa = eval(a)?;
    let fb = eval(b)?;
    let whole = Panel::new(a, b, fa, fb, &eval)?;

    whole.refine(&eval, config.abs_tol, config.max_depth)
}

/// One Simpson panel with its cached endpoint and midpoint values.
#[derive(Debug, Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    estimate: f64,
}

impl Panel {
    fn new<E>(a: f64, b: f64, fa: f64, fb: f64, eval: &E) -> Result<Self, QuadError>
    where
        E: Fn(f64) -> Result<f64, QuadError>,
    {
        let fm = eval(0.5 * (a + b))?;
        let estimate = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
        Ok(Self {
            a,
            b,
            fa,
            fm,
            fb,
            estimate,
        })
    }

    fn refine<E>(self, eval: &E, tol: f64, depth: u32) -> Result<f64, QuadError>
    where
        E: Fn(f64) -> Result<f64, QuadError>,
    {
        let m = 0.5 * (self.a + self.b);
        let left = Panel::new(self.a, m, self.fa, self.fm, eval)?;
        let right = Panel::new(m, self.b, self.fm, self.fb, eval)?;

        let halves = left.estimate + right.estimate;
        let delta = halves - self.estimate;

        if delta.abs() <= 15.0 * tol {
            return Ok(halves + delta / 15.0);
        }
        if depth == 0 {
            return Err(QuadError::DepthExceeded {
                a: self.a,
                b: self.b,
            });
        }

        Ok(left.refine(eval, 0.5 * tol, depth - 1)? + right.refine(eval, 0.5 * tol, depth - 1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    #[test]
    fn cubic_is_exact() {
        let value = integrate(|x| x.powi(3) - 2.0 * x, 0.0, 2.0, &QuadConfig::default())
            .expect("smooth integrand");
        assert_relative_eq!(value, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn sine_over_half_period() {
        let value = integrate(f64::sin, 0.0, PI, &QuadConfig::default()).expect("smooth integrand");
        assert_relative_eq!(value, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn reversed_and_empty_intervals() {
        let config = QuadConfig::default();
        let forward = integrate(f64::exp, 0.0, 1.0, &config).unwrap();
        let backward = integrate(f64::exp, 1.0, 0.0, &config).unwrap();
        assert_relative_eq!(forward, std::f64::consts::E - 1.0, epsilon = 1e-9);
        assert_relative_eq!(backward, -forward, epsilon = 1e-12);
        assert_relative_eq!(integrate(f64::exp, 3.0, 3.0, &config).unwrap(), 0.0);
    }

    #[test]
    fn rejects_singular_integrand() {
        let result = integrate(|x| 1.0 / x, 0.0, 1.0, &QuadConfig::default());
        assert!(matches!(result, Err(QuadError::NonFiniteIntegrand { .. })));
    }

    #[test]
    fn rejects_infinite_limits() {
        let result = integrate(f64::exp, 0.0, f64::INFINITY, &QuadConfig::default());
        assert!(matches!(result, Err(QuadError::NonFiniteLimits { .. })));
    }

    #[test]
    fn shallow_depth_is_reported() {
        let config = QuadConfig {
            abs_tol: 1e-14,
            max_depth: 1,
        };
        let result = integrate(|x| (10.0 * x).sin(), 0.0, 10.0, &config);
        assert!(matches!(result, Err(QuadError::DepthExceeded { .. })));
    }
}
