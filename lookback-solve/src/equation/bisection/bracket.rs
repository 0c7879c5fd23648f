use thiserror::Error;

/// Errors from validating raw bracket endpoints.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    #[error("bracket endpoint is not finite: {0}")]
    NonFinite(f64),

    #[error("bracket has zero width at {0}")]
    ZeroWidth(f64),
}

/// A search interval whose endpoint residuals differ in sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
}

impl Bracket {
    /// Creates a bracket, or `None` if the signs do not straddle a root.
    pub(super) fn new(bounds: Bounds, left_sign: Sign, right_sign: Sign) -> Option<Self> {
        (left_sign != right_sign).then_some(Self {
            left: bounds.left,
            right: bounds.right,
            left_sign,
        })
    }

    /// Returns the bounds as `[left, right]` with `left < right`.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns true if the width satisfies the x tolerances.
    #[must_use]
    pub fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        self.width() <= x_abs_tol + x_rel_tol * self.midpoint().abs()
    }

    /// Replaces whichever endpoint shares `sign` with `x`.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if sign == self.left_sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}

/// Residual sign as seen by the bracket logic. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Finite, ordered, non-degenerate endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    pub(super) left: f64,
    pub(super) right: f64,
}

impl Bounds {
    /// Validates and orders a raw `[a, b]` pair.
    pub(super) fn new([a, b]: [f64; 2]) -> Result<Self, BracketError> {
        for value in [a, b] {
            if !value.is_finite() {
                return Err(BracketError::NonFinite(value));
            }
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth(a));
        }

        Ok(Self {
            left: a.min(b),
            right: a.max(b),
        })
    }
}
