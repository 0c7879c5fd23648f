use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A finite scalar in `[0.0, 1.0]`.
///
/// Used for density parameters such as `Ω_M`, where the flat-universe
/// constraint makes the dark-energy share the [`complement`](Self::complement).
///
/// Because NaN and infinities are rejected at construction, `Fraction`
/// implements [`Eq`] and [`Ord`].
///
/// # Examples
/// ```
/// use lookback_core::Fraction;
///
/// let omega_m = Fraction::new(0.3).unwrap();
/// assert_eq!(omega_m.get(), 0.3);
/// assert!((omega_m.complement().get() - 0.7).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fraction(f64);

impl Fraction {
    /// The empty fraction.
    pub const ZERO: Self = Self(0.0);

    /// The whole.
    pub const ONE: Self = Self(1.0);

    /// Creates a `Fraction` if `value` is finite and within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::NotFinite`] for NaN or infinite values and
    /// [`FractionError::OutOfRange`] for values outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, FractionError> {
        if !value.is_finite() {
            return Err(FractionError::NotFinite(value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(FractionError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the inner `f64`.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Returns `1 - self`, which is always a valid fraction.
    #[must_use]
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }

    /// Returns true if the fraction is exactly zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for Fraction {
    type Error = FractionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Fraction::new(value)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> Self {
        f.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Constructors forbid NaN, so equality is reflexive.
impl Eq for Fraction {}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Errors that can occur when constructing a [`Fraction`].
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FractionError {
    #[error("value is not finite: {0}")]
    NotFinite(f64),

    #[error("value {0} is outside the range [0, 1]")]
    OutOfRange(f64),
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn accepts_closed_unit_interval() {
        assert_eq!(Fraction::new(0.0).unwrap(), Fraction::ZERO);
        assert_eq!(Fraction::new(1.0).unwrap(), Fraction::ONE);
        assert_eq!(Fraction::new(0.3).unwrap().get(), 0.3);
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert!(matches!(
            Fraction::new(-0.01),
            Err(FractionError::OutOfRange(_))
        ));
        assert!(matches!(
            Fraction::new(1.01),
            Err(FractionError::OutOfRange(_))
        ));
        assert!(matches!(
            Fraction::new(f64::NAN),
            Err(FractionError::NotFinite(_))
        ));
        assert!(matches!(
            Fraction::new(f64::NEG_INFINITY),
            Err(FractionError::NotFinite(_))
        ));
    }

    #[test]
    fn complement_sums_to_one() {
        let omega_m = Fraction::new(0.3).unwrap();
        assert_relative_eq!(omega_m.get() + omega_m.complement().get(), 1.0);
        assert!(Fraction::ONE.complement().is_zero());
    }

    #[test]
    fn ordering_is_total() {
        let a = Fraction::new(0.25).unwrap();
        let b = Fraction::new(0.75).unwrap();
        assert!(a < b);
        assert_eq!(a.max(b), b);
        assert_eq!(Fraction::ZERO.min(Fraction::ONE), Fraction::ZERO);
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let f: Fraction = serde_json::from_str("0.3").expect("valid fraction");
        assert_eq!(f.get(), 0.3);
        assert!(serde_json::from_str::<Fraction>("1.5").is_err());
        assert_eq!(serde_json::to_string(&f).unwrap(), "0.3");
    }
}
