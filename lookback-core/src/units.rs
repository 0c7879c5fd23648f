//! Unit types and conversions for background cosmology.
//!
//! Quantities are carried as [`uom`] SI values. Astronomers quote the
//! Hubble constant in km/s/Mpc, distances in Mpc, and ages in Gyr, so this
//! module provides the conversions between those conventions and SI.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    f64::{Frequency, Length, Time},
    frequency::hertz,
    length::meter,
    time::second,
};

/// Metres in one megaparsec (IAU 2015 nominal parsec).
pub const METERS_PER_MEGAPARSEC: f64 = 3.085_677_581_491_367e22;

/// Speed of light in vacuum, km/s.
pub const SPEED_OF_LIGHT_KM_PER_S: f64 = 299_792.458;

/// Seconds in one gigayear of Julian years (365.25 days).
pub const SECONDS_PER_GIGAYEAR: f64 = 365.25 * 86_400.0 * 1e9;

/// The present-day expansion rate `H0`.
///
/// Stored as an SI [`Frequency`] and guaranteed positive and finite.
///
/// # Examples
/// ```
/// use lookback_core::HubbleConstant;
///
/// let h0 = HubbleConstant::from_km_per_s_per_mpc(70.0).unwrap();
/// assert!((h0.km_per_s_per_mpc() - 70.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HubbleConstant(Frequency);

impl HubbleConstant {
    /// Creates a Hubble constant from a value in km/s/Mpc.
    ///
    /// # Errors
    ///
    /// Returns [`HubbleConstantError`] if the value is non-finite or not
    /// strictly positive.
    pub fn from_km_per_s_per_mpc(value: f64) -> Result<Self, HubbleConstantError> {
        if !value.is_finite() {
            return Err(HubbleConstantError::NotFinite(value));
        }
        if value <= 0.0 {
            return Err(HubbleConstantError::NotPositive(value));
        }
        let per_second = value * 1e3 / METERS_PER_MEGAPARSEC;
        Ok(Self(Frequency::new::<hertz>(per_second)))
    }

    /// Returns the value in km/s/Mpc.
    #[must_use]
    pub fn km_per_s_per_mpc(&self) -> f64 {
        self.0.get::<hertz>() * METERS_PER_MEGAPARSEC / 1e3
    }

    /// Hubble time `1 / H0`.
    #[must_use]
    pub fn hubble_time(&self) -> Time {
        Time::new::<second>(1.0 / self.0.get::<hertz>())
    }

    /// Hubble distance `c / H0`.
    #[must_use]
    pub fn hubble_distance(&self) -> Length {
        length_from_megaparsecs(SPEED_OF_LIGHT_KM_PER_S / self.km_per_s_per_mpc())
    }

    /// Consumes the wrapper and returns the inner `Frequency`.
    #[must_use]
    pub fn into_inner(self) -> Frequency {
        self.0
    }
}

impl TryFrom<f64> for HubbleConstant {
    type Error = HubbleConstantError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_km_per_s_per_mpc(value)
    }
}

impl From<HubbleConstant> for f64 {
    fn from(h0: HubbleConstant) -> Self {
        h0.km_per_s_per_mpc()
    }
}

impl fmt::Display for HubbleConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km/s/Mpc", self.km_per_s_per_mpc())
    }
}

/// Errors that can occur when creating a [`HubbleConstant`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HubbleConstantError {
    #[error("Hubble constant is not finite: {0} km/s/Mpc")]
    NotFinite(f64),

    #[error("Hubble constant must be positive, got {0} km/s/Mpc")]
    NotPositive(f64),
}

/// A cosmological redshift `z`, constrained to be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Redshift(f64);

impl Redshift {
    /// The present day.
    pub const ZERO: Self = Self(0.0);

    /// Creates a `Redshift` if `z` is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`RedshiftError`] for NaN, infinite, or negative values.
    pub fn new(z: f64) -> Result<Self, RedshiftError> {
        if !z.is_finite() {
            return Err(RedshiftError::NotFinite(z));
        }
        if z < 0.0 {
            return Err(RedshiftError::Negative(z));
        }
        Ok(Self(z))
    }

    /// Returns the inner `f64`.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Returns the scale factor `1 / (1 + z)`.
    #[must_use]
    pub fn scale_factor(self) -> f64 {
        1.0 / (1.0 + self.0)
    }
}

impl TryFrom<f64> for Redshift {
    type Error = RedshiftError;

    fn try_from(z: f64) -> Result<Self, Self::Error> {
        Self::new(z)
    }
}

impl From<Redshift> for f64 {
    fn from(z: Redshift) -> Self {
        z.0
    }
}

/// Errors that can occur when creating a [`Redshift`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RedshiftError {
    #[error("redshift is not finite: {0}")]
    NotFinite(f64),

    #[error("redshift must be non-negative, got {0}")]
    Negative(f64),
}

/// Returns a time in gigayears.
#[inline]
#[must_use]
pub fn gigayears(time: Time) -> f64 {
    time.get::<second>() / SECONDS_PER_GIGAYEAR
}

/// Creates a time from a value in gigayears.
#[inline]
#[must_use]
pub fn time_from_gigayears(gyr: f64) -> Time {
    Time::new::<second>(gyr * SECONDS_PER_GIGAYEAR)
}

/// Returns a length in megaparsecs.
#[inline]
#[must_use]
pub fn megaparsecs(length: Length) -> f64 {
    length.get::<meter>() / METERS_PER_MEGAPARSEC
}

/// Creates a length from a value in megaparsecs.
#[inline]
#[must_use]
pub fn length_from_megaparsecs(mpc: f64) -> Length {
    Length::new::<meter>(mpc * METERS_PER_MEGAPARSEC)
}
