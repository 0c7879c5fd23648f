use lookback_core::{
    Fraction, FractionError, HubbleConstant, Redshift,
    units::{HubbleConstantError, gigayears},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::f64::{Frequency, Length, Time};

use crate::{
    Cosmology,
    quad::{self, QuadConfig, QuadError},
};

/// A spatially flat Lambda-CDM cosmology with matter and a cosmological
/// constant, ignoring radiation.
///
/// Flatness fixes the dark-energy density at `Ω_Λ = 1 − Ω_M`. With no
/// radiation term the age has a closed form; comoving distances are
/// integrated numerically.
///
/// # Examples
/// ```
/// use lookback_cosmo::FlatLambdaCdm;
/// use lookback_core::{Redshift, units::gigayears};
///
/// let model = FlatLambdaCdm::from_params(70.0, 0.3).unwrap();
/// let age = model.age(Redshift::ZERO);
/// assert!((gigayears(age) - 13.467).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Params", into = "Params")]
pub struct FlatLambdaCdm {
    h0: HubbleConstant,
    omega_m: Fraction,
}

/// Serialized form, validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Params {
    h0: HubbleConstant,
    omega_m: Fraction,
}

impl FlatLambdaCdm {
    /// Creates a model from `H0` and the present matter density `Ω_M`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoMatter`] if `Ω_M` is zero; an empty de Sitter
    /// universe has no finite age.
    pub fn new(h0: HubbleConstant, omega_m: Fraction) -> Result<Self, ModelError> {
        if omega_m.is_zero() {
            return Err(ModelError::NoMatter);
        }
        Ok(Self { h0, omega_m })
    }

    /// Creates a model from `H0` in km/s/Mpc and a raw `Ω_M`.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter fails validation.
    pub fn from_params(h0_km_per_s_per_mpc: f64, omega_m: f64) -> Result<Self, ModelError> {
        let h0 = HubbleConstant::from_km_per_s_per_mpc(h0_km_per_s_per_mpc)?;
        let omega_m = Fraction::new(omega_m)?;
        Self::new(h0, omega_m)
    }

    #[must_use]
    pub fn h0(&self) -> HubbleConstant {
        self.h0
    }

    #[must_use]
    pub fn omega_m(&self) -> Fraction {
        self.omega_m
    }

    /// Dark-energy density `Ω_Λ = 1 − Ω_M`.
    #[must_use]
    pub fn omega_lambda(&self) -> Fraction {
        self.omega_m.complement()
    }

    /// Dimensionless expansion rate `E(z) = H(z) / H0`.
    #[must_use]
    pub fn efunc(&self, z: Redshift) -> f64 {
        efunc(self.omega_m.get(), z.get())
    }

    /// Hubble parameter `H(z)`.
    #[must_use]
    pub fn hubble_parameter(&self, z: Redshift) -> Frequency {
        self.h0.into_inner() * self.efunc(z)
    }

    /// Age of the universe at redshift `z`.
    ///
    /// With `x = (1+z)^{-3/2}` and Hubble time `t_H`:
    ///
    /// - `Ω_Λ > 0`: `t = 2 t_H / (3 √Ω_Λ) · asinh(√(Ω_Λ/Ω_M) · x)`
    /// - `Ω_Λ = 0`: `t = 2 t_H / 3 · x` (Einstein–de Sitter)
    #[must_use]
    pub fn age(&self, z: Redshift) -> Time {
        let x = (1.0 + z.get()).powf(-1.5);
        let omega_m = self.omega_m.get();
        let omega_l = self.omega_lambda().get();

        let dimensionless = if omega_l > 0.0 {
            2.0 / (3.0 * omega_l.sqrt()) * ((omega_l / omega_m).sqrt() * x).asinh()
        } else {
            2.0 / 3.0 * x
        };

        self.h0.hubble_time() * dimensionless
    }

    /// Time elapsed between redshift `z` and today.
    #[must_use]
    pub fn lookback_time(&self, z: Redshift) -> Time {
        self.age(Redshift::ZERO) - self.age(z)
    }

    /// Line-of-sight comoving distance `D_C = D_H ∫₀^z dz' / E(z')`.
    ///
    /// The integral is taken over `u = √a = (1+z)^{-1/2}`, where it becomes
    /// `∫_{u(z)}^1 2 du / √(Ω_M + Ω_Λ u⁶)`. The integrand is smooth and
    /// bounded on `[0, 1]`, so arbitrarily large redshifts converge.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Quadrature`] if the integral fails to converge.
    pub fn comoving_distance(&self, z: Redshift) -> Result<Length, ModelError> {
        let omega_m = self.omega_m.get();
        let omega_l = self.omega_lambda().get();
        let u_min = (1.0 + z.get()).sqrt().recip();
        let integral = quad::integrate(
            |u| 2.0 / (omega_m + omega_l * u.powi(6)).sqrt(),
            u_min,
            1.0,
            &QuadConfig::default(),
        )?;
        Ok(self.h0.hubble_distance() * integral)
    }

    /// Angular diameter distance `D_A = D_C / (1 + z)`.
    ///
    /// # Errors
    ///
    /// Same as [`comoving_distance`](Self::comoving_distance).
    pub fn angular_diameter_distance(&self, z: Redshift) -> Result<Length, ModelError> {
        Ok(self.comoving_distance(z)? * z.scale_factor())
    }

    /// Luminosity distance `D_L = (1 + z) D_C`.
    ///
    /// # Errors
    ///
    /// Same as [`comoving_distance`](Self::comoving_distance).
    pub fn luminosity_distance(&self, z: Redshift) -> Result<Length, ModelError> {
        Ok(self.comoving_distance(z)? * (1.0 + z.get()))
    }

    /// Age today, in gigayears.
    #[must_use]
    pub fn current_age_gyr(&self) -> f64 {
        gigayears(self.age(Redshift::ZERO))
    }
}

fn efunc(omega_m: f64, z: f64) -> f64 {
    (omega_m * (1.0 + z).powi(3) + (1.0 - omega_m)).sqrt()
}

impl Cosmology for FlatLambdaCdm {
    type Error = ModelError;

    fn age(&self, z: Redshift) -> Result<Time, ModelError> {
        Ok(FlatLambdaCdm::age(self, z))
    }

    fn angular_diameter_distance(&self, z: Redshift) -> Result<Length, ModelError> {
        FlatLambdaCdm::angular_diameter_distance(self, z)
    }
}

impl TryFrom<Params> for FlatLambdaCdm {
    type Error = ModelError;

    fn try_from(Params { h0, omega_m }: Params) -> Result<Self, Self::Error> {
        Self::new(h0, omega_m)
    }
}

impl From<FlatLambdaCdm> for Params {
    fn from(model: FlatLambdaCdm) -> Self {
        Self {
            h0: model.h0,
            omega_m: model.omega_m,
        }
    }
}

/// Errors that can occur when building or evaluating a [`FlatLambdaCdm`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error(transparent)]
    HubbleConstant(#[from] HubbleConstantError),

    #[error("invalid matter density: {0}")]
    MatterDensity(#[from] FractionError),

    #[error("matter density must be positive for a finite age")]
    NoMatter,

    #[error("distance integral failed: {0}")]
    Quadrature(#[from] QuadError),
}
