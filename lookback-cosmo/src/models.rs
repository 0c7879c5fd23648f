//! Adapters that expose a [`Cosmology`] as solver-ready [`Model`]s.

use std::convert::Infallible;

use lookback_core::{Model, Redshift, units::RedshiftError, units::gigayears};
use lookback_solve::equation::Equation;
use uom::si::f64::{Length, Time};

use crate::Cosmology;

/// `z ↦ age(z)` for any cosmology.
#[derive(Debug, Clone, Copy)]
pub struct AgeModel<'a, C>(pub &'a C);

impl<C: Cosmology> Model for AgeModel<'_, C> {
    type Input = Redshift;
    type Output = Time;
    type Error = C::Error;

    fn call(&self, z: &Redshift) -> Result<Time, C::Error> {
        self.0.age(*z)
    }
}

/// `z ↦ D_A(z)` for any cosmology.
#[derive(Debug, Clone, Copy)]
pub struct DistanceModel<'a, C>(pub &'a C);

impl<C: Cosmology> Model for DistanceModel<'_, C> {
    type Input = Redshift;
    type Output = Length;
    type Error = C::Error;

    fn call(&self, z: &Redshift) -> Result<Length, C::Error> {
        self.0.angular_diameter_distance(*z)
    }
}

/// The equation `age(z) − target = 0`, with the residual in gigayears.
///
/// Because age falls with redshift, the residual is positive below the root
/// and negative above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeTarget {
    target_gyr: f64,
}

impl AgeTarget {
    #[must_use]
    pub fn new(target: Time) -> Self {
        Self {
            target_gyr: gigayears(target),
        }
    }

    #[must_use]
    pub fn target_gyr(&self) -> f64 {
        self.target_gyr
    }
}

impl Equation for AgeTarget {
    type Input = Redshift;
    type Output = Time;
    type InputError = RedshiftError;
    type ResidualError = Infallible;

    fn input(&self, x: f64) -> Result<Redshift, RedshiftError> {
        Redshift::new(x)
    }

    fn residual(&self, _z: &Redshift, age: &Time) -> Result<f64, Infallible> {
        Ok(gigayears(*age) - self.target_gyr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use lookback_core::units::{megaparsecs, time_from_gigayears};
    use lookback_solve::equation::evaluate;

    use crate::FlatLambdaCdm;

    #[test]
    fn adapters_forward_to_the_cosmology() {
        let cosmo = FlatLambdaCdm::from_params(70.0, 0.3).unwrap();
        let z = Redshift::new(1.0).unwrap();

        let age = AgeModel(&cosmo).call(&z).unwrap();
        assert_relative_eq!(gigayears(age), 5.751_647, max_relative = 1e-6);

        let distance = DistanceModel(&cosmo).call(&z).unwrap();
        assert_relative_eq!(megaparsecs(distance), 1651.9144, max_relative = 1e-6);
    }

    #[test]
    fn age_target_residual_sign() {
        let cosmo = FlatLambdaCdm::from_params(70.0, 0.3).unwrap();
        let model = AgeModel(&cosmo);
        let target = AgeTarget::new(time_from_gigayears(5.0));

        let low = evaluate(&model, &target, 0.5).unwrap();
        let high = evaluate(&model, &target, 2.0).unwrap();
        assert!(low.residual > 0.0);
        assert!(high.residual < 0.0);
    }

    #[test]
    fn negative_solver_variable_is_rejected() {
        let cosmo = FlatLambdaCdm::from_params(70.0, 0.3).unwrap();
        let target = AgeTarget::new(time_from_gigayears(5.0));
        assert!(evaluate(&AgeModel(&cosmo), &target, -0.1).is_err());
    }
}
