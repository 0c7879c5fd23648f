use std::error::Error as StdError;

use lookback_core::{
    Model, Redshift,
    units::{gigayears, time_from_gigayears},
};
use lookback_solve::equation::bisection::{self, Action, Event, Status};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};
use uom::si::f64::{Length, Time};

use crate::{AgeModel, AgeTarget, Cosmology, DistanceModel};

/// An ordered list of redshifts at which to sample a model.
///
/// Values are stored as given. They are checked when a model is evaluated,
/// so a negative entry surfaces as [`MapperError::InvalidInput`] with its
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleGrid(Vec<f64>);

impl SampleGrid {
    /// Largest grid [`SampleGrid::arange`] will build.
    pub const MAX_LEN: usize = 1 << 24;

    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Builds `start, start + step, …` up to but excluding `stop`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if any argument is non-finite, `step` is not
    /// positive, `stop` lies before `start`, or the grid would have more than
    /// [`SampleGrid::MAX_LEN`] points.
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, GridError> {
        if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
            return Err(GridError::NonFinite);
        }
        if step <= 0.0 {
            return Err(GridError::NonPositiveStep(step));
        }
        if stop < start {
            return Err(GridError::Reversed { start, stop });
        }

        let count = ((stop - start) / step).ceil();
        #[allow(clippy::cast_precision_loss)]
        if count > Self::MAX_LEN as f64 {
            return Err(GridError::TooLong {
                len: count,
                max: Self::MAX_LEN,
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = count as usize;

        #[allow(clippy::cast_precision_loss)]
        let values = (0..len).map(|i| start + i as f64 * step).collect();

        Ok(Self(values))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for SampleGrid {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Errors from [`SampleGrid::arange`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("grid bounds and step must be finite")]
    NonFinite,

    #[error("grid step must be positive, got {0}")]
    NonPositiveStep(f64),

    #[error("grid stop {stop} is before start {start}")]
    Reversed { start: f64, stop: f64 },

    #[error("grid would have {len} points, more than the limit of {max}")]
    TooLong { len: f64, max: usize },
}

/// An ordered list of target ages.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeTickSet(Vec<Time>);

impl AgeTickSet {
    #[must_use]
    pub fn new(ages: Vec<Time>) -> Self {
        Self(ages)
    }

    /// Builds a tick set from ages in gigayears.
    pub fn from_gigayears(ages: impl IntoIterator<Item = f64>) -> Self {
        Self(ages.into_iter().map(time_from_gigayears).collect())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Time] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Settings for [`RedshiftAgeMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Bisection tolerances; the residual is measured in gigayears.
    pub solver: bisection::Config,
    /// Initial upper end of the redshift bracket.
    pub z_max: f64,
    /// How many times `z_max` may be doubled to bracket a very young age.
    pub max_bracket_expansions: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            solver: bisection::Config::default(),
            z_max: 1000.0,
            max_bracket_expansions: 16,
        }
    }
}

impl MapperConfig {
    /// Checks the solver tolerances and the bracket bound.
    ///
    /// # Errors
    ///
    /// Returns a static description of the first invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        self.solver.validate()?;
        if !self.z_max.is_finite() || self.z_max <= 0.0 {
            return Err("z_max must be finite and positive");
        }
        Ok(())
    }
}

/// Errors that abort a whole mapper call.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("invalid mapper config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("invalid redshift {z} at grid index {index}")]
    InvalidInput { index: usize, z: f64 },

    #[error("model evaluation failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

/// Why a single age could not be mapped to a redshift.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("age {age_gyr} Gyr is outside (0, {max_gyr}] Gyr")]
    OutOfRange { age_gyr: f64, max_gyr: f64 },

    #[error("age {age_gyr} Gyr is not reached below z = {z_max}")]
    NoBracket { age_gyr: f64, z_max: f64 },

    #[error("no convergence after {iters} iterations (residual {residual_gyr} Gyr)")]
    NotConverged { iters: usize, residual_gyr: f64 },

    #[error(transparent)]
    Solver(#[from] bisection::Error),

    #[error("model evaluation failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

/// A target age and the redshift at which the universe had that age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTick {
    /// Position in the requested tick set.
    pub index: usize,
    pub age: Time,
    pub redshift: Redshift,
    /// Bisection iterations spent.
    pub iters: usize,
}

/// A target age that could not be resolved.
#[derive(Debug)]
pub struct TickFailure {
    /// Position in the requested tick set.
    pub index: usize,
    pub age: Time,
    pub error: TickError,
}

/// Outcome of [`RedshiftAgeMapper::find_redshifts_for_ages`].
///
/// Every requested age lands in exactly one of the two lists, and both keep
/// the request order.
#[derive(Debug, Default)]
pub struct TickMapping {
    resolved: Vec<ResolvedTick>,
    failures: Vec<TickFailure>,
}

impl TickMapping {
    #[must_use]
    pub fn resolved(&self) -> &[ResolvedTick] {
        &self.resolved
    }

    #[must_use]
    pub fn failures(&self) -> &[TickFailure] {
        &self.failures
    }

    /// Returns true if every requested age was resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Redshift for the first request equal to `age`, if it resolved.
    #[must_use]
    pub fn get(&self, age: Time) -> Option<Redshift> {
        self.resolved
            .iter()
            .find(|tick| tick.age == age)
            .map(|tick| tick.redshift)
    }

    /// Resolved redshifts in request order.
    #[must_use]
    pub fn redshifts(&self) -> Vec<f64> {
        self.resolved.iter().map(|tick| tick.redshift.get()).collect()
    }
}

/// Maps a cosmology onto plot-ready sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RedshiftAgeMapper {
    config: MapperConfig,
}

impl RedshiftAgeMapper {
    /// Creates a mapper with a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::InvalidConfig`] if the config fails validation.
    pub fn new(config: MapperConfig) -> Result<Self, MapperError> {
        config
            .validate()
            .map_err(|reason| MapperError::InvalidConfig { reason })?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Evaluates the angular diameter distance at every grid point, in order.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::InvalidInput`] for the first negative or
    /// non-finite redshift, or [`MapperError::Model`] if the model fails.
    pub fn compute_distances<C: Cosmology>(
        &self,
        model: &C,
        grid: &SampleGrid,
    ) -> Result<Vec<Length>, MapperError> {
        let distance = DistanceModel(model);
        grid.as_slice()
            .iter()
            .enumerate()
            .map(|(index, &z)| {
                let z = Redshift::new(z).map_err(|_| MapperError::InvalidInput { index, z })?;
                distance
                    .call(&z)
                    .map_err(|e| MapperError::Model(Box::new(e)))
            })
            .collect()
    }

    /// Finds, for each target age, the redshift at which the universe had it.
    ///
    /// Each age is solved independently by bisection on
    /// `[0, z_max]`, doubling `z_max` as needed. A failed age is recorded in
    /// [`TickMapping::failures`] and does not affect the others.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::Model`] only if the model cannot report its
    /// present age, since the valid range of targets is then unknown.
    pub fn find_redshifts_for_ages<C: Cosmology>(
        &self,
        model: &C,
        ages: &AgeTickSet,
    ) -> Result<TickMapping, MapperError> {
        let max_gyr = gigayears(
            model
                .current_age()
                .map_err(|e| MapperError::Model(Box::new(e)))?,
        );

        let mut mapping = TickMapping::default();

        for (index, &age) in ages.as_slice().iter().enumerate() {
            match self.find_redshift(model, age, max_gyr) {
                Ok((redshift, iters)) => {
                    debug!(
                        age_gyr = gigayears(age),
                        z = redshift.get(),
                        iters,
                        "resolved age tick"
                    );
                    mapping.resolved.push(ResolvedTick {
                        index,
                        age,
                        redshift,
                        iters,
                    });
                }
                Err(error) => {
                    warn!(age_gyr = gigayears(age), %error, "could not resolve age tick");
                    mapping.failures.push(TickFailure { index, age, error });
                }
            }
        }

        Ok(mapping)
    }

    fn find_redshift<C: Cosmology>(
        &self,
        model: &C,
        age: Time,
        max_gyr: f64,
    ) -> Result<(Redshift, usize), TickError> {
        let age_gyr = gigayears(age);
        if !age_gyr.is_finite() || age_gyr <= 0.0 || age_gyr > max_gyr {
            return Err(TickError::OutOfRange { age_gyr, max_gyr });
        }

        let age_model = AgeModel(model);
        let target = AgeTarget::new(age);
        let z_hi = self.upper_bracket(&age_model, age_gyr)?;

        let observer = |event: &Event<'_, Redshift, Time>| -> Option<Action> {
            if let Event::Midpoint { iter, eval, .. } = event {
                trace!(iter, z = eval.x, residual_gyr = eval.residual, "bisection step");
            }
            None
        };

        let solution = bisection::solve(
            &age_model,
            &target,
            [0.0, z_hi],
            &self.config.solver,
            observer,
        )?;

        match solution.status {
            Status::Converged => Ok((solution.snapshot.input, solution.iters)),
            Status::MaxIters | Status::StoppedByObserver => Err(TickError::NotConverged {
                iters: solution.iters,
                residual_gyr: solution.residual,
            }),
        }
    }

    /// Returns a redshift at which the universe is no older than `age_gyr`.
    fn upper_bracket<C: Cosmology>(
        &self,
        model: &AgeModel<'_, C>,
        age_gyr: f64,
    ) -> Result<f64, TickError> {
        let mut z_max = self.config.z_max;

        for expansion in 0..=self.config.max_bracket_expansions {
            let z = Redshift::new(z_max).map_err(|_| TickError::NoBracket { age_gyr, z_max })?;
            let age_at_z = model.call(&z).map_err(|e| TickError::Model(Box::new(e)))?;

            if gigayears(age_at_z) <= age_gyr {
                return Ok(z_max);
            }
            if expansion < self.config.max_bracket_expansions {
                debug!(age_gyr, z_max, "expanding redshift bracket");
                z_max *= 2.0;
            }
        }

        Err(TickError::NoBracket { age_gyr, z_max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use lookback_core::units::megaparsecs;

    use crate::FlatLambdaCdm;

    fn fiducial() -> FlatLambdaCdm {
        FlatLambdaCdm::from_params(70.0, 0.3).expect("valid parameters")
    }

    #[test]
    fn arange_matches_half_open_semantics() {
        let grid = SampleGrid::arange(0.0, 6.0, 0.1).expect("valid grid");
        assert_eq!(grid.len(), 60);
        assert_relative_eq!(grid.as_slice()[0], 0.0);
        assert_relative_eq!(grid.as_slice()[59], 5.9, epsilon = 1e-12);

        assert!(SampleGrid::arange(1.0, 1.0, 0.5).unwrap().is_empty());
        assert_eq!(
            SampleGrid::arange(0.0, 1.0, 0.0),
            Err(GridError::NonPositiveStep(0.0))
        );
        assert!(matches!(
            SampleGrid::arange(2.0, 1.0, 0.1),
            Err(GridError::Reversed { .. })
        ));
        assert_eq!(
            SampleGrid::arange(0.0, f64::NAN, 0.1),
            Err(GridError::NonFinite)
        );
    }

    #[test]
    fn arange_rejects_oversized_grids() {
        assert!(matches!(
            SampleGrid::arange(0.0, 1e300, 1e-300),
            Err(GridError::TooLong { max: SampleGrid::MAX_LEN, .. })
        ));

        // The span itself overflows to infinity.
        assert!(matches!(
            SampleGrid::arange(-1e308, 1e308, 1.0),
            Err(GridError::TooLong { .. })
        ));
    }

    #[test]
    fn distances_keep_grid_order_and_length() {
        let mapper = RedshiftAgeMapper::default();
        let grid = SampleGrid::new(vec![1.0, 0.0, 0.5]);

        let distances = mapper.compute_distances(&fiducial(), &grid).unwrap();
        let mpc: Vec<f64> = distances.into_iter().map(megaparsecs).collect();

        assert_eq!(mpc.len(), 3);
        assert_relative_eq!(mpc[0], 1651.9144, max_relative = 1e-6);
        assert_relative_eq!(mpc[1], 0.0);
        assert_relative_eq!(mpc[2], 1259.0836, max_relative = 1e-6);
    }

    #[test]
    fn distances_cover_extreme_redshifts() {
        let mapper = RedshiftAgeMapper::default();
        let grid = SampleGrid::new(vec![1e6, 1e10, 1e300]);

        let distances = mapper.compute_distances(&fiducial(), &grid).unwrap();
        let mpc: Vec<f64> = distances.into_iter().map(megaparsecs).collect();

        assert_relative_eq!(mpc[0], 0.014_139_159, max_relative = 1e-6);
        assert_relative_eq!(mpc[1], 1.415_465_5e-6, max_relative = 1e-6);
        assert!(mpc[2].is_finite() && mpc[2] > 0.0);
    }

    #[test]
    fn negative_redshift_is_invalid_input() {
        let mapper = RedshiftAgeMapper::default();
        let grid = SampleGrid::new(vec![0.0, 0.5, -0.1, 1.0]);

        let err = mapper.compute_distances(&fiducial(), &grid).unwrap_err();
        assert!(matches!(err, MapperError::InvalidInput { index: 2, .. }));
    }

    #[test]
    fn empty_inputs_give_empty_outputs() {
        let mapper = RedshiftAgeMapper::default();
        let model = fiducial();

        let distances = mapper
            .compute_distances(&model, &SampleGrid::new(Vec::new()))
            .unwrap();
        assert!(distances.is_empty());

        let mapping = mapper
            .find_redshifts_for_ages(&model, &AgeTickSet::new(Vec::new()))
            .unwrap();
        assert!(mapping.resolved().is_empty());
        assert!(mapping.is_complete());
    }

    #[test]
    fn resolves_age_round_trip() {
        let mapper = RedshiftAgeMapper::default();
        let model = fiducial();
        let ages = AgeTickSet::from_gigayears([12.0, 5.751_646_943, 0.5]);

        let mapping = mapper.find_redshifts_for_ages(&model, &ages).unwrap();
        assert!(mapping.is_complete());

        for tick in mapping.resolved() {
            let recovered = gigayears(model.age(tick.redshift));
            assert_relative_eq!(recovered, gigayears(tick.age), epsilon = 1e-8);
        }
        assert_relative_eq!(mapping.resolved()[1].redshift.get(), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn current_age_resolves_to_zero() {
        let mapper = RedshiftAgeMapper::default();
        let model = fiducial();
        let today = model.age(Redshift::ZERO);

        let mapping = mapper
            .find_redshifts_for_ages(&model, &AgeTickSet::new(vec![today]))
            .unwrap();

        let z = mapping.get(today).expect("current age is in range");
        assert_relative_eq!(z.get(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn out_of_range_ages_fail_individually() {
        let mapper = RedshiftAgeMapper::default();
        let ages = AgeTickSet::from_gigayears([14.0, 10.0, 0.0, -1.0, 1.0]);

        let mapping = mapper.find_redshifts_for_ages(&fiducial(), &ages).unwrap();

        let failed: Vec<usize> = mapping.failures().iter().map(|f| f.index).collect();
        assert_eq!(failed, vec![0, 2, 3]);
        assert!(
            mapping
                .failures()
                .iter()
                .all(|f| matches!(f.error, TickError::OutOfRange { .. }))
        );

        let resolved: Vec<usize> = mapping.resolved().iter().map(|t| t.index).collect();
        assert_eq!(resolved, vec![1, 4]);
    }

    #[test]
    fn very_young_ages_expand_the_bracket() {
        let config = MapperConfig {
            z_max: 10.0,
            ..MapperConfig::default()
        };
        let mapper = RedshiftAgeMapper::new(config).unwrap();
        let model = fiducial();

        let mapping = mapper
            .find_redshifts_for_ages(&model, &AgeTickSet::from_gigayears([0.1]))
            .unwrap();

        let tick = mapping.resolved()[0];
        assert!(tick.redshift.get() > 10.0);
        assert_relative_eq!(gigayears(model.age(tick.redshift)), 0.1, epsilon = 1e-8);
    }

    #[test]
    fn bracket_limit_is_reported() {
        let config = MapperConfig {
            z_max: 1.0,
            max_bracket_expansions: 2,
            ..MapperConfig::default()
        };
        let mapper = RedshiftAgeMapper::new(config).unwrap();

        let mapping = mapper
            .find_redshifts_for_ages(&fiducial(), &AgeTickSet::from_gigayears([0.5]))
            .unwrap();

        assert!(matches!(
            mapping.failures()[0].error,
            TickError::NoBracket { z_max, .. } if (z_max - 4.0).abs() < 1e-12
        ));
    }

    #[test]
    fn iteration_cap_is_a_per_tick_failure() {
        let config = MapperConfig {
            solver: bisection::Config {
                max_iters: 3,
                x_abs_tol: 0.0,
                x_rel_tol: 0.0,
                residual_tol: 0.0,
            },
            ..MapperConfig::default()
        };
        let mapper = RedshiftAgeMapper::new(config).unwrap();

        let mapping = mapper
            .find_redshifts_for_ages(&fiducial(), &AgeTickSet::from_gigayears([5.0, 3.0]))
            .unwrap();

        assert_eq!(mapping.failures().len(), 2);
        assert!(
            mapping
                .failures()
                .iter()
                .all(|f| matches!(f.error, TickError::NotConverged { iters: 3, .. }))
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let config = MapperConfig {
            z_max: -1.0,
            ..MapperConfig::default()
        };
        assert!(matches!(
            RedshiftAgeMapper::new(config),
            Err(MapperError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: MapperConfig =
            toml::from_str("z_max = 50.0\n[solver]\nmax_iters = 80\n").expect("valid config");
        assert_relative_eq!(config.z_max, 50.0);
        assert_eq!(config.solver.max_iters, 80);
        assert_eq!(config.max_bracket_expansions, 16);
        assert_relative_eq!(config.solver.residual_tol, 1e-10);
    }
}
