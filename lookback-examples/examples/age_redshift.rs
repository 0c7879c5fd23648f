//! # Angular Diameter Distance vs. Redshift and Age
//!
//! Plots the angular diameter distance of a flat Lambda-CDM universe against
//! redshift, with a second axis along the top marking the time since the Big
//! Bang.
//!
//! The default model has `H0 = 70 km/s/Mpc` and `Ω_M = 0.3`. Pass a TOML file
//! to use other parameters:
//!
//! ```toml
//! [model]
//! h0 = 67.7
//! omega_m = 0.31
//!
//! [mapper]
//! z_max = 500.0
//! ```
//!
//! ## Running the Example
//!
//! ```sh
//! RUST_LOG=lookback=debug cargo run --example age_redshift -- params.toml
//! ```

use std::{error::Error, fs};

use lookback_core::units::{gigayears, megaparsecs};
use lookback_cosmo::{AgeTickSet, FlatLambdaCdm, MapperConfig, RedshiftAgeMapper, SampleGrid};
use lookback_plot::{AxisConfig, FigureConfig, PlotApp, SecondaryAxis, TickLabel};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Ages marked on the top axis, in Gyr.
const TICK_AGES_GYR: [f64; 11] = [13.0, 10.0, 8.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.5, 1.2, 1.0];

/// Redshift sampling: `[0, 6)` in steps of 0.1.
const GRID: (f64, f64, f64) = (0.0, 6.0, 0.1);

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Params {
    model: FlatLambdaCdm,
    mapper: MapperConfig,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            model: FlatLambdaCdm::from_params(70.0, 0.3).expect("fiducial parameters are valid"),
            mapper: MapperConfig::default(),
        }
    }
}

fn load_params() -> Result<Params, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading parameters");
            Ok(toml::from_str(&fs::read_to_string(path)?)?)
        }
        None => Ok(Params::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Params { model, mapper } = load_params()?;
    let mapper = RedshiftAgeMapper::new(mapper)?;

    info!(
        h0 = model.h0().km_per_s_per_mpc(),
        omega_m = model.omega_m().get(),
        age_gyr = model.current_age_gyr(),
        "flat Lambda-CDM"
    );

    let (start, stop, step) = GRID;
    let grid = SampleGrid::arange(start, stop, step)?;
    let distances = mapper.compute_distances(&model, &grid)?;

    let points: Vec<[f64; 2]> = grid
        .as_slice()
        .iter()
        .zip(distances)
        .map(|(&z, d)| [z, megaparsecs(d)])
        .collect();

    let ages = AgeTickSet::from_gigayears(TICK_AGES_GYR);
    let mapping = mapper.find_redshifts_for_ages(&model, &ages)?;
    for failure in mapping.failures() {
        warn!(age_gyr = gigayears(failure.age), error = %failure.error, "skipping tick");
    }

    let ticks = mapping
        .resolved()
        .iter()
        .map(|tick| TickLabel::new(tick.redshift.get(), TICK_AGES_GYR[tick.index].to_string()))
        .collect();

    let z_last = grid.as_slice().last().copied().unwrap_or(stop);
    let figure = FigureConfig {
        title: "Angular diameter distance".to_owned(),
        size: [600.0, 400.0],
        x_axis: AxisConfig::new("Redshift").with_limits(start, z_last),
        y_axis: AxisConfig::new("Angular diameter distance (Mpc)").with_limits(0.0, 2000.0),
        secondary_x: Some(SecondaryAxis::new("Time since Big Bang (Gyr)", ticks)),
    };

    PlotApp::new(figure)?.add_series("D_A", &points).run()?;

    Ok(())
}
