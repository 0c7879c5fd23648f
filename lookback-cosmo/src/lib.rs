//! Background cosmology for lookback.
//!
//! [`FlatLambdaCdm`] provides ages and distances as functions of redshift.
//! [`RedshiftAgeMapper`] turns a model into plot-ready data: distances over a
//! [`SampleGrid`], and the redshifts at which the universe reached each age in
//! an [`AgeTickSet`].

mod cosmology;
mod flat_lcdm;
mod mapper;
mod models;
pub mod quad;

pub use cosmology::Cosmology;
pub use flat_lcdm::{FlatLambdaCdm, ModelError};
pub use mapper::{
    AgeTickSet, GridError, MapperConfig, MapperError, RedshiftAgeMapper, ResolvedTick, SampleGrid,
    TickError, TickFailure, TickMapping,
};
pub use models::{AgeModel, AgeTarget, DistanceModel};
