mod fraction;
pub mod model;
pub mod units;

pub use fraction::{Fraction, FractionError};
pub use model::{Model, Snapshot};
pub use units::{HubbleConstant, Redshift};
