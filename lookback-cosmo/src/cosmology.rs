use lookback_core::Redshift;
use uom::si::f64::{Length, Time};

/// A background cosmology evaluated at a redshift.
///
/// Implementors must make [`age`](Self::age) strictly decreasing in `z`;
/// inverting it by bisection relies on that. Distances carry no such
/// requirement; angular diameter distance turns over in realistic models.
pub trait Cosmology {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Age of the universe when light observed at redshift `z` was emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be evaluated at `z`.
    fn age(&self, z: Redshift) -> Result<Time, Self::Error>;

    /// Angular diameter distance to redshift `z`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be evaluated at `z`.
    fn angular_diameter_distance(&self, z: Redshift) -> Result<Length, Self::Error>;

    /// Age of the universe today.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be evaluated at `z = 0`.
    fn current_age(&self) -> Result<Time, Self::Error> {
        self.age(Redshift::ZERO)
    }
}
