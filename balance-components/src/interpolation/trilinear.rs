use tracing::warn;

use super::{InterpError, Table2D};

/// Two surfaces sampled at different values of a third parameter.
///
/// A query evaluates both tables at `(x, y)` and then interpolates linearly
/// across `a`, extrapolating when `a` lies outside `[a_low, a_high]`.
#[derive(Debug, Clone, Copy)]
pub struct Trilinear<'a> {
    low: &'a Table2D,
    a_low: f64,
    high: &'a Table2D,
    a_high: f64,
}

impl<'a> Trilinear<'a> {
    #[must_use]
    pub fn new(low: &'a Table2D, a_low: f64, high: &'a Table2D, a_high: f64) -> Self {
        Self {
            low,
            a_low,
            high,
            a_high,
        }
    }

    /// Evaluates the composed surface at `(x, y, a)`.
    ///
    /// Returns `NaN` when either table is `NaN` at `(x, y)`. When the two
    /// reference values of `a` coincide, the low table's value is returned.
    ///
    /// # Errors
    ///
    /// Propagates an error from either table's query.
    #[allow(clippy::float_cmp)]
    pub fn interpolate(&self, x: f64, y: f64, a: f64) -> Result<f64, InterpError> {
        let z_low = self.low.interpolate(x, y)?;

        if self.a_low == self.a_high {
            if a != self.a_low {
                warn!(
                    a,
                    a_ref = self.a_low,
                    "both tables share one reference value, using the low table"
                );
            }
            return Ok(z_low);
        }

        let z_high = self.high.interpolate(x, y)?;
        if z_low.is_nan() || z_high.is_nan() {
            warn!(x, y, z_low, z_high, "table query outside its grid");
            return Ok(f64::NAN);
        }

        Ok(z_low + (z_high - z_low) * (a - self.a_low) / (self.a_high - self.a_low))
    }
}
