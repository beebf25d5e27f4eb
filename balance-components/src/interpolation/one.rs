use std::fmt;

use ndarray::Array1;
use ninterp::{
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};

use super::{Extrapolate, InterpError, TableError, error::check_query};

/// A one-dimensional lookup table with linear interpolation.
///
/// Samples are sorted by `x` on construction, and the sorted `x` values must
/// be strictly increasing. By default, queries outside `[x_min, x_max]`
/// extrapolate along the nearest end segment.
///
/// A table with a single sample is a constant.
///
/// # Examples
///
/// ```
/// use balance_components::interpolation::Table1D;
///
/// let table = Table1D::new(&[2.0, 0.0, 1.0], &[0.8, 0.0, 0.4]).unwrap();
///
/// assert!((table.interpolate(1.5).unwrap() - 0.6).abs() < 1e-12);
/// assert!((table.interpolate(3.0).unwrap() - 1.2).abs() < 1e-12);
/// ```
pub struct Table1D {
    x: Vec<f64>,
    y: Vec<f64>,
    curve: Curve,
}

enum Curve {
    Constant(Extrapolate),
    Linear(Interp1DOwned<f64, Linear>),
}

impl Table1D {
    /// Builds a table that extrapolates linearly outside its domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are empty, differ in length, contain a
    /// non-finite `x`, or repeat an `x` value.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, TableError> {
        Self::with_extrapolate(x, y, Extrapolate::Enable)
    }

    /// Builds a table with an explicit out-of-domain policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are empty, differ in length, contain a
    /// non-finite `x`, or repeat an `x` value. A single-sample table cannot
    /// use [`Extrapolate::Error`].
    pub fn with_extrapolate(
        x: &[f64],
        y: &[f64],
        extrapolate: Extrapolate,
    ) -> Result<Self, TableError> {
        if x.len() != y.len() {
            return Err(TableError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(TableError::Empty);
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(TableError::NonFinite { axis: "x" });
        }

        let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        if pairs.windows(2).any(|w| w[1].0 - w[0].0 <= 0.0) {
            return Err(TableError::NotStrictlyIncreasing { axis: "x" });
        }
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

        let curve = if x.len() == 1 {
            if matches!(extrapolate, Extrapolate::Error) {
                return Err(TableError::TooFewPoints {
                    axis: "x",
                    len: 1,
                    min: 2,
                });
            }
            Curve::Constant(extrapolate)
        } else {
            Curve::Linear(Interp1DOwned::new(
                Array1::from(x.clone()),
                Array1::from(y.clone()),
                Linear,
                extrapolate.into(),
            )?)
        };

        Ok(Self { x, y, curve })
    }

    /// Interpolates `y` at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is not finite, or when the table was built
    /// with [`Extrapolate::Error`] and `x` is outside the domain.
    pub fn interpolate(&self, x: f64) -> Result<f64, InterpError> {
        check_query("x", x)?;
        if let Ok(i) = self.x.binary_search_by(|probe| probe.total_cmp(&x)) {
            return Ok(self.y[i]);
        }
        match &self.curve {
            Curve::Linear(interp) => interp.interpolate(&[x]).map_err(Into::into),
            Curve::Constant(Extrapolate::Fill(fill)) => Ok(*fill),
            Curve::Constant(_) => Ok(self.y[0]),
        }
    }

    /// Interpolates every point in `xs`.
    ///
    /// # Errors
    ///
    /// Returns the first interpolation error, if any.
    pub fn interpolate_many(&self, xs: &[f64]) -> Result<Vec<f64>, InterpError> {
        xs.iter().map(|&x| self.interpolate(x)).collect()
    }

    /// Sorted sample abscissae.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Sample values, ordered to match [`Table1D::x`].
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

impl fmt::Debug for Table1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table1D")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish_non_exhaustive()
    }
}
