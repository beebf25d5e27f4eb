use std::fmt;

use ndarray::{Array1, Array2, Axis};
use ninterp::{
    prelude::{Interp2DOwned, Interpolator},
    strategy::Linear,
};

use super::{Extrapolate, InterpError, TableError, error::check_query};

/// A two-dimensional lookup table with bilinear interpolation.
///
/// The grid is `x` by `y` with `z[i][j]` sampled at `(x[i], y[j])`.
/// An axis given in descending order is flipped together with the matching
/// dimension of `z`, so either orientation describes the same surface.
///
/// By default, queries outside the grid return `NaN`.
///
/// # Examples
///
/// ```
/// use balance_components::interpolation::Table2D;
///
/// let table = Table2D::new(
///     &[0.0, 1.0],
///     &[10.0, 20.0],
///     &[[0.0, 1.0], [2.0, 3.0]],
/// ).unwrap();
///
/// assert!((table.interpolate(0.5, 15.0).unwrap() - 1.5).abs() < 1e-12);
/// assert!(table.interpolate(2.0, 15.0).unwrap().is_nan());
/// ```
pub struct Table2D {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Array2<f64>,
    interp: Interp2DOwned<f64, Linear>,
}

impl Table2D {
    /// Builds a table that returns `NaN` outside its grid.
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` is not `x.len()` rows of `y.len()` values,
    /// if either axis has fewer than two points, or if an axis is neither
    /// strictly increasing nor strictly decreasing.
    pub fn new<R: AsRef<[f64]>>(x: &[f64], y: &[f64], rows: &[R]) -> Result<Self, TableError> {
        Self::with_extrapolate(x, y, rows, Extrapolate::NAN)
    }

    /// Builds a table with an explicit out-of-grid policy.
    ///
    /// # Errors
    ///
    /// See [`Table2D::new`].
    pub fn with_extrapolate<R: AsRef<[f64]>>(
        x: &[f64],
        y: &[f64],
        rows: &[R],
        extrapolate: Extrapolate,
    ) -> Result<Self, TableError> {
        let (x, y, z) = normalize_grid(x, y, rows)?;

        let interp = Interp2DOwned::new(
            Array1::from(x.clone()),
            Array1::from(y.clone()),
            z.clone(),
            Linear,
            extrapolate.into(),
        )?;

        Ok(Self { x, y, z, interp })
    }

    /// Interpolates `z` at `(x, y)`.
    ///
    /// A query that lands on a grid node returns the stored sample.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is not finite, or when the
    /// table was built with [`Extrapolate::Error`] and the point is outside
    /// the grid.
    pub fn interpolate(&self, x: f64, y: f64) -> Result<f64, InterpError> {
        check_query("x", x)?;
        check_query("y", y)?;
        if let (Some(i), Some(j)) = (node_index(&self.x, x), node_index(&self.y, y)) {
            return Ok(self.z[[i, j]]);
        }
        self.interp.interpolate(&[x, y]).map_err(Into::into)
    }

    /// Interpolates every `(x, y)` pair in `points`.
    ///
    /// # Errors
    ///
    /// Returns the first interpolation error, if any.
    pub fn interpolate_many(&self, points: &[(f64, f64)]) -> Result<Vec<f64>, InterpError> {
        points
            .iter()
            .map(|&(x, y)| self.interpolate(x, y))
            .collect()
    }

    /// Increasing `x` axis.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Increasing `y` axis.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Samples with shape `(x.len(), y.len())`, oriented to the sorted axes.
    #[must_use]
    pub fn z(&self) -> &Array2<f64> {
        &self.z
    }
}

impl fmt::Debug for Table2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table2D")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish_non_exhaustive()
    }
}

fn node_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.binary_search_by(|probe| probe.total_cmp(&value)).ok()
}

/// Validates a grid and returns it with both axes increasing.
pub(super) fn normalize_grid<R: AsRef<[f64]>>(
    x: &[f64],
    y: &[f64],
    rows: &[R],
) -> Result<(Vec<f64>, Vec<f64>, Array2<f64>), TableError> {
    let expected = (x.len(), y.len());
    let actual = (rows.len(), rows.first().map_or(0, |row| row.as_ref().len()));
    if rows.len() != x.len() || rows.iter().any(|row| row.as_ref().len() != y.len()) {
        return Err(TableError::ShapeMismatch { expected, actual });
    }

    let mut x = x.to_vec();
    let mut y = y.to_vec();
    let flat: Vec<f64> = rows
        .iter()
        .flat_map(|row| row.as_ref().iter().copied())
        .collect();
    let mut z = Array2::from_shape_vec(expected, flat)
        .map_err(|_| TableError::ShapeMismatch { expected, actual })?;

    for (axis, values, name) in [(Axis(0), &mut x, "x"), (Axis(1), &mut y, "y")] {
        check_axis(values, name)?;
        if values[0] > values[values.len() - 1] {
            values.reverse();
            z.invert_axis(axis);
        }
        if values.windows(2).any(|w| w[1] - w[0] <= 0.0) {
            return Err(TableError::NotStrictlyIncreasing { axis: name });
        }
    }

    Ok((x, y, z))
}

fn check_axis(values: &[f64], name: &'static str) -> Result<(), TableError> {
    if values.len() < 2 {
        return Err(TableError::TooFewPoints {
            axis: name,
            len: values.len(),
            min: 2,
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(TableError::NonFinite { axis: name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const TEMPS: [f64; 4] = [35.0, 33.0, 30.0, 25.0];
    const FLOWS: [f64; 5] = [20.0, 50.0, 100.0, 150.0, 200.0];
    const PRESSURES: [[f64; 5]; 4] = [
        [6.549, 7.211, 8.88, 10.945, 13.409],
        [5.9, 6.499, 8.018, 9.927, 12.214],
        [5.036, 5.552, 6.872, 8.572, 10.622],
        [3.851, 4.257, 5.299, 6.712, 8.438],
    ];

    fn pressure_surface() -> Table2D {
        Table2D::new(&TEMPS, &FLOWS, &PRESSURES).unwrap()
    }

    #[test]
    fn returns_samples_at_nodes() {
        let table = pressure_surface();

        for (i, t) in TEMPS.iter().enumerate() {
            for (j, g) in FLOWS.iter().enumerate() {
                assert_eq!(table.interpolate(*t, *g).unwrap(), PRESSURES[i][j]);
            }
        }
    }

    #[test]
    fn descending_axis_is_normalized() {
        let table = pressure_surface();

        assert_eq!(table.x(), &[25.0, 30.0, 33.0, 35.0]);
        assert_eq!(table.z()[[0, 0]], 3.851);
        assert_eq!(table.z()[[3, 4]], 13.409);
    }

    #[test]
    fn input_order_does_not_matter() {
        let descending = pressure_surface();

        let temps: Vec<f64> = TEMPS.iter().rev().copied().collect();
        let rows: Vec<Vec<f64>> = PRESSURES.iter().rev().map(|r| r.to_vec()).collect();
        let ascending = Table2D::new(&temps, &FLOWS, &rows).unwrap();

        for (t, g) in [(27.0, 112.0), (34.0, 30.0), (25.5, 199.0)] {
            assert_eq!(
                descending.interpolate(t, g).unwrap(),
                ascending.interpolate(t, g).unwrap()
            );
        }
    }

    #[test]
    fn bilinear_between_nodes() {
        let table = pressure_surface();

        let test_cases = [((27.0, 112.0), 6.294_872), ((30.0, 112.0), 7.28)];

        for ((t, g), expected) in test_cases {
            let actual = table.interpolate(t, g).unwrap();
            assert!(
                approx::relative_eq!(actual, expected, epsilon = 1e-9),
                "({t}, {g}) produced {actual}, expected {expected}"
            );
        }
    }

    #[test]
    fn nan_outside_grid_by_default() {
        let table = pressure_surface();

        assert!(table.interpolate(40.0, 112.0).unwrap().is_nan());
        assert!(table.interpolate(30.0, 10.0).unwrap().is_nan());
    }

    #[test]
    fn non_finite_query_is_an_error() {
        let table = Table2D::with_extrapolate(
            &[0.0, 1.0],
            &[0.0, 1.0],
            &[[0.0, 1.0], [1.0, 2.0]],
            Extrapolate::Enable,
        )
        .unwrap();

        assert!(matches!(
            table.interpolate(f64::INFINITY, 0.5),
            Err(InterpError::NonFiniteQuery { axis: "x", .. })
        ));
        assert!(matches!(
            table.interpolate(0.5, f64::NAN),
            Err(InterpError::NonFiniteQuery { axis: "y", .. })
        ));
        assert!(pressure_surface().interpolate(f64::NAN, 112.0).is_err());
    }

    #[test]
    fn enable_policy_extrapolates() {
        let table = Table2D::with_extrapolate(
            &[0.0, 1.0],
            &[0.0, 1.0],
            &[[0.0, 1.0], [1.0, 2.0]],
            Extrapolate::Enable,
        )
        .unwrap();

        assert_relative_eq!(table.interpolate(2.0, 0.0).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn many_queries_match_single_queries() {
        let table = pressure_surface();
        let points = [(27.0, 112.0), (40.0, 50.0)];

        let values = table.interpolate_many(&points).unwrap();

        assert_eq!(values[0], table.interpolate(27.0, 112.0).unwrap());
        assert!(values[1].is_nan());
    }

    #[test]
    fn shape_error_names_expected_shape() {
        let err = Table2D::new(&[0.0, 1.0, 2.0], &[0.0, 1.0], &[[0.0, 1.0], [1.0, 2.0]])
            .unwrap_err();

        assert!(matches!(
            err,
            TableError::ShapeMismatch {
                expected: (3, 2),
                actual: (2, 2),
            }
        ));
        assert!(err.to_string().contains("(3, 2)"));
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(
            Table2D::new(&[0.0, 1.0, 0.5], &[0.0, 1.0], &[[0.0; 2]; 3]),
            Err(TableError::NotStrictlyIncreasing { axis: "x" })
        ));
        assert!(matches!(
            Table2D::new(&[0.0, 1.0], &[1.0, 1.0], &[[0.0; 2]; 2]),
            Err(TableError::NotStrictlyIncreasing { axis: "y" })
        ));
        assert!(matches!(
            Table2D::new(&[0.0], &[0.0, 1.0], &[[0.0; 2]; 1]),
            Err(TableError::TooFewPoints { axis: "x", .. })
        ));
        assert!(matches!(
            Table2D::new(&[0.0, f64::INFINITY], &[0.0, 1.0], &[[0.0; 2]; 2]),
            Err(TableError::NonFinite { axis: "x" })
        ));
    }
}
