use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

use super::{TableError, two::normalize_grid};

/// An interpolating tensor-product B-spline surface.
///
/// The degree along each axis is `min(len - 1, 3)`, so a 4 by 5 grid gets a
/// cubic surface while a 2 by 2 grid reduces to bilinear. Knots follow the
/// usual not-a-knot placement for interpolation. The surface passes through
/// every grid node, and queries outside the grid are clamped to its
/// bounding box.
#[derive(Debug, Clone)]
pub struct Spline2D {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Array2<f64>,
    x_basis: Basis,
    y_basis: Basis,
    coefficients: DMatrix<f64>,
}

#[derive(Debug, Clone)]
struct Basis {
    knots: Vec<f64>,
    degree: usize,
}

impl Spline2D {
    /// Fits a spline through the grid `z[i][j]` at `(x[i], y[j])`.
    ///
    /// Descending axes are accepted and flipped with their matrix dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is malformed (see
    /// [`Table2D::new`](super::Table2D::new)) or the collocation system along
    /// an axis cannot be solved.
    pub fn new<R: AsRef<[f64]>>(x: &[f64], y: &[f64], rows: &[R]) -> Result<Self, TableError> {
        let (x, y, z) = normalize_grid(x, y, rows)?;

        let x_basis = Basis::fit(&x);
        let y_basis = Basis::fit(&y);

        let samples = DMatrix::from_fn(x.len(), y.len(), |i, j| z[[i, j]]);
        let along_x = x_basis
            .collocation(&x)
            .lu()
            .solve(&samples)
            .ok_or(TableError::Singular { axis: "x" })?;
        let coefficients = y_basis
            .collocation(&y)
            .lu()
            .solve(&along_x.transpose())
            .ok_or(TableError::Singular { axis: "y" })?
            .transpose();

        Ok(Self {
            x,
            y,
            z,
            x_basis,
            y_basis,
            coefficients,
        })
    }

    /// Evaluates the surface at `(x, y)`, clamped to the grid.
    #[must_use]
    pub fn interpolate(&self, x: f64, y: f64) -> f64 {
        let i = self.x.binary_search_by(|probe| probe.total_cmp(&x));
        let j = self.y.binary_search_by(|probe| probe.total_cmp(&y));
        if let (Ok(i), Ok(j)) = (i, j) {
            return self.z[[i, j]];
        }

        let bx = DVector::from_vec(self.x_basis.eval(x));
        let by = DVector::from_vec(self.y_basis.eval(y));
        bx.dot(&(&self.coefficients * by))
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

impl Basis {
    fn fit(axis: &[f64]) -> Self {
        let m = axis.len();
        let degree = (m - 1).min(3);
        let first = axis[0];
        let last = axis[m - 1];

        let mut knots = vec![first; degree + 1];
        if degree % 2 == 1 {
            let half = (degree + 1) / 2;
            knots.extend_from_slice(&axis[half..m - half]);
        } else {
            let half = degree / 2;
            knots.extend((half..m - half - 1).map(|j| (axis[j] + axis[j + 1]) / 2.0));
        }
        knots.extend(std::iter::repeat_n(last, degree + 1));

        Self { knots, degree }
    }

    fn len(&self) -> usize {
        self.knots.len() - self.degree - 1
    }

    fn collocation(&self, axis: &[f64]) -> DMatrix<f64> {
        let rows: Vec<Vec<f64>> = axis.iter().map(|&v| self.eval(v)).collect();
        DMatrix::from_fn(axis.len(), self.len(), |r, c| rows[r][c])
    }

    /// Cox-de Boor recursion for every basis function at `v`.
    #[allow(clippy::float_cmp)]
    fn eval(&self, v: f64) -> Vec<f64> {
        let t = &self.knots;
        let k = self.degree;
        let n = self.len();
        let v = v.clamp(t[k], t[n]);

        let mut span = k;
        while span < n - 1 && t[span + 1] <= v {
            span += 1;
        }

        let mut b = vec![0.0; t.len() - 1];
        b[span] = 1.0;
        for d in 1..=k {
            for i in 0..t.len() - 1 - d {
                let mut value = 0.0;
                if t[i + d] != t[i] {
                    value += (v - t[i]) / (t[i + d] - t[i]) * b[i];
                }
                if t[i + d + 1] != t[i + 1] {
                    value += (t[i + d + 1] - v) / (t[i + d + 1] - t[i + 1]) * b[i + 1];
                }
                b[i] = value;
            }
        }

        b.truncate(n);
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn namet() -> Spline2D {
        Spline2D::new(
            &[35.0, 33.0, 30.0, 25.0],
            &[20.0, 50.0, 100.0, 150.0, 200.0],
            &[
                [6.549, 7.211, 8.88, 10.945, 13.409],
                [5.9, 6.499, 8.018, 9.927, 12.214],
                [5.036, 5.552, 6.872, 8.572, 10.622],
                [3.851, 4.257, 5.299, 6.712, 8.438],
            ],
        )
        .unwrap()
    }

    #[test]
    fn knot_placement() {
        let cubic = Basis::fit(&[20.0, 50.0, 100.0, 150.0, 200.0]);
        assert_eq!(
            cubic.knots,
            vec![20.0, 20.0, 20.0, 20.0, 100.0, 200.0, 200.0, 200.0, 200.0]
        );

        let quadratic = Basis::fit(&[0.0, 1.0, 3.0]);
        assert_eq!(quadratic.knots, vec![0.0, 0.0, 0.0, 3.0, 3.0, 3.0]);

        let linear = Basis::fit(&[0.0, 1.0]);
        assert_eq!(linear.knots, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn basis_is_a_partition_of_unity() {
        let basis = Basis::fit(&[25.0, 30.0, 33.0, 35.0]);

        for v in [25.0, 26.1, 31.7, 35.0] {
            let sum: f64 = basis.eval(v).iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn evaluates_between_nodes() {
        let spline = namet();

        let test_cases = [((27.0, 112.0), 6.216_416_525_568), ((30.0, 112.0), 7.249_187_532_8)];

        for ((t, g), expected) in test_cases {
            let actual = spline.interpolate(t, g);
            assert!(
                approx::relative_eq!(actual, expected, max_relative = 1e-9),
                "({t}, {g}) produced {actual}, expected {expected}"
            );
        }
    }

    #[test]
    fn passes_through_nodes() {
        let spline = namet();

        assert_eq!(spline.interpolate(33.0, 50.0), 6.499);
        assert_relative_eq!(spline.interpolate(33.0, 50.0 + 1e-9), 6.499, epsilon = 1e-6);
    }

    #[test]
    fn clamps_outside_grid() {
        let spline = namet();

        assert_eq!(spline.interpolate(40.0, 112.0), spline.interpolate(35.0, 112.0));
        assert_eq!(spline.interpolate(27.0, 500.0), spline.interpolate(27.0, 200.0));
    }

    #[test]
    fn linear_grid_is_bilinear() {
        let spline = Spline2D::new(&[0.0, 1.0], &[0.0, 2.0], &[[0.0, 2.0], [1.0, 3.0]]).unwrap();

        assert_relative_eq!(spline.interpolate(0.5, 1.0), 1.5, epsilon = 1e-12);
    }
}
