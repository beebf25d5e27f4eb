/// Stopping rules for [`solve`](super::solve).
///
/// A step converges when the bracket is no wider than
/// `x_abs_tol + x_rel_tol * |mid|` or when `|f(mid)| <= residual_tol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Midpoint evaluations allowed. Zero returns the better endpoint.
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-7,
            x_rel_tol: 0.0,
            residual_tol: 0.0,
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns the name of the first tolerance that is negative or not finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        let tolerances = [
            ("x_abs_tol must be finite and non-negative", self.x_abs_tol),
            ("x_rel_tol must be finite and non-negative", self.x_rel_tol),
            ("residual_tol must be finite and non-negative", self.residual_tol),
        ];
        match tolerances
            .into_iter()
            .find(|(_, tol)| !tol.is_finite() || *tol < 0.0)
        {
            Some((reason, _)) => Err(reason),
            None => Ok(()),
        }
    }

    pub(super) fn is_narrow(&self, width: f64, mid: f64) -> bool {
        width <= self.x_abs_tol + self.x_rel_tol * mid.abs()
    }
}
