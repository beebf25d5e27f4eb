/// Configuration for the Newton solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Residual evaluations allowed before giving up.
    pub max_iters: usize,
    /// Converged once `|f(x)| < residual_tol`.
    pub residual_tol: f64,
    /// Slopes smaller than this in magnitude abort the solve.
    pub min_derivative: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 20,
            residual_tol: 1e-9,
            min_derivative: 1e-12,
        }
    }
}

impl Config {
    /// Validates the tolerances and the iteration cap.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite, or if no
    /// iterations are allowed.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iters == 0 {
            return Err("max_iters must be at least one");
        }
        if !self.residual_tol.is_finite() || self.residual_tol < 0.0 {
            return Err("residual_tol must be finite and non-negative");
        }
        if !self.min_derivative.is_finite() || self.min_derivative < 0.0 {
            return Err("min_derivative must be finite and non-negative");
        }
        Ok(())
    }
}
