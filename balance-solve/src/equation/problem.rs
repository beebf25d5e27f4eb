/// Defines a system of `N` equations to be solved against a model.
///
/// The solver proposes values `x`, the problem maps them to a model input,
/// and after the model is called the problem computes one residual per
/// equation. A root is found when every residual is zero.
pub trait EquationProblem<const N: usize> {
    type Input;
    type Output;
    type InputError: std::error::Error + Send + Sync + 'static;
    type ResidualError: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables to a model input.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` cannot be turned into a valid input.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::InputError>;

    /// Computes residuals from a model input and its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the residuals cannot be computed.
    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::ResidualError>;
}

/// A scalar problem that can report the slope of its residual.
///
/// Required by [`newton`](super::newton), which steps along `-f / f'`.
pub trait ResidualDerivative: EquationProblem<1> {
    /// Returns `d(residual)/dx` at the evaluated point.
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<f64, Self::ResidualError>;
}
