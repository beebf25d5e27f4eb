use thiserror::Error;

/// Errors that may occur when evaluating saturation properties.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// The temperature lies outside the provider's valid range.
    #[error("temperature {temperature} K is outside the valid range {min}..={max} K")]
    OutOfRange { temperature: f64, min: f64, max: f64 },

    /// The calculation failed numerically.
    ///
    /// For example, an overflow in an exponential fit.
    #[error("calculation error: {0}")]
    Calculation(String),
}
