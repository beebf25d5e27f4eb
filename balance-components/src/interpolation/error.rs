use ninterp::error::{InterpolateError, ValidateError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpError {
    #[error(transparent)]
    Validation(#[from] ValidateError),
    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
    #[error("query {axis} = {value} is not finite")]
    NonFiniteQuery { axis: &'static str, value: f64 },
}

/// Rejects a query coordinate that no policy can place on an axis.
pub(super) fn check_query(axis: &'static str, value: f64) -> Result<(), InterpError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InterpError::NonFiniteQuery { axis, value })
    }
}

/// Errors raised while building a table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("table has no samples")]
    Empty,

    #[error("x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("{axis} axis must be strictly increasing with no duplicates")]
    NotStrictlyIncreasing { axis: &'static str },

    #[error("{axis} axis needs at least {min} points, got {len}")]
    TooFewPoints {
        axis: &'static str,
        len: usize,
        min: usize,
    },

    #[error("{axis} axis contains a non-finite value")]
    NonFinite { axis: &'static str },

    #[error("z has shape {actual:?}, expected {expected:?} (len x, len y)")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("spline collocation matrix along {axis} is singular")]
    Singular { axis: &'static str },

    #[error(transparent)]
    Interp(#[from] InterpError),
}

impl From<ValidateError> for TableError {
    fn from(err: ValidateError) -> Self {
        Self::Interp(err.into())
    }
}
