use balance_thermo::PropertyError;
use thiserror::Error;

use crate::interpolation::{InterpError, TableError};

use super::ParameterError;

/// Failures while running a condenser calculation.
#[derive(Debug, Error)]
pub enum CondenserError {
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error("invalid table: {0}")]
    Table(#[from] TableError),

    #[error("table lookup failed: {0}")]
    Interp(#[from] InterpError),

    #[error("saturation pressure unavailable: {0}")]
    Property(#[from] PropertyError),

    #[error("invalid configuration: {0}")]
    Config(&'static str),

    #[error("reference grid failed to load: {0}")]
    ReferenceGrid(String),
}
