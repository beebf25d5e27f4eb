//! Condenser performance methods.
//!
//! Each method is a [`Model`](balance_core::Model) that turns a typed input
//! into a serializable output. Callers holding a raw parameter map go through
//! [`calculate`], which checks the required keys for the chosen
//! [`Strategy`], reads the typed input, and wraps the output in a
//! [`CalculationResult`].
//!
//! | Strategy | Model | Pressure from |
//! |---|---|---|
//! | `berman` | [`Berman`] | heat balance over a parameter grid |
//! | `metro_vickers` | [`MetroVickers`] | fixed point over a correction grid |
//! | `vku` | [`Vku`] | air-cooled unit reference grid |
//! | `table_pressure` | [`TablePressure`] | caller-supplied NAMET/NAMED tables |

mod berman;
mod dispatch;
mod error;
mod metro_vickers;
mod params;
mod pressure_override;
mod reference;
mod sweep;
mod table_pressure;
mod vku;

pub use berman::{
    Berman, BermanConfig, BermanInput, BermanOutput, BermanPoint, Bundle, EjectorPoint,
};
pub use dispatch::{CalculationRequest, CalculationResult, calculate, calculate_with};
pub use error::CondenserError;
pub use metro_vickers::{MetroVickers, MetroVickersConfig, MetroVickersInput, MetroVickersOutput};
pub use params::{ParameterError, Parameters, Strategy};
pub use pressure_override::pressure_override;
pub use sweep::{SweepPoint, split_into_parts, sweep};
pub use table_pressure::{TablePressure, TablePressureInput, TablePressureOutput};
pub use vku::{Vku, VkuInput, VkuOutput};
