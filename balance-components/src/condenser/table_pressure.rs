//! Pressure read from the manufacturer's performance tables.
//!
//! Two tables describe the condenser: NAMET gives pressure by cooling-water
//! temperature and steam flow, and NAMED gives pressure by temperature
//! alone. The reported pressure is the larger of the two readings.

use balance_core::Model;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::interpolation::{Spline2D, Table1D};

use super::{CondenserError, ParameterError, Parameters, params::as_numbers};

/// Performance tables plus the point to read them at.
#[derive(Debug)]
pub struct TablePressureInput {
    pub namet: Spline2D,
    pub named: Table1D,
    /// Cooling-water inlet temperature, °C.
    pub temperature: f64,
    /// Steam flow, t/h.
    pub steam_flow: f64,
}

impl TablePressureInput {
    /// Builds the tables from `NAMET` and `NAMED`.
    ///
    /// Each table may be given bare or wrapped as `{"data": ...}`. NAMET is
    /// `[temperatures, flows, rows]` with one row per temperature, and NAMED
    /// is `[temperatures, pressures]`.
    ///
    /// # Errors
    ///
    /// Returns an error if a key is missing, a table is malformed, or a table
    /// fails validation.
    pub fn from_params(params: &Parameters) -> Result<Self, CondenserError> {
        let namet = table_parts(params, "NAMET", 3)?;
        let rows = namet[2]
            .as_array()
            .ok_or_else(|| malformed("NAMET", "pressures must be a list of rows"))?
            .iter()
            .map(|row| as_numbers("NAMET", row))
            .collect::<Result<Vec<_>, _>>()?;
        let namet = Spline2D::new(
            &as_numbers("NAMET", &namet[0])?,
            &as_numbers("NAMET", &namet[1])?,
            &rows,
        )?;

        let named = table_parts(params, "NAMED", 2)?;
        let named = Table1D::new(
            &as_numbers("NAMED", &named[0])?,
            &as_numbers("NAMED", &named[1])?,
        )?;

        Ok(Self {
            namet,
            named,
            temperature: params.number("temperature_cooling_water_1")?,
            steam_flow: params.number("mass_flow_flow_path_1")?,
        })
    }
}

fn table_parts<'p>(
    params: &'p Parameters,
    key: &str,
    len: usize,
) -> Result<&'p [Value], ParameterError> {
    let value = params
        .get(key)
        .ok_or_else(|| ParameterError::MissingKey { key: key.into() })?;
    let data = value.get("data").unwrap_or(value);

    match data.as_array() {
        Some(parts) if parts.len() == len => Ok(parts),
        _ => Err(malformed(key, &format!("expected a list of {len} parts"))),
    }
}

fn malformed(key: &str, reason: &str) -> ParameterError {
    ParameterError::Malformed {
        key: key.into(),
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TablePressureOutput {
    #[serde(rename = "pressure_flow_path_1_NAMET")]
    pub pressure_namet: f64,
    #[serde(rename = "pressure_flow_path_1_NAMED")]
    pub pressure_named: f64,
    pub pressure_flow_path_1: f64,
}

/// Reads both tables and keeps the higher pressure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePressure;

impl Model for TablePressure {
    type Input = TablePressureInput;
    type Output = TablePressureOutput;
    type Error = CondenserError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let namet = input.namet.interpolate(input.temperature, input.steam_flow);
        let named = input.named.interpolate(input.temperature)?;

        Ok(TablePressureOutput {
            pressure_namet: namet,
            pressure_named: named,
            pressure_flow_path_1: if namet >= named { namet } else { named },
        })
    }
}
