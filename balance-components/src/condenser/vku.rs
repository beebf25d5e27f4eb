//! Air-cooled condensing unit (VKU) method.
//!
//! The condenser pressure is read directly from a reference grid keyed by
//! the reduced steam flow and the ambient air temperature.

use balance_core::{
    Model,
    constraint::{Constrained, StrictlyPositive, UnitIntervalLowerOpen},
};
use serde::{Deserialize, Serialize};

use super::{CondenserError, ParameterError, Parameters, reference};

/// A unit's design point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vku {
    nominal_flow: Constrained<f64, StrictlyPositive>,
    nominal_dryness: Constrained<f64, UnitIntervalLowerOpen>,
}

impl Vku {
    /// Creates a unit from its nominal steam flow and dryness.
    ///
    /// # Errors
    ///
    /// Returns an error if the flow is not positive or the dryness is outside
    /// `(0, 1]`.
    pub fn new(nominal_flow: f64, nominal_dryness: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            nominal_flow: StrictlyPositive::new(nominal_flow)
                .map_err(ParameterError::invalid("mass_flow_steam_nom"))?,
            nominal_dryness: UnitIntervalLowerOpen::new(nominal_dryness)
                .map_err(ParameterError::invalid("degree_dryness_steam_nom"))?,
        })
    }

    /// Reads the design point from calculation parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if either nominal value is missing or out of range.
    pub fn from_params(params: &Parameters) -> Result<Self, ParameterError> {
        Self::new(
            params.number("mass_flow_steam_nom")?,
            params.number("degree_dryness_steam_nom")?,
        )
    }

    /// Operating flow as a percentage of the design flow.
    #[must_use]
    pub fn reduced_flow(&self, flow: f64, dryness: f64) -> f64 {
        (flow / self.nominal_flow.into_inner())
            * (dryness / self.nominal_dryness.into_inner())
            * 100.0
    }
}

/// An operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VkuInput {
    /// Steam flow, t/h.
    pub steam_flow: f64,
    pub dryness: f64,
    /// Ambient air temperature, °C.
    pub air_temperature: f64,
}

impl VkuInput {
    pub const DEFAULT_AIR_TEMPERATURE: f64 = 20.0;

    /// # Errors
    ///
    /// Returns an error if the flow or dryness is missing.
    pub fn from_params(params: &Parameters) -> Result<Self, ParameterError> {
        Ok(Self {
            steam_flow: params.number("mass_flow_flow_path_1")?,
            dryness: params.number("degree_dryness_flow_path_1")?,
            air_temperature: params.number_or("temperature_air", Self::DEFAULT_AIR_TEMPERATURE)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VkuOutput {
    /// Condenser pressure, kgf/cm².
    pub pressure_flow_path_1: f64,
    /// Reduced steam flow, %.
    #[serde(rename = "mass_flow_reduced_steam_condencer")]
    pub mass_flow_reduced_steam_condenser: f64,
}

impl Model for Vku {
    type Input = VkuInput;
    type Output = VkuOutput;
    type Error = CondenserError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let reduced = self.reduced_flow(input.steam_flow, input.dryness);
        let pressure = reference::vku_grid()?.interpolate(reduced, input.air_temperature)?;

        Ok(VkuOutput {
            pressure_flow_path_1: pressure,
            mass_flow_reduced_steam_condenser: reduced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn unit() -> Vku {
        Vku::new(1250.0, 0.92).unwrap()
    }

    #[test]
    fn nominal_point() {
        let output = unit()
            .call(&VkuInput {
                steam_flow: 1250.0,
                dryness: 0.92,
                air_temperature: 30.0,
            })
            .unwrap();

        assert_relative_eq!(output.mass_flow_reduced_steam_condenser, 100.0, epsilon = 1e-5);
        assert_relative_eq!(output.pressure_flow_path_1, 0.097_280_927, epsilon = 1e-7);
    }

    #[test]
    fn air_temperature_defaults() {
        let params = Parameters::try_from(serde_json::json!({
            "mass_flow_flow_path_1": 1250.0,
            "degree_dryness_flow_path_1": 0.92,
        }))
        .unwrap();

        let input = VkuInput::from_params(&params).unwrap();
        let output = unit().call(&input).unwrap();

        assert_eq!(input.air_temperature, 20.0);
        assert_relative_eq!(output.pressure_flow_path_1, 0.060_673_115, epsilon = 1e-7);
    }

    #[test]
    fn interpolates_between_cells() {
        let output = unit()
            .call(&VkuInput {
                steam_flow: 1187.5,
                dryness: 0.92,
                air_temperature: 27.5,
            })
            .unwrap();

        assert_relative_eq!(output.mass_flow_reduced_steam_condenser, 95.0, epsilon = 1e-9);
        assert_relative_eq!(output.pressure_flow_path_1, 0.083_417_48, epsilon = 1e-8);
    }

    #[test]
    fn extrapolates_past_the_grid() {
        let output = unit()
            .call(&VkuInput {
                steam_flow: 1625.0,
                dryness: 0.92,
                air_temperature: 30.0,
            })
            .unwrap();

        assert!(output.pressure_flow_path_1 > 0.116_064_918);
    }

    #[test]
    fn invalid_design_point() {
        assert!(matches!(
            Vku::new(0.0, 0.92),
            Err(ParameterError::Invalid { key, .. }) if key == "mass_flow_steam_nom"
        ));
        assert!(matches!(
            Vku::new(1250.0, 1.2),
            Err(ParameterError::Invalid { key, .. }) if key == "degree_dryness_steam_nom"
        ));
    }
}
