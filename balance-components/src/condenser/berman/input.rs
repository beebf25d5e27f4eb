use balance_core::constraint::{Constrained, NonNegative};

use crate::condenser::{ParameterError, Parameters};

/// Geometry of one tube bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bundle {
    /// Active tube length, m.
    pub length: f64,
    pub passes: f64,
    pub tubes: f64,
}

/// A Berman sweep: condenser geometry plus the operating points to visit.
///
/// The sweep lists are read as the caller gave them. A zero entry ends its
/// list early, except that a zero fouling resistance is allowed in first
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct BermanInput {
    /// Inside tube diameter, mm.
    pub diameter_inside: f64,
    /// Tube wall thickness, mm.
    pub wall_thickness: f64,
    pub conductivity: f64,
    pub enthalpy: f64,
    pub nominal_steam_flow: f64,
    pub main: Bundle,
    pub built_in: Bundle,
    /// Layout code; values above 2 enable the built-in bundle.
    pub layout: f64,
    pub cooling_water: Vec<f64>,
    pub cooling_water_built_in: Vec<f64>,
    pub inlet_temperature: Vec<f64>,
    pub inlet_temperature_built_in: Vec<f64>,
    pub steam_flow: Vec<f64>,
    pub fouling_resistance: Vec<f64>,
    pub air_flow: Constrained<f64, NonNegative>,
}

impl BermanInput {
    /// Reads a sweep from calculation parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing, a value has the wrong
    /// type, or the air flow is negative.
    pub fn from_params(params: &Parameters) -> Result<Self, ParameterError> {
        let air_flow = params.number_or("mass_flow_air", 0.0)?;

        Ok(Self {
            diameter_inside: params.number("diameter_inside_of_pipes")?,
            wall_thickness: params.number("thickness_pipe_wall")?,
            conductivity: params.number("thermal_conductivity_cooling_surface_tube_material")?,
            enthalpy: params.number("enthalpy_flow_path_1")?,
            nominal_steam_flow: params.number("mass_flow_steam_nom")?,
            main: Bundle {
                length: params.number("length_cooling_tubes_of_the_main_bundle")?,
                passes: params.number("number_cooling_water_passes_of_the_main_bundle")?,
                tubes: params.number("number_cooling_tubes_of_the_main_bundle")?,
            },
            built_in: Bundle {
                length: params.number_or("length_cooling_tubes_of_the_built_in_bundle", 0.0)?,
                passes: params
                    .number_or("number_cooling_water_passes_of_the_built_in_bundle", 0.0)?,
                tubes: params.number_or("number_cooling_tubes_of_the_built_in_bundle", 0.0)?,
            },
            layout: params.number_or("BAP", 1.0)?,
            cooling_water: params.numbers("mass_flow_cooling_water_list")?,
            cooling_water_built_in: params
                .numbers_or_empty("mass_flow_cooling_water_built_in_beam_list")?,
            inlet_temperature: params.numbers("temperature_cooling_water_1_list")?,
            inlet_temperature_built_in: params
                .numbers_or_empty("temperature_cooling_water_built_in_beam_1_list")?,
            steam_flow: params.numbers("mass_flow_steam_list")?,
            fouling_resistance: params.numbers("coefficient_R_list")?,
            air_flow: NonNegative::new(air_flow).map_err(ParameterError::invalid("mass_flow_air"))?,
        })
    }

    /// Whether the built-in bundle takes part in the balance.
    #[must_use]
    pub fn has_built_in_bundle(&self) -> bool {
        self.layout > 2.0
    }
}
