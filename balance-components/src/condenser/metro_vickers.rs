//! Metro-Vickers heat-transfer method.
//!
//! A base coefficient is read from the reference grid by cooling-water speed
//! and mean water temperature. It is then corrected for the air-cooler
//! share of the surface, wall conduction and fouling. The mean water
//! temperature depends on the latent heat at the saturation temperature
//! being solved for, so the chain is repeated as a fixed-point iteration.

use std::f64::consts::PI;

use balance_core::{
    Model,
    constraint::{Constrained, StrictlyPositive, UnitIntervalLowerOpen},
};
use balance_thermo::{Iapws97, SteamTableProvider, units::kgf_per_cm2};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

use super::{CondenserError, ParameterError, Parameters, reference};

/// Controls for the saturation-temperature iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetroVickersConfig {
    pub max_iters: usize,
    /// Change in saturation temperature that counts as converged, °C.
    pub tolerance: f64,
}

impl Default for MetroVickersConfig {
    fn default() -> Self {
        Self {
            max_iters: 20,
            tolerance: 1e-9,
        }
    }
}

impl MetroVickersConfig {
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or the tolerance is negative.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iters == 0 {
            return Err("max_iters must be at least one");
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err("tolerance must be finite and non-negative");
        }
        Ok(())
    }
}

/// Condenser geometry and operating point.
///
/// Diameters and wall thickness are in mm and the tube length in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetroVickersInput {
    pub diameter_inside: f64,
    pub wall_thickness: f64,
    pub length: f64,
    pub passes: f64,
    pub tubes_main: f64,
    pub tubes_built_in: f64,
    /// Tubes in the air cooler; 15% of all tubes when not given.
    pub tubes_air_cooler: Option<f64>,
    /// Cooling-water flow, t/h.
    pub cooling_water: Constrained<f64, StrictlyPositive>,
    /// Cooling-water inlet temperature, °C.
    pub inlet_temperature: f64,
    /// Steam flow, t/h.
    pub steam_flow: f64,
    pub dryness: Constrained<f64, UnitIntervalLowerOpen>,
    pub conductivity: f64,
    /// Fouling coefficient `b`; one is clean.
    pub fouling: Constrained<f64, UnitIntervalLowerOpen>,
    /// Cleanliness factor `B` applied to the grid coefficient.
    pub cleanliness: Constrained<f64, StrictlyPositive>,
}

impl MetroVickersInput {
    pub const DEFAULT_CLEANLINESS: f64 = 0.974;

    /// # Errors
    ///
    /// Returns an error if a required key is missing or a value is out of
    /// range. The cooling-water flow and the combined tube count of both
    /// bundles must be positive.
    pub fn from_params(params: &Parameters) -> Result<Self, ParameterError> {
        let dryness = params.number("degree_dryness_flow_path_1")?;
        let cooling_water = params.number("mass_flow_cooling_water")?;
        let tubes_main = params.number("number_cooling_tubes_of_the_main_bundle")?;
        let tubes_built_in = params.number("number_cooling_tubes_of_the_built_in_bundle")?;
        StrictlyPositive::new(tubes_main + tubes_built_in)
            .map_err(ParameterError::invalid("number_cooling_tubes_of_the_main_bundle"))?;
        let fouling = params.number_or("coefficient_b", 1.0)?;
        let cleanliness = params.number_or("coefficient_B", Self::DEFAULT_CLEANLINESS)?;

        Ok(Self {
            diameter_inside: params.number("diameter_inside_of_pipes")?,
            wall_thickness: params.number("thickness_pipe_wall")?,
            length: params.number("length_cooling_tubes_of_the_main_bundle")?,
            passes: params.number("number_cooling_water_passes_of_the_main_bundle")?,
            tubes_main,
            tubes_built_in,
            tubes_air_cooler: params.optional_number("number_air_cooler_total_pipes")?,
            cooling_water: StrictlyPositive::new(cooling_water)
                .map_err(ParameterError::invalid("mass_flow_cooling_water"))?,
            inlet_temperature: params.number("temperature_cooling_water_1")?,
            steam_flow: params.number("mass_flow_flow_path_1")?,
            dryness: UnitIntervalLowerOpen::new(dryness)
                .map_err(ParameterError::invalid("degree_dryness_flow_path_1"))?,
            conductivity: params.number("thermal_conductivity_cooling_surface_tube_material")?,
            fouling: UnitIntervalLowerOpen::new(fouling)
                .map_err(ParameterError::invalid("coefficient_b"))?,
            cleanliness: StrictlyPositive::new(cleanliness)
                .map_err(ParameterError::invalid("coefficient_B"))?,
        })
    }
}

/// Every quantity in the calculation chain, at the final iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetroVickersOutput {
    pub diameter_outside_of_pipes: f64,
    pub area_tube_bundle_surface_total: f64,
    pub area_surface_of_the_air_cooler_tube_bundle: f64,
    #[serde(rename = "coefficient_Kf")]
    pub coefficient_kf: f64,
    #[serde(rename = "coefficient_R1")]
    pub coefficient_r1: f64,
    pub speed_cooling_water: f64,
    pub heat_of_vaporization: f64,
    pub temperature_cooling_water_2: f64,
    pub temperature_cooling_water_average_heating: f64,
    #[serde(rename = "coefficient_K_temp")]
    pub coefficient_k_temp: f64,
    #[serde(rename = "coefficient_K")]
    pub coefficient_k: f64,
    #[serde(rename = "coefficient_R")]
    pub coefficient_r: f64,
    #[serde(rename = "coefficient_Kzag")]
    pub coefficient_kzag: f64,
    pub temperature_relative_underheating: f64,
    pub temperature_saturation_steam: f64,
    /// Condenser pressure, kgf/cm².
    pub pressure_flow_path_1: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// The Metro-Vickers method, generic over the saturation-pressure source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetroVickers<P = Iapws97> {
    config: MetroVickersConfig,
    provider: P,
}

impl Default for MetroVickers<Iapws97> {
    fn default() -> Self {
        Self {
            config: MetroVickersConfig::default(),
            provider: Iapws97,
        }
    }
}

impl<P: SteamTableProvider> MetroVickers<P> {
    /// # Errors
    ///
    /// Returns the config's validation message if it is invalid.
    pub fn new(config: MetroVickersConfig, provider: P) -> Result<Self, &'static str> {
        config.validate()?;
        Ok(Self { config, provider })
    }
}

impl<P: SteamTableProvider> Model for MetroVickers<P> {
    type Input = MetroVickersInput;
    type Output = MetroVickersOutput;
    type Error = CondenserError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let grid = reference::metro_vickers_grid()?;

        let d_in = input.diameter_inside;
        let s = input.wall_thickness;
        let t1 = input.inlet_temperature;
        let m = input.cooling_water.into_inner();
        let dryness = input.dryness.into_inner();
        let b = input.fouling.into_inner();
        let cleanliness = input.cleanliness.into_inner();

        let d_out = d_in + 2.0 * s;
        let air_tubes = input
            .tubes_air_cooler
            .unwrap_or((input.tubes_main + input.tubes_built_in) * 0.15);
        let area_total = PI * input.length * input.tubes_main * d_out * 1e-6;
        let area_air = PI * input.length * air_tubes * d_out * 1e-6;
        let kf = if area_total > 0.0 {
            1.0 - 0.225 * (area_air / area_total)
        } else {
            1.0
        };
        let r1 = (2.0 * s / 1000.0 * d_out / 1000.0)
            / ((d_out / 1000.0 + d_in / 1000.0) * input.conductivity);
        let speed = (m * input.passes)
            / (900.0 * PI * (input.tubes_main + input.tubes_built_in) * (d_in / 1000.0).powi(2));

        let mut ts = t1;
        let mut state = None;
        let mut converged = false;
        let mut iterations = 0;
        while iterations < self.config.max_iters {
            iterations += 1;

            let r = (30.0 - ts) * 0.582 + 580.4;
            let t2 = t1 + input.steam_flow * r * dryness / m;
            let t_avg = (t1 + t2) / 2.0;
            let k_temp = grid.interpolate(speed, t_avg)?;

            let clean_resistance =
                1.0 / (k_temp * 0.85 * cleanliness * kf) - 0.087 / 10_000.0 + r1;
            let k_clean = 1.0 / clean_resistance;
            let fouling = (1.0 / k_clean) * (1.0 / b - 1.0);
            let k_fouled = 1.0 / (clean_resistance + fouling);
            let relative = 1.0 / ((k_fouled * area_total / (m * 1000.0)).exp() - 1.0);

            let next = t2 + relative * (t2 - t1);
            let change = (next - ts).abs();
            ts = next;
            trace!(iterations, ts, change, "saturation temperature step");

            state = Some((r, t2, t_avg, k_temp, k_clean, fouling, k_fouled, relative));
            if change < self.config.tolerance {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(iterations, ts, "saturation temperature did not converge");
        }

        let (r, t2, t_avg, k_temp, k_clean, fouling, k_fouled, relative) =
            state.ok_or(CondenserError::Config("max_iters must be at least one"))?;

        let pressure = self
            .provider
            .saturation_pressure(ThermodynamicTemperature::new::<degree_celsius>(ts))?;

        Ok(MetroVickersOutput {
            diameter_outside_of_pipes: d_out,
            area_tube_bundle_surface_total: area_total,
            area_surface_of_the_air_cooler_tube_bundle: area_air,
            coefficient_kf: kf,
            coefficient_r1: r1,
            speed_cooling_water: speed,
            heat_of_vaporization: r,
            temperature_cooling_water_2: t2,
            temperature_cooling_water_average_heating: t_avg,
            coefficient_k_temp: k_temp,
            coefficient_k: k_clean,
            coefficient_r: fouling,
            coefficient_kzag: k_fouled,
            temperature_relative_underheating: relative,
            temperature_saturation_steam: ts,
            pressure_flow_path_1: kgf_per_cm2(pressure),
            iterations,
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use serde_json::json;

    fn reference_params() -> Parameters {
        Parameters::try_from(json!({
            "diameter_inside_of_pipes": 22.4,
            "thickness_pipe_wall": 0.8,
            "length_cooling_tubes_of_the_main_bundle": 13910,
            "number_cooling_water_passes_of_the_main_bundle": 2,
            "number_cooling_tubes_of_the_main_bundle": 20904,
            "number_cooling_tubes_of_the_built_in_bundle": 0,
            "mass_flow_cooling_water": 45000.0,
            "temperature_cooling_water_1": 45.0,
            "mass_flow_flow_path_1": 200.0,
            "degree_dryness_flow_path_1": 0.95,
            "thermal_conductivity_cooling_surface_tube_material": 16.2,
        }))
        .unwrap()
    }

    fn reference_case() -> MetroVickersInput {
        MetroVickersInput::from_params(&reference_params()).unwrap()
    }

    #[test]
    fn reference_case_converges() {
        let output = MetroVickers::<Iapws97>::default().call(&reference_case()).unwrap();

        assert!(output.converged);
        assert_eq!(output.iterations, 5);
        assert_relative_eq!(output.coefficient_kf, 0.96625, epsilon = 1e-12);
        assert_relative_eq!(
            output.speed_cooling_water,
            3.034_762_395_111_941,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            output.temperature_saturation_steam,
            48.175_707_221_428_304,
            max_relative = 1e-10
        );
        assert_relative_eq!(
            output.pressure_flow_path_1,
            0.114_979_292_079_270_57,
            max_relative = 1e-8
        );
        assert_relative_eq!(output.pressure_flow_path_1, 0.114_982, epsilon = 1e-5);
    }

    #[test]
    fn single_pass_with_clean_tubes() {
        let mut input = reference_case();
        input.cleanliness = StrictlyPositive::new(1.0).unwrap();
        let model = MetroVickers::new(
            MetroVickersConfig {
                max_iters: 1,
                ..MetroVickersConfig::default()
            },
            Iapws97,
        )
        .unwrap();

        let output = model.call(&input).unwrap();

        assert!(!output.converged);
        assert_eq!(output.iterations, 1);
        assert_relative_eq!(
            output.pressure_flow_path_1,
            0.114_849_203_302_898_19,
            max_relative = 1e-8
        );
    }

    #[test]
    fn fouling_raises_pressure() {
        let clean = MetroVickers::<Iapws97>::default().call(&reference_case()).unwrap();

        let mut input = reference_case();
        input.fouling = UnitIntervalLowerOpen::new(0.9).unwrap();
        let fouled = MetroVickers::<Iapws97>::default().call(&input).unwrap();

        assert!(fouled.pressure_flow_path_1 > clean.pressure_flow_path_1);
        assert!(fouled.coefficient_r > 0.0);
        assert_relative_eq!(
            fouled.pressure_flow_path_1,
            0.115_919_344_580_698_34,
            max_relative = 1e-8
        );
    }

    #[test]
    fn provider_is_pluggable() {
        let model = MetroVickers::new(
            MetroVickersConfig::default(),
            balance_thermo::AntoineCorrelation::default(),
        )
        .unwrap();

        let output = model.call(&reference_case()).unwrap();

        assert_relative_eq!(output.pressure_flow_path_1, 0.114_98, max_relative = 0.02);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let mut params = reference_params();
        params.insert("coefficient_b", 0.0);

        assert!(matches!(
            MetroVickersInput::from_params(&params),
            Err(ParameterError::Invalid { key, .. }) if key == "coefficient_b"
        ));
    }

    #[test]
    fn zero_cooling_water_is_rejected() {
        let mut params = reference_params();
        params.insert("mass_flow_cooling_water", 0.0);

        assert!(matches!(
            MetroVickersInput::from_params(&params),
            Err(ParameterError::Invalid { key, .. }) if key == "mass_flow_cooling_water"
        ));
    }

    #[test]
    fn bundles_without_tubes_are_rejected() {
        let mut params = reference_params();
        params.insert("number_cooling_tubes_of_the_main_bundle", 0.0);

        assert!(matches!(
            MetroVickersInput::from_params(&params),
            Err(ParameterError::Invalid { key, .. })
                if key == "number_cooling_tubes_of_the_main_bundle"
        ));

        params.insert("number_cooling_tubes_of_the_built_in_bundle", 120.0);
        assert!(MetroVickersInput::from_params(&params).is_ok());
    }

    #[test]
    fn infinite_water_speed_is_an_error() {
        let mut input = reference_case();
        input.tubes_main = 0.0;

        let err = MetroVickers::<Iapws97>::default().call(&input).unwrap_err();

        assert!(matches!(err, CondenserError::Interp(_)), "{err:?}");
    }

    #[test]
    fn config_validation() {
        assert!(MetroVickersConfig::default().validate().is_ok());
        assert!(
            MetroVickers::new(
                MetroVickersConfig {
                    max_iters: 0,
                    ..MetroVickersConfig::default()
                },
                Iapws97
            )
            .is_err()
        );
    }
}
