//! Berman heat-balance method.
//!
//! The method sweeps a grid of operating points (cooling-water flow, fouling
//! resistance, inlet temperature and steam flow) and reports the saturation
//! temperature and pressure at each. With a built-in bundle present, the two
//! bundles must condense at the same temperature, which is found by moving
//! heat duty between them with a shrinking step.
//!
//! Degenerate geometry never fails a sweep. A zero denominator is read as
//! infinite, so its term contributes nothing.

mod ejector;
mod input;

use std::{convert::Infallible, f64::consts::PI};

use balance_core::Model;
use balance_thermo::{AntoineCorrelation, SteamTableProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uom::si::{
    f64::ThermodynamicTemperature, pressure::megapascal,
    thermodynamic_temperature::degree_celsius,
};

pub use ejector::EjectorPoint;
pub use input::{BermanInput, Bundle};

/// Base heat-transfer coefficient before corrections.
const BASE_COEFFICIENT: f64 = 3500.0;

/// Wall resistance already included in the base coefficient.
const REFERENCE_WALL: f64 = 0.001 / 90.0;

/// Controls for the two-bundle balance loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BermanConfig {
    pub max_iters: usize,
    /// Largest accepted gap between the bundles' condensing temperatures, °C.
    pub tolerance: f64,
    /// First adjustment to the main bundle's water heating, °C.
    pub initial_step: f64,
    /// Factor the step shrinks by each time the gap changes sign.
    pub step_divisor: f64,
}

impl Default for BermanConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 0.01,
            initial_step: 0.1,
            step_divisor: 5.0,
        }
    }
}

impl BermanConfig {
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or the step controls
    /// would not shrink a positive step.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err("tolerance must be finite and non-negative");
        }
        if !self.initial_step.is_finite() || self.initial_step <= 0.0 {
            return Err("initial_step must be finite and positive");
        }
        if !self.step_divisor.is_finite() || self.step_divisor <= 1.0 {
            return Err("step_divisor must be finite and greater than one");
        }
        Ok(())
    }
}

/// One evaluated operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BermanPoint {
    pub mass_flow_cooling_water: f64,
    pub mass_flow_cooling_water_built_in: f64,
    #[serde(rename = "coefficient_R")]
    pub coefficient_r: f64,
    pub temperature_cooling_water_1: f64,
    pub mass_flow_steam: f64,
    #[serde(rename = "pressure_condenser_MPa")]
    pub pressure_condenser: f64,
    pub temperature_saturation: f64,
    pub undercooling_main: f64,
    pub undercooling_built_in: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BermanOutput {
    pub main_results: Vec<BermanPoint>,
    pub ejector_results: Vec<EjectorPoint>,
}

/// The Berman method as a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Berman {
    config: BermanConfig,
    saturation: AntoineCorrelation,
}

impl Berman {
    /// # Errors
    ///
    /// Returns the config's validation message if it is invalid.
    pub fn new(config: BermanConfig) -> Result<Self, &'static str> {
        config.validate()?;
        Ok(Self {
            config,
            saturation: AntoineCorrelation::default(),
        })
    }
}

impl Model for Berman {
    type Input = BermanInput;
    type Output = BermanOutput;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let sweep = Sweep::new(input);
        let mut main_results = Vec::new();

        for (i, &water_main) in input.cooling_water.iter().enumerate() {
            if water_main == 0.0 {
                break;
            }
            let water = [
                water_main,
                input.cooling_water_built_in.get(i).copied().unwrap_or(0.0),
            ];

            for (m, &resistance) in input.fouling_resistance.iter().enumerate() {
                if resistance == 0.0 && m > 0 {
                    break;
                }

                for (j, &inlet_main) in input.inlet_temperature.iter().enumerate() {
                    if inlet_main == 0.0 {
                        break;
                    }
                    let inlet = [
                        inlet_main,
                        input.inlet_temperature_built_in.get(j).copied().unwrap_or(0.0),
                    ];

                    for &steam in input.steam_flow.iter().take_while(|&&d| d != 0.0) {
                        let (saturation, undercooling) =
                            self.balance(&sweep, water, inlet, resistance, steam);

                        main_results.push(BermanPoint {
                            mass_flow_cooling_water: water[0],
                            mass_flow_cooling_water_built_in: water[1],
                            coefficient_r: resistance,
                            temperature_cooling_water_1: inlet_main,
                            mass_flow_steam: steam,
                            pressure_condenser: self.pressure(saturation),
                            temperature_saturation: saturation,
                            undercooling_main: undercooling[0],
                            undercooling_built_in: undercooling[1],
                        });
                    }
                }
            }
        }

        Ok(BermanOutput {
            main_results,
            ejector_results: ejector::suction_pressures(input),
        })
    }
}

impl Berman {
    /// Returns the condensing temperature and each bundle's undercooling.
    fn balance(
        &self,
        sweep: &Sweep<'_>,
        water: [f64; 2],
        inlet: [f64; 2],
        resistance: f64,
        steam: f64,
    ) -> (f64, [f64; 2]) {
        let input = sweep.input;
        let duty = ratio(steam * 1000.0, sweep.total_area);

        let mut coefficient = [0.0; 2];
        let mut heating = [0.0; 2];
        for b in 0..sweep.bundles {
            let speed = sweep.water_speed(b, water[b]);
            coefficient[b] = sweep.coefficient(b, speed, inlet[b], duty);
            heating[b] = if water[b] > 0.0 {
                duty * sweep.area[b] * input.enthalpy / (water[b] * 1000.0)
            } else {
                0.0
            };
        }

        let undercooling = |b: usize, heating: f64| {
            let fouled = 1.0 / (recip(coefficient[b]) + resistance);
            let exponent = if water[b] > 0.0 {
                fouled / water[b] * sweep.area[b] / 1000.0
            } else {
                f64::INFINITY
            };
            let denominator = exponent.exp() - 1.0;
            if denominator == 0.0 {
                0.0
            } else {
                heating / denominator
            }
        };

        if sweep.bundles == 1 {
            let t4 = undercooling(0, heating[0]);
            return (inlet[0] + heating[0] + t4, [t4, 0.0]);
        }

        let mut step = self.config.initial_step;
        let mut previous_gap = 0.0;
        let mut condensing = [0.0; 2];
        let mut t4 = [0.0; 2];
        let mut iters = 0;
        while iters < self.config.max_iters {
            iters += 1;
            for b in 0..2 {
                t4[b] = undercooling(b, heating[b]);
                condensing[b] = inlet[b] + heating[b] + t4[b];
            }

            let gap = condensing[0] - condensing[1];
            if previous_gap * gap < 0.0 {
                step /= self.config.step_divisor;
            }
            previous_gap = gap;
            if gap.abs() <= self.config.tolerance {
                break;
            }

            heating[0] += if gap > 0.0 { -step } else { step };
            if water[1] > 0.0 {
                heating[1] = (steam * input.enthalpy - heating[0] * water[0]) / water[1];
            } else {
                break;
            }
        }
        debug!(iters, gap = previous_gap, "bundle balance finished");

        (condensing[0], t4)
    }

    /// Saturation pressure in MPa, or zero if the fit is undefined.
    fn pressure(&self, celsius: f64) -> f64 {
        self.saturation
            .saturation_pressure(ThermodynamicTemperature::new::<degree_celsius>(celsius))
            .map_or(0.0, |p| p.get::<megapascal>())
    }
}

/// Quantities fixed for a whole sweep.
struct Sweep<'a> {
    input: &'a BermanInput,
    bundles: usize,
    /// Inside diameter, m.
    diameter: f64,
    /// Outer surface of each bundle, m².
    area: [f64; 2],
    total_area: f64,
    nominal_duty: f64,
    wall: f64,
}

impl<'a> Sweep<'a> {
    fn new(input: &'a BermanInput) -> Self {
        let bundles = if input.has_built_in_bundle() { 2 } else { 1 };
        let diameter = input.diameter_inside / 1000.0;
        let wall_thickness = input.wall_thickness / 1000.0;
        let outer = diameter + 2.0 * wall_thickness;

        let area = [
            PI * input.main.length * input.main.tubes * outer,
            if bundles == 2 {
                PI * input.built_in.length * input.built_in.tubes * outer
            } else {
                0.0
            },
        ];
        let total_area = area[0] + area[1];

        let wall = if input.conductivity == 0.0 {
            f64::INFINITY
        } else {
            wall_thickness / input.conductivity - REFERENCE_WALL
        };

        Self {
            input,
            bundles,
            diameter,
            area,
            total_area,
            nominal_duty: if total_area == 0.0 {
                0.0
            } else {
                input.nominal_steam_flow * 1000.0 / total_area
            },
            wall,
        }
    }

    fn bundle(&self, b: usize) -> &Bundle {
        if b == 0 {
            &self.input.main
        } else {
            &self.input.built_in
        }
    }

    fn water_speed(&self, b: usize, water: f64) -> f64 {
        let bundle = self.bundle(b);
        if bundle.tubes > 0.0 && self.diameter > 0.0 {
            water * bundle.passes / (900.0 * PI * bundle.tubes * self.diameter.powi(2))
        } else {
            0.0
        }
    }

    /// Effective heat-transfer coefficient of a clean bundle.
    fn coefficient(&self, b: usize, speed: f64, inlet: f64, duty: f64) -> f64 {
        let passes = self.bundle(b).passes;

        let velocity = if speed > 0.0 && self.diameter > 0.0 {
            let base = 1.1 * speed / (self.diameter * 1000.0).powf(0.25);
            base.powf(0.12 * (1.0 + 0.15 * inlet))
        } else {
            1.0
        };
        let temperature = 1.0 - 0.42 * (35.0 - inlet).powi(2) * 0.001;
        let pass = 1.0 + 0.1 * (passes - 2.0) * (1.0 - inlet / 35.0);

        let load = ratio_or_infinite(duty, (0.9 - 0.012 * inlet) * self.nominal_duty);
        let derating = if load < 1.0 { load * (2.0 - load) } else { 1.0 };

        let k = BASE_COEFFICIENT * velocity * temperature * pass * derating;
        let resistance = recip(k) + self.wall;
        if resistance.is_infinite() {
            0.0
        } else {
            1.0 / resistance
        }
    }
}

fn recip(x: f64) -> f64 {
    if x == 0.0 { f64::INFINITY } else { 1.0 / x }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn ratio_or_infinite(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::INFINITY
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::condenser::Parameters;

    fn single_bundle() -> serde_json::Value {
        json!({
            "length_cooling_tubes_of_the_main_bundle": 7.08,
            "number_cooling_water_passes_of_the_main_bundle": 2,
            "number_cooling_tubes_of_the_main_bundle": 1754,
            "mass_flow_steam_nom": 16.0,
            "thermal_conductivity_cooling_surface_tube_material": 37.0,
            "diameter_inside_of_pipes": 22.0,
            "thickness_pipe_wall": 1.0,
            "enthalpy_flow_path_1": 520.0,
            "BAP": 1,
            "mass_flow_cooling_water_list": [1200],
            "temperature_cooling_water_1_list": [10, 20],
            "mass_flow_steam_list": [16, 8],
            "coefficient_R_list": [0.1e-6],
            "mass_flow_air": 16.5,
        })
    }

    fn two_bundles() -> serde_json::Value {
        let mut value = single_bundle();
        let extra = json!({
            "BAP": 3,
            "length_cooling_tubes_of_the_built_in_bundle": 7.08,
            "number_cooling_water_passes_of_the_built_in_bundle": 2,
            "number_cooling_tubes_of_the_built_in_bundle": 400,
            "mass_flow_cooling_water_built_in_beam_list": [300],
            "temperature_cooling_water_built_in_beam_1_list": [12, 22],
            "mass_flow_air": 0,
        });
        if let (Some(map), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
            map.extend(extra.clone());
        }
        value
    }

    fn run(value: serde_json::Value) -> BermanOutput {
        let params = Parameters::try_from(value).unwrap();
        let input = BermanInput::from_params(&params).unwrap();
        let Ok(output) = Berman::default().call(&input);
        output
    }

    fn check(actual: &[BermanPoint], expected: &[(f64, f64, f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (point, &(p, ts, main, built_in)) in actual.iter().zip(expected) {
            for (name, got, want) in [
                ("pressure", point.pressure_condenser, p),
                ("saturation", point.temperature_saturation, ts),
                ("undercooling main", point.undercooling_main, main),
                ("undercooling built-in", point.undercooling_built_in, built_in),
            ] {
                assert!(
                    approx::relative_eq!(got, want, epsilon = 1e-12, max_relative = 1e-9),
                    "{name}: got {got}, expected {want}"
                );
            }
        }
    }

    #[test]
    fn single_bundle_sweep() {
        let output = run(single_bundle());

        check(
            &output.main_results,
            &[
                (0.002_153_535_388_365_858, 18.709_525_954_628_39, 1.776_192_621_295_055_4, 0.0),
                (0.001_658_671_222_647_130_3, 14.615_137_550_928_544, 1.148_470_884_261_877_8, 0.0),
                (0.003_876_867_633_074_655_6, 28.439_961_718_584_47, 1.506_628_385_251_138, 0.0),
                (0.003_038_254_809_189_713_7, 24.316_440_963_931_05, 0.849_774_297_264_384_2, 0.0),
            ],
        );

        let echo = &output.main_results[1];
        assert_eq!(echo.temperature_cooling_water_1, 10.0);
        assert_eq!(echo.mass_flow_steam, 8.0);
        assert_eq!(echo.mass_flow_cooling_water, 1200.0);
    }

    #[test]
    fn two_bundle_sweep() {
        let output = run(two_bundles());

        check(
            &output.main_results,
            &[
                (0.001_980_766_186_105_746, 17.383_592_227_043_202, 1.505_785_975_108_817_4, 1.157_274_021_776_823_1),
                (0.001_603_760_545_888_461_5, 14.096_781_888_146_438, 1.019_478_762_179_244_7, 0.533_630_124_368_003),
                (0.003_599_375_828_352_97, 27.169_673_936_952_744, 1.279_867_685_018_359_5, 0.995_508_952_999_439_3),
                (0.002_955_698_503_106_826, 23.858_528_575_820_802, 0.759_625_449_853_608_1, 0.384_185_209_723_062_9),
            ],
        );
        assert!(output.ejector_results.is_empty());
    }

    #[test]
    fn ejectors_walk_temperatures_in_reverse() {
        let output = run(single_bundle());

        let expected = [
            (1, 20.0, 3.878_584_546_224_645_5),
            (1, 10.0, 2.702_938_477_348_768_6),
            (2, 20.0, 3.631_084_546_224_646),
            (2, 10.0, 2.455_438_477_348_768_5),
        ];
        assert_eq!(output.ejector_results.len(), expected.len());
        for (point, (n, t, kpa)) in output.ejector_results.iter().zip(expected) {
            assert_eq!(point.number_of_ejectors, n);
            assert_eq!(point.inlet_water_temperature, t);
            assert!(approx::relative_eq!(point.ejector_pressure, kpa, max_relative = 1e-9));
        }
    }

    #[test]
    fn zero_entries_end_their_lists() {
        let mut value = single_bundle();
        value["mass_flow_cooling_water_list"] = json!([1200, 0, 900]);
        value["temperature_cooling_water_1_list"] = json!([10, 0, 20]);
        value["mass_flow_steam_list"] = json!([16, 0, 8]);
        value["coefficient_R_list"] = json!([0, 1e-7, 0, 2e-7]);

        let output = run(value);

        // One water flow, two resistances, one temperature, one steam flow.
        assert_eq!(output.main_results.len(), 2);
        assert_eq!(output.main_results[0].coefficient_r, 0.0);
        assert_eq!(output.main_results[1].coefficient_r, 1e-7);
    }

    #[test]
    fn degenerate_geometry_does_not_fail() {
        let mut value = single_bundle();
        value["number_cooling_tubes_of_the_main_bundle"] = json!(0);
        value["thermal_conductivity_cooling_surface_tube_material"] = json!(0);

        let output = run(value);

        assert_eq!(output.main_results.len(), 4);
        for point in &output.main_results {
            assert!(point.temperature_saturation.is_finite());
            assert_eq!(point.undercooling_main, 0.0);
        }
    }

    #[test]
    fn serializes_with_unit_suffixes() {
        let output = run(single_bundle());
        let value = serde_json::to_value(&output).unwrap();

        assert!(value["main_results"][0]["pressure_condenser_MPa"].is_f64());
        assert!(value["main_results"][0]["coefficient_R"].is_f64());
        assert!(value["ejector_results"][0]["ejector_pressure_kPa"].is_f64());
    }

    #[test]
    fn config_validation() {
        assert!(BermanConfig::default().validate().is_ok());
        assert!(
            Berman::new(BermanConfig {
                step_divisor: 1.0,
                ..BermanConfig::default()
            })
            .is_err()
        );
        assert!(
            BermanConfig {
                tolerance: f64::NAN,
                ..BermanConfig::default()
            }
            .validate()
            .is_err()
        );
    }
}
