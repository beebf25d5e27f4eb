use balance_thermo::{AntoineCorrelation, SteamTableProvider};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::ThermodynamicTemperature, pressure::megapascal, thermodynamic_temperature::kelvin,
};

use super::BermanInput;

/// Suction pressure with a given number of ejectors running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EjectorPoint {
    pub number_of_ejectors: u8,
    pub inlet_water_temperature: f64,
    #[serde(rename = "ejector_pressure_kPa")]
    pub ejector_pressure: f64,
}

/// The saturation fit shifted for the ejector suction chamber.
const SUCTION: AntoineCorrelation = AntoineCorrelation {
    a: 82.865_86,
    b: 1.028e-2,
    c: 7_821.541,
    d: 11.487_76,
};

/// Suction pressures for one and then two ejectors.
///
/// Inlet temperatures are visited from the last non-zero entry back to the
/// first. Nothing is produced without air ingress.
pub(super) fn suction_pressures(input: &BermanInput) -> Vec<EjectorPoint> {
    let air = input.air_flow.into_inner();
    if air <= 0.0 {
        return Vec::new();
    }

    let last = input
        .inlet_temperature
        .iter()
        .rposition(|&t| t != 0.0)
        .map_or(0, |i| i + 1);
    let temperatures = &input.inlet_temperature[..last];

    let mut points = Vec::with_capacity(2 * temperatures.len());
    for ejectors in 1..=2_u8 {
        for &t in temperatures.iter().rev() {
            // Suction temperature runs one kelvin above the inlet water.
            let suction = ThermodynamicTemperature::new::<kelvin>(t + 274.15);
            let Ok(p) = SUCTION.saturation_pressure(suction) else {
                continue;
            };
            let p = p.get::<megapascal>();

            points.push(EjectorPoint {
                number_of_ejectors: ejectors,
                inlet_water_temperature: t,
                ejector_pressure: (0.009 + 0.0003 * air / f64::from(ejectors) + p * 10.0) * 100.0,
            });
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suction_fit_matches_reference_points() {
        // (inlet °C, one ejector kPa, two ejectors kPa) at 16.5 kg/h of air.
        let test_cases = [
            (35.0, 7.340_916_416_508_284, 7.093_416_416_508_283),
            (20.0, 3.878_584_546_224_645_5, 3.631_084_546_224_646),
            (10.0, 2.702_938_477_348_768_6, 2.455_438_477_348_768_5),
            (4.0, 2.262_771_208_021_671_8, 2.015_271_208_021_671_7),
        ];

        for (t, one, two) in test_cases {
            let suction = ThermodynamicTemperature::new::<kelvin>(t + 274.15);
            let p = SUCTION
                .saturation_pressure(suction)
                .unwrap()
                .get::<megapascal>();

            for (ejectors, expected) in [(1.0, one), (2.0, two)] {
                let actual = (0.009 + 0.0003 * 16.5 / ejectors + p * 10.0) * 100.0;
                assert!(
                    approx::relative_eq!(actual, expected, max_relative = 1e-9),
                    "{t} °C with {ejectors} ejectors: got {actual}, expected {expected}"
                );
            }
        }
    }
}
