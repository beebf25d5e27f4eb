use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
};

use crate::{PropertyError, SteamTableProvider};

/// IAPWS-IF97 region 4: the saturation-pressure equation.
///
/// Valid from the triple point (273.15 K) to the critical point (647.096 K).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Iapws97;

const T_MIN: f64 = 273.15;
const T_MAX: f64 = 647.096;

const N: [f64; 10] = [
    0.116_705_214_527_67e4,
    -0.724_213_167_032_06e6,
    -0.170_738_469_400_92e2,
    0.120_208_247_024_70e5,
    -0.323_255_503_223_33e7,
    0.149_151_086_135_30e2,
    -0.482_326_573_615_91e4,
    0.405_113_405_420_57e6,
    -0.238_555_575_678_49,
    0.650_175_348_447_98e3,
];

impl SteamTableProvider for Iapws97 {
    fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        let t = temperature.get::<kelvin>();
        if !(T_MIN..=T_MAX).contains(&t) {
            return Err(PropertyError::OutOfRange {
                temperature: t,
                min: T_MIN,
                max: T_MAX,
            });
        }

        let theta = t + N[8] / (t - N[9]);
        let a = theta * theta + N[0] * theta + N[1];
        let b = N[2] * theta * theta + N[3] * theta + N[4];
        let c = N[5] * theta * theta + N[6] * theta + N[7];

        let p = (2.0 * c / (-b + (b * b - 4.0 * a * c).sqrt())).powi(4);
        Ok(Pressure::new::<megapascal>(p))
    }
}
