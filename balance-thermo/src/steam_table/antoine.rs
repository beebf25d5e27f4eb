use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
};

use crate::{PropertyError, SteamTableProvider};

/// Empirical saturation curve `ln p = a + b·T - c/T - d·ln T`.
///
/// With the default coefficients, `T` is in kelvin and `p` in MPa. This is
/// the fit the Berman method uses to turn its converged condensation
/// temperature into a condenser pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntoineCorrelation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for AntoineCorrelation {
    fn default() -> Self {
        Self {
            a: 82.865_68,
            b: 1.028_003 / 100.0,
            c: 7_821.541,
            d: 11.487_76,
        }
    }
}

impl SteamTableProvider for AntoineCorrelation {
    fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        let t = temperature.get::<kelvin>();
        if t.is_nan() || t <= 0.0 {
            return Err(PropertyError::OutOfRange {
                temperature: t,
                min: 0.0,
                max: f64::INFINITY,
            });
        }

        let p = (self.a + self.b * t - self.c / t - self.d * t.ln()).exp();
        if !p.is_finite() {
            return Err(PropertyError::Calculation(format!(
                "saturation pressure overflowed at {t} K"
            )));
        }

        Ok(Pressure::new::<megapascal>(p))
    }
}
