//! Conversions to the technical units used in condenser data sheets.

use uom::si::{f64::Pressure, pressure::pascal};

/// One kilogram-force per square centimetre, in pascals.
pub const PASCALS_PER_KGF_PER_CM2: f64 = 98_066.5;

/// Expresses a pressure in kgf/cm² (technical atmospheres).
#[must_use]
pub fn kgf_per_cm2(pressure: Pressure) -> f64 {
    pressure.get::<pascal>() / PASCALS_PER_KGF_PER_CM2
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::megapascal;

    #[test]
    fn one_megapascal() {
        let p = Pressure::new::<megapascal>(1.0);
        assert_relative_eq!(kgf_per_cm2(p), 10.197_162_129_779, epsilon = 1e-9);
    }
}
