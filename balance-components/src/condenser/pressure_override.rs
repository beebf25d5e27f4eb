/// Resolves the condenser pressure from a direct measurement or PIF.
///
/// A positive measured `pressure_condenser` is used as is. With no
/// measurement and no cooling-water `temperature`, a positive `pif` is used.
/// Otherwise the pressure must come from one of the calculation methods and
/// `None` is returned.
#[must_use]
pub fn pressure_override(
    pressure_condenser: Option<f64>,
    temperature: Option<f64>,
    pif: Option<f64>,
) -> Option<f64> {
    match (pressure_condenser, temperature, pif) {
        (Some(p), _, _) if p > 0.0 => Some(p),
        (None, None, Some(pif)) if pif > 0.0 => Some(pif),
        _ => None,
    }
}
