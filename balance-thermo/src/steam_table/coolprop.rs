use std::sync::Mutex;

use rfluids::{
    io::{FluidInputPair, FluidParam},
    native::AbstractState,
};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::{PropertyError, SteamTableProvider};

/// Saturation pressure from CoolProp's IAPWS-95 water formulation.
///
/// Valid from the triple point (273.16 K) to the critical point (647.096 K).
/// The `AbstractState` is shared behind a mutex, so one instance serves
/// every thread.
pub struct CoolPropWater {
    state: Mutex<AbstractState>,
}

const BACKEND: &str = "HEOS";
const NAME: &str = "Water";

const T_MIN: f64 = 273.16;
const T_MAX: f64 = 647.096;

impl CoolPropWater {
    /// # Errors
    ///
    /// Returns [`PropertyError::Calculation`] if CoolProp cannot create the
    /// water state.
    pub fn new() -> Result<Self, PropertyError> {
        let state = AbstractState::new(BACKEND, NAME).map_err(coolprop_error)?;
        Ok(Self {
            state: Mutex::new(state),
        })
    }
}

impl SteamTableProvider for CoolPropWater {
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

        let mut state = self
            .state
            .lock()
            .map_err(|_| PropertyError::Calculation("CoolProp state mutex poisoned".into()))?;
        state
            .update(FluidInputPair::QT, 0.0, t)
            .map_err(coolprop_error)?;
        let p = state.keyed_output(FluidParam::P).map_err(coolprop_error)?;

        if p.is_finite() {
            Ok(Pressure::new::<pascal>(p))
        } else {
            Err(PropertyError::Calculation(format!(
                "non-finite saturation pressure at {t} K"
            )))
        }
    }
}

impl std::fmt::Debug for CoolPropWater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoolPropWater")
            .field("backend", &BACKEND)
            .finish_non_exhaustive()
    }
}

fn coolprop_error(error: rfluids::native::CoolPropError) -> PropertyError {
    PropertyError::Calculation(error.to_string())
}
