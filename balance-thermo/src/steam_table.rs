mod antoine;
#[cfg(feature = "coolprop")]
mod coolprop;
mod iapws97;

use uom::si::f64::{Pressure, ThermodynamicTemperature};

use crate::PropertyError;

pub use antoine::AntoineCorrelation;
#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropWater;
pub use iapws97::Iapws97;

/// Maps a saturation temperature to the matching saturation pressure.
///
/// Implementations must be pure: the same temperature always yields the same
/// pressure, and providers can be shared freely across threads.
pub trait SteamTableProvider {
    /// Returns the saturation pressure of water at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the temperature is outside the
    /// provider's range or the evaluation is not finite.
    fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError>;
}

impl<T: SteamTableProvider + ?Sized> SteamTableProvider for &T {
    fn saturation_pressure(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Pressure, PropertyError> {
        (**self).saturation_pressure(temperature)
    }
}
