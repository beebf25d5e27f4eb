use balance_core::Model;
use balance_thermo::{Iapws97, SteamTableProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Berman, BermanInput, BermanOutput, CondenserError, MetroVickers, MetroVickersConfig,
    MetroVickersInput, MetroVickersOutput, ParameterError, Parameters, Strategy, TablePressure,
    TablePressureInput, TablePressureOutput, Vku, VkuInput, VkuOutput,
};

/// The result of one calculation, tagged by the method that produced it.
///
/// Serializes as a single-key object, for example
/// `{"vku_results": {"pressure_flow_path_1": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalculationResult {
    #[serde(rename = "berman_results")]
    Berman(BermanOutput),
    #[serde(rename = "metro_vickers_results")]
    MetroVickers(MetroVickersOutput),
    #[serde(rename = "vku_results")]
    Vku(VkuOutput),
    #[serde(rename = "table_pressure_results")]
    TablePressure(TablePressureOutput),
}

impl CalculationResult {
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        match self {
            CalculationResult::Berman(_) => Strategy::Berman,
            CalculationResult::MetroVickers(_) => Strategy::MetroVickers,
            CalculationResult::Vku(_) => Strategy::Vku,
            CalculationResult::TablePressure(_) => Strategy::TablePressure,
        }
    }
}

/// A calculation as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub calculation_strategy: String,
    #[serde(default)]
    pub parameters: Parameters,
}

impl CalculationRequest {
    /// # Errors
    ///
    /// Returns [`ParameterError::UnknownStrategy`] if the tag is not recognized.
    pub fn strategy(&self) -> Result<Strategy, ParameterError> {
        self.calculation_strategy.parse()
    }

    /// Runs the request with the default steam tables.
    ///
    /// # Errors
    ///
    /// See [`calculate`].
    pub fn calculate(&self) -> Result<CalculationResult, CondenserError> {
        calculate(self.strategy()?, &self.parameters)
    }
}

/// Runs `strategy` on `params` using IAPWS-IF97 saturation properties.
///
/// # Errors
///
/// See [`calculate_with`].
pub fn calculate(
    strategy: Strategy,
    params: &Parameters,
) -> Result<CalculationResult, CondenserError> {
    calculate_with(strategy, params, Iapws97)
}

/// Runs `strategy` on `params` with a caller-chosen saturation provider.
///
/// Every required key is checked before any numeric work starts.
///
/// # Errors
///
/// Returns [`ParameterError::Missing`] listing all absent keys, or any error
/// raised while reading parameters or evaluating the method.
pub fn calculate_with<P: SteamTableProvider>(
    strategy: Strategy,
    params: &Parameters,
    provider: P,
) -> Result<CalculationResult, CondenserError> {
    params.require(strategy)?;
    debug!(%strategy, "dispatching condenser calculation");

    match strategy {
        Strategy::Berman => {
            let input = BermanInput::from_params(params)?;
            let Ok(output) = Berman::default().call(&input);
            Ok(CalculationResult::Berman(output))
        }
        Strategy::MetroVickers => {
            let input = MetroVickersInput::from_params(params)?;
            let model = MetroVickers::new(MetroVickersConfig::default(), provider)
                .map_err(CondenserError::Config)?;
            Ok(CalculationResult::MetroVickers(model.call(&input)?))
        }
        Strategy::Vku => {
            let input = VkuInput::from_params(params)?;
            let output = Vku::from_params(params)?.call(&input)?;
            Ok(CalculationResult::Vku(output))
        }
        Strategy::TablePressure => {
            let input = TablePressureInput::from_params(params)?;
            Ok(CalculationResult::TablePressure(TablePressure.call(&input)?))
        }
    }
}
