use std::{fmt, str::FromStr};

use balance_core::constraint::ConstraintError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A calculation's named inputs, as supplied by the caller.
///
/// Keys are looked up at the top level first and then in a nested `inputs`
/// object, so both `{"t": 1}` and `{"inputs": {"t": 1}}` provide `t`.
/// A JSON `null` counts as absent at either level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        non_null(&self.0, key).or_else(|| {
            self.0
                .get("inputs")
                .and_then(Value::as_object)
                .and_then(|inputs| non_null(inputs, key))
        })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets a top-level value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the keys from `keys` that are absent, in the given order.
    #[must_use]
    pub fn missing<'k>(&self, keys: &[&'k str]) -> Vec<&'k str> {
        keys.iter()
            .copied()
            .filter(|key| !self.contains(key))
            .collect()
    }

    /// Checks that every key `strategy` requires is present.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Missing`] listing every absent key.
    pub fn require(&self, strategy: Strategy) -> Result<(), ParameterError> {
        let missing = self.missing(strategy.required_keys());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParameterError::Missing {
                strategy,
                keys: missing.into_iter().map(String::from).collect(),
            })
        }
    }

    /// Reads a required number.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent or not a number.
    pub fn number(&self, key: &str) -> Result<f64, ParameterError> {
        self.optional_number(key)?
            .ok_or_else(|| ParameterError::MissingKey { key: key.into() })
    }

    /// Reads a number, falling back to `default` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is present but not a number.
    pub fn number_or(&self, key: &str, default: f64) -> Result<f64, ParameterError> {
        Ok(self.optional_number(key)?.unwrap_or(default))
    }

    /// Reads a number that may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is present but not a number.
    pub fn optional_number(&self, key: &str) -> Result<Option<f64>, ParameterError> {
        self.get(key)
            .map(|value| {
                value
                    .as_f64()
                    .ok_or_else(|| ParameterError::NotANumber { key: key.into() })
            })
            .transpose()
    }

    /// Reads a required list of numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is absent, not a list, or holds a
    /// non-numeric entry.
    pub fn numbers(&self, key: &str) -> Result<Vec<f64>, ParameterError> {
        let value = self
            .get(key)
            .ok_or_else(|| ParameterError::MissingKey { key: key.into() })?;
        as_numbers(key, value)
    }

    /// Reads a list of numbers, treating an absent key as an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is present but not a list of numbers.
    pub fn numbers_or_empty(&self, key: &str) -> Result<Vec<f64>, ParameterError> {
        self.get(key)
            .map_or_else(|| Ok(Vec::new()), |value| as_numbers(key, value))
    }
}

fn non_null<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

pub(crate) fn as_numbers(key: &str, value: &Value) -> Result<Vec<f64>, ParameterError> {
    value
        .as_array()
        .ok_or_else(|| ParameterError::NotAList { key: key.into() })?
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| ParameterError::NotANumber { key: key.into() })
        })
        .collect()
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Parameters {
    type Error = ParameterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ParameterError::NotAnObject),
        }
    }
}

/// The available condenser calculation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Berman,
    MetroVickers,
    Vku,
    TablePressure,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Berman,
        Strategy::MetroVickers,
        Strategy::Vku,
        Strategy::TablePressure,
    ];

    /// The tag used in requests and results.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Berman => "berman",
            Strategy::MetroVickers => "metro_vickers",
            Strategy::Vku => "vku",
            Strategy::TablePressure => "table_pressure",
        }
    }

    /// Keys that must be present before the calculation starts.
    #[must_use]
    pub fn required_keys(self) -> &'static [&'static str] {
        match self {
            Strategy::Berman => &[
                "diameter_inside_of_pipes",
                "thickness_pipe_wall",
                "number_cooling_tubes_of_the_main_bundle",
                "length_cooling_tubes_of_the_main_bundle",
                "number_cooling_water_passes_of_the_main_bundle",
                "mass_flow_steam_nom",
                "enthalpy_flow_path_1",
                "mass_flow_steam_list",
                "temperature_cooling_water_1_list",
                "mass_flow_cooling_water_list",
                "coefficient_R_list",
                "thermal_conductivity_cooling_surface_tube_material",
            ],
            Strategy::MetroVickers => &[
                "diameter_inside_of_pipes",
                "thickness_pipe_wall",
                "length_cooling_tubes_of_the_main_bundle",
                "number_cooling_water_passes_of_the_main_bundle",
                "number_cooling_tubes_of_the_main_bundle",
                "number_cooling_tubes_of_the_built_in_bundle",
                "mass_flow_cooling_water",
                "temperature_cooling_water_1",
                "mass_flow_flow_path_1",
                "degree_dryness_flow_path_1",
                "thermal_conductivity_cooling_surface_tube_material",
            ],
            Strategy::Vku => &[
                "mass_flow_flow_path_1",
                "degree_dryness_flow_path_1",
                "mass_flow_steam_nom",
                "degree_dryness_steam_nom",
            ],
            Strategy::TablePressure => &["NAMET", "NAMED", "inputs"],
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ParameterError::UnknownStrategy(s.to_string()))
    }
}

/// Problems with the parameters supplied to a calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("missing required parameters for {strategy}: {}", .keys.join(", "))]
    Missing { strategy: Strategy, keys: Vec<String> },

    #[error("missing required parameter `{key}`")]
    MissingKey { key: String },

    #[error("parameter `{key}` must be a number")]
    NotANumber { key: String },

    #[error("parameter `{key}` must be a list")]
    NotAList { key: String },

    #[error("parameter `{key}` is malformed: {reason}")]
    Malformed { key: String, reason: String },

    #[error("parameter `{key}` is out of range")]
    Invalid {
        key: String,
        #[source]
        source: ConstraintError,
    },

    #[error("Unknown calculation strategy: {0}")]
    UnknownStrategy(String),

    #[error("parameters must be a JSON object")]
    NotAnObject,
}

impl ParameterError {
    pub(crate) fn invalid(key: &str) -> impl FnOnce(ConstraintError) -> Self + '_ {
        move |source| Self::Invalid {
            key: key.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn params(value: Value) -> Parameters {
        Parameters::try_from(value).unwrap()
    }

    #[test]
    fn nested_inputs_are_consulted() {
        let p = params(json!({
            "a": 1.0,
            "inputs": { "a": 5.0, "b": 2.0 },
        }));

        assert_eq!(p.number("a").unwrap(), 1.0);
        assert_eq!(p.number("b").unwrap(), 2.0);
        assert!(p.get("c").is_none());
    }

    #[test]
    fn null_counts_as_absent() {
        let p = params(json!({ "a": null }));

        assert_eq!(p.number_or("a", 20.0).unwrap(), 20.0);
        assert_eq!(p.optional_number("a").unwrap(), None);

        let shadowed = params(json!({ "a": null, "inputs": { "a": 3.0, "b": null } }));
        assert_eq!(shadowed.number("a").unwrap(), 3.0);
        assert!(!shadowed.contains("b"));
        assert_eq!(shadowed.missing(&["a", "b"]), ["b"]);
    }

    #[test]
    fn type_errors_name_the_key() {
        let p = params(json!({ "a": "hot", "b": 3.0, "c": [1.0, "x"] }));

        assert_eq!(
            p.number("a").unwrap_err(),
            ParameterError::NotANumber { key: "a".into() }
        );
        assert_eq!(
            p.numbers("b").unwrap_err(),
            ParameterError::NotAList { key: "b".into() }
        );
        assert_eq!(
            p.numbers("c").unwrap_err(),
            ParameterError::NotANumber { key: "c".into() }
        );
        assert_eq!(
            p.number("z").unwrap_err(),
            ParameterError::MissingKey { key: "z".into() }
        );
        assert!(p.numbers_or_empty("z").unwrap().is_empty());
    }

    #[test]
    fn require_lists_every_missing_key() {
        let p = params(json!({
            "mass_flow_flow_path_1": 1000.0,
            "inputs": { "degree_dryness_steam_nom": 0.92 },
        }));

        let err = p.require(Strategy::Vku).unwrap_err();

        assert_eq!(
            err,
            ParameterError::Missing {
                strategy: Strategy::Vku,
                keys: vec![
                    "degree_dryness_flow_path_1".into(),
                    "mass_flow_steam_nom".into(),
                ],
            }
        );
        assert_eq!(
            err.to_string(),
            "missing required parameters for vku: degree_dryness_flow_path_1, mass_flow_steam_nom"
        );
    }

    #[test]
    fn strategy_tags_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
            assert_eq!(
                serde_json::to_value(strategy).unwrap(),
                json!(strategy.as_str())
            );
        }

        let err = "carnot".parse::<Strategy>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown calculation strategy: carnot");
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(
            Parameters::try_from(json!([1, 2])).unwrap_err(),
            ParameterError::NotAnObject
        );
    }
}
