use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::{CalculationResult, CondenserError, Parameters, Strategy, calculate};

/// One evaluated combination of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// The varying values used for this point, keyed by parameter name.
    pub parameters: Map<String, Value>,
    pub result: CalculationResult,
}

/// Evaluates `strategy` over every combination of the varying parameters.
///
/// Each combination overrides the matching top-level keys of `template`.
/// Points are produced in row-major order, with the last varying parameter
/// changing fastest. An empty `varying` evaluates the template once, and a
/// varying parameter with no values yields no points.
///
/// # Errors
///
/// Returns the first error raised by any combination.
pub fn sweep(
    strategy: Strategy,
    template: &Parameters,
    varying: &[(String, Vec<Value>)],
) -> Result<Vec<SweepPoint>, CondenserError> {
    let combinations = varying.iter().fold(vec![Map::new()], |acc, (key, values)| {
        acc.iter()
            .flat_map(|partial| {
                values.iter().map(move |value| {
                    let mut next = partial.clone();
                    next.insert(key.clone(), value.clone());
                    next
                })
            })
            .collect()
    });
    debug!(%strategy, points = combinations.len(), "running sweep");

    combinations
        .into_iter()
        .map(|combination| {
            let mut params = template.clone();
            for (key, value) in &combination {
                params.insert(key.clone(), value.clone());
            }
            Ok(SweepPoint {
                result: calculate(strategy, &params)?,
                parameters: combination,
            })
        })
        .collect()
}

/// Splits `[0, total]` into `parts` equal intervals and returns their
/// `parts + 1` boundaries.
///
/// The last point is exactly `total`. Zero parts gives `[0.0]`.
#[must_use]
pub fn split_into_parts(total: f64, parts: usize) -> Vec<f64> {
    if parts == 0 {
        return vec![0.0];
    }

    #[allow(clippy::cast_precision_loss)]
    let step = total / parts as f64;
    (0..=parts)
        .map(|i| {
            if i == parts {
                total
            } else {
                #[allow(clippy::cast_precision_loss)]
                let i = i as f64;
                i * step
            }
        })
        .collect()
}
