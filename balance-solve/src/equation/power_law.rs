//! A power-law reference problem with a known closed-form root.
//!
//! The model is `δ(x) = 1 - c·x^p`. Its root against a target has a closed
//! form, so the same problem can be handed to every solver and the iterative
//! answers checked against [`analytical`](super::analytical).

use std::convert::Infallible;

use thiserror::Error;

use balance_core::model::Model;

use super::{EquationProblem, ResidualDerivative, analytical::ClosedForm};

/// The power-law model `δ(x) = 1 - c·x^p`.
///
/// Defined for `x > 0`; non-positive inputs produce `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub coefficient: f64,
    pub exponent: f64,
}

impl Default for PowerLaw {
    fn default() -> Self {
        Self {
            coefficient: (3.1415_f64 / 2.71).powf(0.83),
            exponent: 0.83 - 1.0,
        }
    }
}

/// Value and slope of the power law at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawOutput {
    pub value: f64,
    pub slope: f64,
}

impl Model for PowerLaw {
    type Input = f64;
    type Output = PowerLawOutput;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<PowerLawOutput, Infallible> {
        let x = *x;
        if x <= 0.0 {
            return Ok(PowerLawOutput {
                value: f64::NAN,
                slope: f64::NAN,
            });
        }

        let c = self.coefficient;
        let p = self.exponent;
        Ok(PowerLawOutput {
            value: 1.0 - c * x.powf(p),
            slope: -c * p * x.powf(p - 1.0),
        })
    }
}

/// Drives [`PowerLaw`] to a target value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawTarget {
    model: PowerLaw,
    target: f64,
}

impl PowerLawTarget {
    #[must_use]
    pub fn new(model: PowerLaw, target: f64) -> Self {
        Self { model, target }
    }
}

impl EquationProblem<1> for PowerLawTarget {
    type Input = f64;
    type Output = PowerLawOutput;
    type InputError = Infallible;
    type ResidualError = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &PowerLawOutput) -> Result<[f64; 1], Infallible> {
        Ok([output.value - self.target])
    }
}

impl ResidualDerivative for PowerLawTarget {
    fn derivative(&self, _input: &f64, output: &PowerLawOutput) -> Result<f64, Infallible> {
        Ok(output.slope)
    }
}

/// The closed form needs a non-negative base under a fractional power.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("no real root: base (1 - target) / c = {base} is negative")]
pub struct NegativeBase {
    pub base: f64,
}

impl ClosedForm for PowerLawTarget {
    type Error = NegativeBase;

    fn root(&self) -> Result<f64, NegativeBase> {
        let base = (1.0 - self.target) / self.model.coefficient;
        if base < 0.0 {
            return Err(NegativeBase { base });
        }
        Ok(base.powf(1.0 / self.model.exponent))
    }
}
