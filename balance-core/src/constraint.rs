//! Checked wrappers for values with physical bounds.
//!
//! A [`Constrained<T, C>`] can only be built from a value that passes the
//! marker constraint `C`, so code holding one never re-checks it.
//!
//! ```
//! use balance_core::constraint::{StrictlyPositive, UnitIntervalLowerOpen};
//!
//! let nominal_flow = StrictlyPositive::new(1250.0).unwrap();
//! let dryness = UnitIntervalLowerOpen::new(0.92).unwrap();
//!
//! assert_eq!(nominal_flow.into_inner(), 1250.0);
//! assert_eq!(dryness.into_inner(), 0.92);
//! assert!(UnitIntervalLowerOpen::new(0.0).is_err());
//! ```

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitIntervalLowerOpen};

/// A rule a value must satisfy to be wrapped in [`Constrained`].
pub trait Constraint<T> {
    /// Checks the value against the constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// Why a value was rejected by a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value that is known to satisfy the constraint `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Wraps `value` after checking it against `C`.
    ///
    /// # Errors
    ///
    /// Returns the constraint's error if the value is out of bounds.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
