use std::cmp::Ordering;

use crate::constraint::{Constrained, Constraint, ConstraintError, UnitBounds};

/// Marker for values in the half-open interval `(0, 1]`.
///
/// Dryness fractions and fouling coefficients live here: zero is meaningless
/// as a divisor, while one is the clean or dry limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalLowerOpen;

impl UnitIntervalLowerOpen {
    /// Constructs a [`Constrained<T, UnitIntervalLowerOpen>`] if `0 < value <= 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside `(0, 1]` or not a number.
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalLowerOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalLowerOpen>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less | Ordering::Equal), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::constraint::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn floats_valid() {
        assert!(Constrained::<f64, UnitIntervalLowerOpen>::new(0.1).is_ok());
        assert_eq!(UnitIntervalLowerOpen::new(1.0).unwrap().into_inner(), 1.0);
        assert!(UnitIntervalLowerOpen::new(0.92).is_ok());
    }

    #[test]
    fn floats_out_of_range() {
        assert!(matches!(
            UnitIntervalLowerOpen::new(0.0),
            Err(ConstraintError::BelowMinimum)
        ));
        assert!(matches!(
            UnitIntervalLowerOpen::new(-0.2),
            Err(ConstraintError::BelowMinimum)
        ));
        assert!(matches!(
            UnitIntervalLowerOpen::new(1.01),
            Err(ConstraintError::AboveMaximum)
        ));
        assert!(matches!(
            UnitIntervalLowerOpen::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }
}
