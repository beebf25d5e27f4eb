mod lower_open;

pub use lower_open::UnitIntervalLowerOpen;

/// Numeric types with a zero and a one, used to bound unit intervals.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}
