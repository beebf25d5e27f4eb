use ninterp::interpolator::Extrapolate as Policy;

/// What a table query returns outside the sampled domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extrapolate {
    /// Extend the nearest edge segment linearly.
    Enable,
    /// Return a fixed value.
    Fill(f64),
    /// Fail with [`InterpError`](super::InterpError).
    Error,
}

impl Extrapolate {
    /// Fill with `NaN`, the [`Table2D`](super::Table2D) default.
    pub const NAN: Self = Extrapolate::Fill(f64::NAN);
}

impl From<Extrapolate> for Policy<f64> {
    fn from(value: Extrapolate) -> Self {
        match value {
            Extrapolate::Enable => Policy::Enable,
            Extrapolate::Fill(fill) => Policy::Fill(fill),
            Extrapolate::Error => Policy::Error,
        }
    }
}
