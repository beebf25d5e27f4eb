use super::Error;

/// An ordered search interval that remembers which side is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bracket {
    pub(super) lo: f64,
    pub(super) hi: f64,
    lo_negative: bool,
}

impl Bracket {
    /// Orders the endpoints, rejecting non-finite or coincident ones.
    pub(super) fn ordered([a, b]: [f64; 2]) -> Result<[f64; 2], Error> {
        if let Some(value) = [a, b].into_iter().find(|v| !v.is_finite()) {
            return Err(Error::NonFiniteBracket { value });
        }
        match a.total_cmp(&b) {
            std::cmp::Ordering::Less => Ok([a, b]),
            std::cmp::Ordering::Greater => Ok([b, a]),
            std::cmp::Ordering::Equal => Err(Error::ZeroWidthBracket { value: a }),
        }
    }

    /// Builds a bracket from residuals at both ends, which must differ in sign.
    ///
    /// Zero counts as positive.
    pub(super) fn new([lo, hi]: [f64; 2], f_lo: f64, f_hi: f64) -> Result<Self, Error> {
        let lo_negative = f_lo < 0.0;
        if lo_negative == (f_hi < 0.0) {
            return Err(Error::NoBracket {
                left: lo,
                right: hi,
                left_residual: f_lo,
                right_residual: f_hi,
            });
        }
        Ok(Self {
            lo,
            hi,
            lo_negative,
        })
    }

    pub(super) fn mid(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub(super) fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Keeps the half that still straddles the root.
    pub(super) fn narrow(&mut self, mid: f64, f_mid: f64) {
        if (f_mid < 0.0) == self.lo_negative {
            self.lo = mid;
        } else {
            self.hi = mid;
        }
    }
}
