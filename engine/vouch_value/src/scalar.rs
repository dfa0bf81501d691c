//! Scalar leaves of a value snapshot.
//!
//! [`Scalar`] holds the atomic data an assertion can compare (booleans,
//! numbers, characters, strings). [`Number`] is the numeric view used by
//! proximity hints and insertion-point resolution.

use std::cmp::Ordering;
use std::fmt;

/// An atomic datum.
///
/// Equality is exact. Floats compare by value, except that identical bit
/// patterns are always equal, so `NaN == NaN` when the payload matches. This
/// keeps every scalar equal to itself, which structural diffing relies on.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Unit,
}

impl Scalar {
    /// Numeric view of this scalar, if it is a number.
    pub fn as_number(&self) -> Option<Number> {
        match *self {
            Scalar::Int(v) => Some(Number::Int(v)),
            Scalar::UInt(v) => Some(Number::UInt(v)),
            Scalar::Float(v) => Some(Number::Float(v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the scalar's kind, as shown in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::UInt(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::Char(_) => "char",
            Scalar::Str(_) => "string",
            Scalar::Unit => "unit",
        }
    }

    /// Rank used to order scalars of different kinds.
    fn kind_rank(&self) -> u8 {
        match self {
            Scalar::Unit => 0,
            Scalar::Bool(_) => 1,
            Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_) => 2,
            Scalar::Char(_) => 3,
            Scalar::Str(_) => 4,
        }
    }

    /// Tie-breaker between numerically equal numbers.
    ///
    /// Integers of either signedness share a rank, matching `==`.
    fn number_rank(&self) -> u8 {
        match self {
            Scalar::Float(_) => 1,
            _ => 0,
        }
    }

    /// Total order over scalars, used for canonical key ordering.
    ///
    /// Numbers of any kind compare numerically with each other; NaN sorts
    /// after every other float. Scalars that compare `Equal` are `==`, so an
    /// integer and a float of the same value stay distinct keys.
    pub fn canonical_cmp(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Char(a), Scalar::Char(b)) => a.cmp(b),
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            (Scalar::Unit, Scalar::Unit) => Ordering::Equal,
            (Scalar::Float(a), Scalar::Float(b)) if a.is_nan() && b.is_nan() => {
                a.to_bits().cmp(&b.to_bits())
            }
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x
                    .total_cmp(y)
                    .then_with(|| a.number_rank().cmp(&b.number_rank())),
                _ => a.kind_rank().cmp(&b.kind_rank()),
            },
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Unit, Scalar::Unit) => true,
            (Scalar::Float(a), Scalar::Float(b)) => a == b || a.to_bits() == b.to_bits(),
            (Scalar::Int(_) | Scalar::UInt(_), Scalar::Int(_) | Scalar::UInt(_)) => {
                self.as_number() == other.as_number()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::UInt(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v:?}"),
            Scalar::Char(c) => write!(f, "{c:?}"),
            Scalar::Str(s) => write!(f, "{s:?}"),
            Scalar::Unit => write!(f, "()"),
        }
    }
}

/// Numeric view of a scalar.
///
/// Integers of either signedness compare exactly; anything involving a float
/// compares as `f64`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    #[expect(
        clippy::cast_precision_loss,
        reason = "approximate magnitude is enough for proximity hints"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::UInt(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Number::Float(v) if v.is_nan())
    }

    /// Absolute difference between two numbers.
    ///
    /// Integer pairs are subtracted in `i128`, so the result never overflows
    /// before the final conversion.
    #[expect(
        clippy::cast_precision_loss,
        reason = "differences are only displayed and compared against tolerances"
    )]
    pub fn abs_diff(self, other: Number) -> f64 {
        match (self.as_wide_int(), other.as_wide_int()) {
            (Some(a), Some(b)) => (a - b).unsigned_abs() as f64,
            _ => (self.as_f64() - other.as_f64()).abs(),
        }
    }

    fn as_wide_int(self) -> Option<i128> {
        match self {
            Number::Int(v) => Some(i128::from(v)),
            Number::UInt(v) => Some(i128::from(v)),
            Number::Float(_) => None,
        }
    }

    /// Total order: integers exactly, floats by `f64::total_cmp` semantics
    /// except that NaN sorts last.
    pub fn total_cmp(self, other: Number) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_wide_int(), other.as_wide_int()) {
            return a.cmp(&b);
        }
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self
                .as_f64()
                .partial_cmp(&other.as_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.as_wide_int(), other.as_wide_int()) {
            return Some(a.cmp(&b));
        }
        self.as_f64().partial_cmp(&other.as_f64())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::UInt(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests;
