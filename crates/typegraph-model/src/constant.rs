//! Literal values carried by constant declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An exact rational number, always kept in lowest terms with a positive denominator.
///
/// Untyped floating point constants are exact in the checker, so they are
/// represented as a numerator/denominator pair rather than an `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRational", into = "RawRational")]
pub struct Rational {
    numer: i128,
    denom: i128,
}

#[derive(Serialize, Deserialize)]
struct RawRational {
    numer: i128,
    denom: i128,
}

impl Rational {
    /// Builds `numer / denom` in lowest terms. Returns `None` for a zero denominator.
    pub fn new(numer: i128, denom: i128) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let divisor = gcd(numer.unsigned_abs(), denom.unsigned_abs());
        let (mut numer, mut denom) = if divisor > 1 {
            (numer / divisor as i128, denom / divisor as i128)
        } else {
            (numer, denom)
        };
        if denom < 0 {
            numer = numer.checked_neg()?;
            denom = denom.checked_neg()?;
        }
        Some(Rational { numer, denom })
    }

    pub fn from_integer(value: i128) -> Self {
        Rational { numer: value, denom: 1 }
    }

    /// Exact conversion of a finite `f64`. Returns `None` for NaN, infinities and
    /// values whose exact fraction does not fit in 128 bits.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Rational::from_integer(0));
        }
        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mantissa, exponent) = if exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), exponent - 1075)
        };
        let mantissa = i128::from(mantissa);
        let signed = if negative { -mantissa } else { mantissa };
        if exponent >= 0 {
            let shifted = signed.checked_mul(1i128.checked_shl(exponent as u32)?)?;
            if shifted >> exponent != signed {
                return None;
            }
            Some(Rational::from_integer(shifted))
        } else {
            let shift = (-exponent) as u32;
            if shift >= 127 {
                // Strip trailing zero bits from the mantissa before giving up.
                let zeros = mantissa.trailing_zeros().min(shift);
                let shift = shift - zeros;
                if shift >= 127 {
                    return None;
                }
                return Rational::new(signed >> zeros, 1i128 << shift);
            }
            Rational::new(signed, 1i128 << shift)
        }
    }

    pub fn numer(&self) -> i128 {
        self.numer
    }

    pub fn denom(&self) -> i128 {
        self.denom
    }

    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }
}

impl TryFrom<RawRational> for Rational {
    type Error = String;

    fn try_from(raw: RawRational) -> Result<Self, Self::Error> {
        Rational::new(raw.numer, raw.denom)
            .ok_or_else(|| format!("invalid rational {}/{}", raw.numer, raw.denom))
    }
}

impl From<Rational> for RawRational {
    fn from(r: Rational) -> Self {
        RawRational { numer: r.numer, denom: r.denom }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// The value of a constant declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstValue {
    Bool(bool),
    String(String),
    Int(i128),
    Float(Rational),
    Complex { re: Rational, im: Rational },
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(b) => write!(f, "{b}"),
            ConstValue::String(s) => write!(f, "{s:?}"),
            ConstValue::Int(i) => write!(f, "{i}"),
            ConstValue::Float(r) => write!(f, "{r}"),
            ConstValue::Complex { re, im } => write!(f, "({re} + {im}i)"),
        }
    }
}
