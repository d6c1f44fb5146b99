//! Fixed-point decimal backed by a 64-bit mantissa.
//!
//! A [`Decimal`] is `integer × 10^-exponent` with `exponent` in `0..=18`.
//! Values with different exponents compare by scaling the smaller-exponent
//! mantissa up. When that scaling overflows the two values are reported as
//! unequal and unordered (`partial_cmp` returns `None`); no arbitrary
//! precision fallback exists.

use crate::errors::{RdfError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const MAX_EXPONENT: u8 = 18;
pub const MAX_SIGNIFICANT_DIGITS: usize = 19;

const DATATYPE: &str = "xsd:decimal";

#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal {
    integer: i64,
    exponent: u8,
}

fn pow10(n: u8) -> Option<i64> {
    10i64.checked_pow(n as u32)
}

impl Decimal {
    pub fn new(integer: i64, exponent: u8) -> Result<Self> {
        if exponent > MAX_EXPONENT {
            return Err(RdfError::malformed_literal(
                format!("{}e-{}", integer, exponent),
                DATATYPE,
                format!("exponent {} exceeds {}", exponent, MAX_EXPONENT),
            ));
        }
        Ok(Decimal { integer, exponent })
    }

    pub fn from_integer(integer: i64) -> Self {
        Decimal {
            integer,
            exponent: 0,
        }
    }

    /// Parses plain decimal notation (`-12.50`, `.5`, `7.`); exponent
    /// notation is rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        let fail = |reason: &str| RdfError::malformed_literal(s, DATATYPE, reason);

        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        if body.contains(|c: char| c == 'e' || c == 'E') {
            return Err(fail("exponent notation is not allowed"));
        }
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(fail("no digits"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(fail("invalid character"));
        }
        if frac_part.len() > MAX_EXPONENT as usize {
            return Err(fail("more than 18 fractional digits"));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let significant = digits.trim_start_matches('0');
        if significant.len() > MAX_SIGNIFICANT_DIGITS {
            return Err(fail("more than 19 significant digits"));
        }
        let magnitude: i128 = if significant.is_empty() {
            0
        } else {
            significant
                .parse::<i128>()
                .map_err(|_| fail("invalid digits"))?
        };
        let signed = if negative { -magnitude } else { magnitude };
        let integer =
            i64::try_from(signed).map_err(|_| fail("does not fit in a 64-bit mantissa"))?;
        Ok(Decimal {
            integer,
            exponent: frac_part.len() as u8,
        })
    }

    /// The mantissa.
    pub fn integer(&self) -> i64 {
        self.integer
    }

    /// Number of digits after the decimal point.
    pub fn exponent(&self) -> u8 {
        self.exponent
    }

    /// Same value with trailing fractional zeros removed.
    pub fn normalized(&self) -> Decimal {
        let mut d = *self;
        while d.exponent > 0 && d.integer % 10 == 0 {
            d.integer /= 10;
            d.exponent -= 1;
        }
        d
    }

    pub fn is_integral(&self) -> bool {
        self.normalized().exponent == 0
    }

    /// The integer value, when there is no fractional part.
    pub fn to_i64(&self) -> Option<i64> {
        let n = self.normalized();
        (n.exponent == 0).then_some(n.integer)
    }

    pub fn is_negative(&self) -> bool {
        self.integer < 0
    }

    pub fn is_zero(&self) -> bool {
        self.integer == 0
    }

    pub fn to_f64(&self) -> f64 {
        self.integer as f64 / 10f64.powi(self.exponent as i32)
    }

    pub fn log10(&self) -> f64 {
        self.to_f64().log10()
    }

    pub fn ln(&self) -> f64 {
        self.to_f64().ln()
    }

    pub fn exp(&self) -> f64 {
        self.to_f64().exp()
    }

    // Brings both mantissas to the larger exponent.
    fn align(&self, other: &Decimal) -> Option<(i64, i64, u8)> {
        match self.exponent.cmp(&other.exponent) {
            Ordering::Equal => Some((self.integer, other.integer, self.exponent)),
            Ordering::Less => {
                let scale = pow10(other.exponent - self.exponent)?;
                Some((self.integer.checked_mul(scale)?, other.integer, other.exponent))
            }
            Ordering::Greater => {
                let scale = pow10(self.exponent - other.exponent)?;
                Some((self.integer, other.integer.checked_mul(scale)?, self.exponent))
            }
        }
    }

    pub fn checked_add(&self, other: &Decimal) -> Option<Decimal> {
        let (a, b, exponent) = self.align(other)?;
        Some(Decimal {
            integer: a.checked_add(b)?,
            exponent,
        })
    }

    pub fn checked_sub(&self, other: &Decimal) -> Option<Decimal> {
        let (a, b, exponent) = self.align(other)?;
        Some(Decimal {
            integer: a.checked_sub(b)?,
            exponent,
        })
    }

    pub fn checked_mul(&self, other: &Decimal) -> Option<Decimal> {
        let a = self.normalized();
        let b = other.normalized();
        let exponent = a.exponent + b.exponent;
        let product = Decimal {
            integer: a.integer.checked_mul(b.integer)?,
            exponent,
        }
        .normalized();
        (product.exponent <= MAX_EXPONENT).then_some(product)
    }

    pub fn checked_neg(&self) -> Option<Decimal> {
        Some(Decimal {
            integer: self.integer.checked_neg()?,
            exponent: self.exponent,
        })
    }

    /// Whole seconds and nanoseconds of a non-negative value.
    pub(crate) fn split_nanos(&self) -> Option<(i64, u32)> {
        if self.integer < 0 {
            return None;
        }
        let scale = pow10(self.exponent)?;
        let whole = self.integer / scale;
        let frac = self.integer % scale;
        let nanos = if self.exponent <= 9 {
            frac * pow10(9 - self.exponent)?
        } else {
            frac / pow10(self.exponent - 9)?
        };
        Some((whole, nanos as u32))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.align(other).map(|(a, b, _)| a == b).unwrap_or(false)
    }
}

// equal values always align without overflow, so equality is an equivalence
impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalized();
        n.integer.hash(state);
        n.exponent.hash(state);
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.align(other).map(|(a, b, _)| a.cmp(&b))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.integer.unsigned_abs().to_string();
        let exponent = self.exponent as usize;
        let sign = if self.integer < 0 { "-" } else { "" };
        if exponent == 0 {
            write!(f, "{}{}", sign, digits)
        } else if digits.len() <= exponent {
            write!(f, "{}0.{}{}", sign, "0".repeat(exponent - digits.len()), digits)
        } else {
            let (whole, frac) = digits.split_at(digits.len() - exponent);
            write!(f, "{}{}.{}", sign, whole, frac)
        }
    }
}

impl FromStr for Decimal {
    type Err = RdfError;

    fn from_str(s: &str) -> Result<Self> {
        Decimal::parse(s)
    }
}

impl From<i64> for Decimal {
    fn from(integer: i64) -> Self {
        Decimal::from_integer(integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let d = Decimal::parse("123.45").unwrap();
        assert_eq!(d.integer(), 12345);
        assert_eq!(d.exponent(), 2);
        assert_eq!(d.to_string(), "123.45");

        assert_eq!(Decimal::parse("-0.005").unwrap().to_string(), "-0.005");
        assert_eq!(Decimal::parse(".5").unwrap().to_string(), "0.5");
        assert_eq!(Decimal::parse("+7.").unwrap().to_string(), "7");
        assert_eq!(Decimal::parse("007").unwrap().integer(), 7);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Decimal::parse("1e5").is_err());
        assert!(Decimal::parse("").is_err());
        assert!(Decimal::parse("-").is_err());
        assert!(Decimal::parse("1.2.3").is_err());
        assert!(Decimal::parse("0.1234567890123456789").is_err());
        assert!(Decimal::parse("12345678901234567890").is_err());
        assert!(Decimal::parse("9999999999999999999").is_err());
        assert!(Decimal::parse("9223372036854775807").is_ok());
        assert!(Decimal::parse("-9223372036854775808").is_ok());
        assert!(Decimal::new(1, 19).is_err());
    }

    #[test]
    fn test_scale_invariant_equality() {
        let a = Decimal::new(12, 0).unwrap();
        let b = Decimal::new(120, 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
        assert!(Decimal::new(121, 1).unwrap() > a);
        assert!(Decimal::new(-5, 3).unwrap() < a);
    }

    #[test]
    fn test_overflowing_comparison_is_conservative() {
        let big = Decimal::new(i64::MAX, 0).unwrap();
        let small = Decimal::new(1, 18).unwrap();
        assert_ne!(big, small);
        assert_eq!(big.partial_cmp(&small), None);
        assert!(!(big > small));
        assert!(!(big < small));
    }

    #[test]
    fn test_arithmetic() {
        let a = Decimal::parse("1.5").unwrap();
        let b = Decimal::parse("0.25").unwrap();
        assert_eq!(a.checked_add(&b).unwrap().to_string(), "1.75");
        assert_eq!(a.checked_sub(&b).unwrap().to_string(), "1.25");
        assert_eq!(a.checked_mul(&b).unwrap().to_string(), "0.375");
        assert!(Decimal::from(i64::MAX).checked_add(&Decimal::from(1)).is_none());
        assert!((Decimal::from(100).log10() - 2.0).abs() < 1e-12);
        assert!((Decimal::from(0).exp() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_split_nanos() {
        let d = Decimal::parse("1993.21").unwrap();
        assert_eq!(d.split_nanos(), Some((1993, 210_000_000)));
    }
}
