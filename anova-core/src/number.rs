//! Exact decimal numbers using dashu
//!
//! `Decimal` wraps dashu-float's `DBig` with unlimited precision, so addition,
//! subtraction and multiplication never round. Division is the single
//! rounding step: quotients keep [`DIVISION_DIGITS`] significant digits,
//! rounded half away from zero (the rounding mode `DBig` is built on).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use dashu_float::DBig;
use dashu_int::ops::DivRem;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for decimal construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid decimal literal: {0}")]
    ParseError(String),

    #[error("Not a finite number: {0}")]
    NonFinite(f64),
}

/// Significant digits kept by a rounded division
pub const DIVISION_DIGITS: usize = 50;

/// Exact decimal number
///
/// Values are held at unlimited precision between operations. Only
/// [`Decimal::checked_div`] rounds.
#[derive(Debug, Clone)]
pub struct Decimal {
    inner: DBig,
}

impl Decimal {
    // ========== Construction ==========

    /// Drop any working precision so later arithmetic is exact
    fn exact(val: DBig) -> Self {
        Self { inner: val.with_precision(0).value() }
    }

    pub fn zero() -> Self {
        Self::exact(DBig::ZERO)
    }

    pub fn from_i64(n: i64) -> Self {
        Self::exact(DBig::from(n))
    }

    pub fn from_usize(n: usize) -> Self {
        Self::from_i64(n as i64)
    }

    /// Parse a decimal literal: "12", "-0.125", "1.5e3", "602214076e15"
    pub fn parse(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Integer mantissa with exponent, kept exact as significand * 10^exp
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let lower = s.to_lowercase();
            if let Some((mantissa, exp)) = lower.split_once('e') {
                let mantissa: IBig = mantissa
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: isize = exp
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                return Ok(Self::exact(DBig::from_parts(mantissa, exp)));
            }
        }

        let inner: DBig = s
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;
        Ok(Self::exact(inner))
    }

    /// Widen an `f64` through its shortest round-trip decimal form
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NonFinite(f));
        }
        // `Display` for f64 never uses exponent notation
        Self::parse(&f.to_string())
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    // ========== Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Rounded division, `None` for a zero divisor
    ///
    /// The quotient is rounded once, whatever the operand lengths: the
    /// integer quotient carries at least one digit past [`DIVISION_DIGITS`]
    /// and a nonzero remainder is folded into a trailing sticky digit.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let num = self.inner.repr();
        let den = other.inner.repr();

        let shift = (DIVISION_DIGITS + 1 + den.digits()).saturating_sub(num.digits());
        let scaled = num.significand() * IBig::from(10u8).pow(shift);
        let (quotient, remainder) = scaled.div_rem(den.significand());

        let mut digits = quotient * IBig::from(10u8);
        if !remainder.is_zero() {
            digits += remainder.signum() * den.significand().signum();
        }
        let exponent = num.exponent() - den.exponent() - shift as isize - 1;
        let rounded = DBig::from_parts(digits, exponent)
            .with_precision(DIVISION_DIGITS)
            .value();
        Some(Self::exact(rounded))
    }

    // ========== Conversion ==========

    /// Narrow to the nearest f64, `None` outside the f64 range
    pub fn to_f64(&self) -> Option<f64> {
        let f = self.inner.to_f64().value();
        f.is_finite().then_some(f)
    }
}

// ========== Trait Implementations ==========

impl FromStr for Decimal {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.partial_cmp(&other.inner).unwrap_or(Ordering::Equal)
    }
}
