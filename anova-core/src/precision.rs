//! Numeric precision strategies
//!
//! Statistics and decompositions are written once against [`Precision`] and
//! instantiated for `f64` (fast) and [`Decimal`] (exact).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Decimal;

/// Arithmetic a numeric path must provide
pub trait Precision: Clone + fmt::Debug + PartialOrd + Send + Sync {
    /// Label used in logs
    const NAME: &'static str;

    fn zero() -> Self;

    fn from_count(n: usize) -> Self;

    fn add(&self, other: &Self) -> Self;

    fn sub(&self, other: &Self) -> Self;

    fn mul(&self, other: &Self) -> Self;

    /// Quotient, or `None` when this path cannot represent it.
    ///
    /// `f64` always answers (IEEE gives ±inf or NaN for a zero divisor);
    /// `Decimal` has no infinity and answers `None`.
    fn ratio(&self, other: &Self) -> Option<Self>;

    fn is_zero(&self) -> bool;

    fn to_f64(&self) -> f64;
}

impl Precision for f64 {
    const NAME: &'static str = "float";

    fn zero() -> Self {
        0.0
    }

    fn from_count(n: usize) -> Self {
        n as f64
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    fn ratio(&self, other: &Self) -> Option<Self> {
        Some(self / other)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

impl Precision for Decimal {
    const NAME: &'static str = "decimal";

    fn zero() -> Self {
        Decimal::zero()
    }

    fn from_count(n: usize) -> Self {
        Decimal::from_usize(n)
    }

    fn add(&self, other: &Self) -> Self {
        Decimal::add(self, other)
    }

    fn sub(&self, other: &Self) -> Self {
        Decimal::sub(self, other)
    }

    fn mul(&self, other: &Self) -> Self {
        Decimal::mul(self, other)
    }

    fn ratio(&self, other: &Self) -> Option<Self> {
        self.checked_div(other)
    }

    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }

    fn to_f64(&self) -> f64 {
        Decimal::to_f64(self).unwrap_or(f64::NAN)
    }
}

/// Which arithmetic a computation runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPath {
    Float,
    Decimal,
}

impl fmt::Display for NumericPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericPath::Float => write!(f, "{}", <f64 as Precision>::NAME),
            NumericPath::Decimal => write!(f, "{}", <Decimal as Precision>::NAME),
        }
    }
}
