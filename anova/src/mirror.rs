//! Floating and decimal forms of one quantity
//!
//! The form matching the active numeric path is computed; the other is
//! derived from it. A decimal figure narrows to `f64`, a float figure widens
//! to `Decimal` through its shortest decimal representation. Non-finite
//! floats have no decimal form.

use serde::Serialize;
use tracing::warn;

use anova_core::{Decimal, Precision};

/// Relative tolerance for sums and mean squares, scaled by the total
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Relative tolerance for the F-ratio
pub const RATIO_TOLERANCE: f64 = 1e-6;

/// A quantity in both numeric forms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mirrored {
    pub float: f64,
    /// `None` when the quantity is undefined or infinite
    pub decimal: Option<Decimal>,
}

impl Mirrored {
    /// Decimal is authoritative; float is its narrowing
    pub fn narrow(decimal: Decimal) -> Self {
        Self {
            float: Precision::to_f64(&decimal),
            decimal: Some(decimal),
        }
    }

    /// Float is authoritative; decimal is its widening
    pub fn widen(float: f64) -> Self {
        Self {
            float,
            decimal: Decimal::from_f64(float).ok(),
        }
    }

    /// Quotient the decimal path could not represent: the float form is the
    /// IEEE quotient of the narrowed operands (±inf or NaN).
    pub fn undefined_ratio(numerator: f64, denominator: f64) -> Self {
        Self {
            float: numerator / denominator,
            decimal: None,
        }
    }

    /// Narrow `decimal` if it exists, else fall back to the IEEE quotient
    pub fn narrow_ratio(decimal: Option<Decimal>, numerator: f64, denominator: f64) -> Self {
        match decimal {
            Some(d) => Self::narrow(d),
            None => Self::undefined_ratio(numerator, denominator),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.float.is_finite()
    }
}

/// Compare a narrowed decimal figure with the same figure computed end to
/// end in floating point. Logs and returns `false` when they diverge.
///
/// Pairs where either side is not finite are not compared.
pub fn cross_check(quantity: &'static str, narrowed: f64, independent: f64, scale: f64, tolerance: f64) -> bool {
    if !narrowed.is_finite() || !independent.is_finite() {
        return true;
    }
    let diff = (narrowed - independent).abs();
    let bound = tolerance * scale.abs().max(narrowed.abs()).max(independent.abs());
    if diff > bound {
        warn!(
            quantity,
            decimal = narrowed,
            float = independent,
            diff,
            "floating and decimal forms diverge"
        );
        return false;
    }
    true
}
