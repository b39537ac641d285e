//! ANOVA Core - Fundamental types
//!
//! This crate provides the core types shared by the ANOVA workspace:
//! - `Decimal`: Exact decimal numbers (dashu `DBig`) with rounded division
//! - `Precision`: The arithmetic a numeric path provides, for `f64` and `Decimal`
//! - `AnovaError`: Structured errors with codes, severity and suggestions

mod number;
mod precision;
mod error;

pub use number::{Decimal, NumberError, DIVISION_DIGITS};
pub use precision::{NumericPath, Precision};
pub use error::{AnovaError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{AnovaError, Decimal, NumericPath, Precision, Severity};
    pub use crate::error::codes;
}
