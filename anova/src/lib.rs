//! One-way analysis of variance
//!
//! Groups of observations are decomposed into between- and within-group
//! variability and tested with an F-test. Every figure is carried in two
//! forms: fast `f64` and exact [`Decimal`]. Pairs of groups can be compared
//! as independent two-group analyses.
//!
//! ```
//! use anova::{AnovaConfig, GroupDataset, OneWayAnova};
//!
//! let data = GroupDataset::parse_decimals([
//!     ("A", vec!["1", "2", "3"]),
//!     ("B", vec!["4", "5", "6"]),
//!     ("C", vec!["7", "8", "9"]),
//! ])?;
//! let report = OneWayAnova::new(data, AnovaConfig::default())?.run()?;
//! assert_eq!(report.decomposition.f_ratio.float, 27.0);
//! # Ok::<(), anova::AnovaError>(())
//! ```

mod analysis;
pub mod config;
mod dataset;
pub mod decomposition;
pub mod mirror;
pub mod pairwise;
mod report;
pub mod significance;
pub mod statistics;

pub use analysis::OneWayAnova;
pub use config::{AnovaConfig, ComparisonMode, Denominator, PrecisionMode, SignificanceLevel};
pub use dataset::{Group, GroupDataset};
pub use decomposition::{decompose, DecompositionResult, DegreesOfFreedom, Figures};
pub use mirror::Mirrored;
pub use pairwise::{GroupPair, PairComparison, PairRegistry};
pub use report::{AnovaReport, AnovaRow, AnovaTable, Source, ALL_GROUPS};
pub use significance::Significance;
pub use statistics::{DescriptiveStatistics, GroupStatistics};

pub use anova_core::{codes, AnovaError, Decimal, NumericPath, Precision, Severity};
