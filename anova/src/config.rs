//! Analysis configuration
//!
//! Loaded from JSON or assembled with builder methods. Group indices are
//! 1-based here, as they are everywhere a caller names a group.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use anova_core::{AnovaError, NumericPath};
pub use anova_stats::Denominator;

use crate::pairwise::GroupPair;

/// Critical significance, entered as a confidence fraction.
///
/// The upper-tail probability `alpha = 1 - confidence` is what is stored,
/// since the F-test and the confidence intervals work in tail terms.
/// Serialises back as the confidence fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignificanceLevel {
    alpha: f64,
}

impl SignificanceLevel {
    pub fn from_confidence(confidence: f64) -> Result<Self, AnovaError> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(AnovaError::InvalidSignificance(confidence));
        }
        Ok(Self { alpha: 1.0 - confidence })
    }

    /// Stored upper-tail probability
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Confidence fraction as it was entered
    pub fn confidence(&self) -> f64 {
        1.0 - self.alpha
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self { alpha: 1.0 - 0.95 }
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = AnovaError;

    fn try_from(confidence: f64) -> Result<Self, Self::Error> {
        Self::from_confidence(confidence)
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(level: SignificanceLevel) -> f64 {
        level.confidence()
    }
}

/// Which numeric path the analysis runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionMode {
    /// Decimal when the dataset was entered as decimals, float otherwise
    #[default]
    Auto,
    #[serde(alias = "fast")]
    Float,
    #[serde(alias = "exact")]
    Decimal,
}

impl PrecisionMode {
    /// Path to run for a dataset whose authoritative form is `source`
    pub fn resolve(&self, source: NumericPath) -> NumericPath {
        match self {
            PrecisionMode::Auto => source,
            PrecisionMode::Float => NumericPath::Float,
            PrecisionMode::Decimal => NumericPath::Decimal,
        }
    }
}

impl FromStr for PrecisionMode {
    type Err = AnovaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(PrecisionMode::Auto),
            "float" | "fast" => Ok(PrecisionMode::Float),
            "decimal" | "exact" => Ok(PrecisionMode::Decimal),
            other => Err(AnovaError::InvalidConfig(format!("unknown precision mode '{}'", other))),
        }
    }
}

/// Which pairs of groups get a cached two-group comparison
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ComparisonMode {
    #[default]
    None,
    /// Every pair of groups
    AllPairs,
    /// Every pair drawn from the listed groups
    Subset { groups: Vec<usize> },
    SinglePair { first: usize, second: usize },
}

impl ComparisonMode {
    /// Membership mask over `groups` groups, validating every index
    pub fn members(&self, groups: usize) -> Result<Vec<bool>, AnovaError> {
        let mut mask = vec![false; groups];
        if *self == ComparisonMode::None {
            return Ok(mask);
        }
        if groups < 2 {
            return Err(AnovaError::TooFewGroups {
                operation: "pairwise comparison",
                required: 2,
                actual: groups,
            });
        }

        match self {
            ComparisonMode::None => {}
            ComparisonMode::AllPairs => mask.iter_mut().for_each(|m| *m = true),
            ComparisonMode::Subset { groups: chosen } => {
                for &index in chosen {
                    if index == 0 || index > groups {
                        return Err(AnovaError::GroupIndexOutOfRange { index, groups });
                    }
                    mask[index - 1] = true;
                }
                let included = mask.iter().filter(|m| **m).count();
                if included < 2 {
                    return Err(AnovaError::TooFewGroups {
                        operation: "subset comparison",
                        required: 2,
                        actual: included,
                    });
                }
            }
            ComparisonMode::SinglePair { first, second } => {
                let pair = GroupPair::new(*first, *second, groups)?;
                mask[pair.first() - 1] = true;
                mask[pair.second() - 1] = true;
            }
        }
        Ok(mask)
    }
}

/// Options for a one-way analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnovaConfig {
    pub significance: SignificanceLevel,
    pub denominator: Denominator,
    pub precision: PrecisionMode,
    pub comparison: ComparisonMode,
}

impl AnovaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document; absent fields take defaults
    pub fn from_json(json: &str) -> Result<Self, AnovaError> {
        serde_json::from_str(json).map_err(|e| AnovaError::InvalidConfig(e.to_string()))
    }

    pub fn with_significance(mut self, confidence: f64) -> Result<Self, AnovaError> {
        self.significance = SignificanceLevel::from_confidence(confidence)?;
        Ok(self)
    }

    pub fn with_denominator(mut self, denominator: Denominator) -> Self {
        self.denominator = denominator;
        self
    }

    pub fn with_precision(mut self, precision: PrecisionMode) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_comparison(mut self, comparison: ComparisonMode) -> Self {
        self.comparison = comparison;
        self
    }
}
