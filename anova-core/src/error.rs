//! Structured errors
//!
//! Every failure carries a machine-readable code, a severity and, where one
//! exists, a suggestion a report layer can show next to the message.
//! Numeric degeneracy (zero within-group degrees of freedom, zero within-group
//! mean square) is data, not an error, and never appears here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NumberError;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const NO_GROUPS: &str = "NO_GROUPS";
    pub const EMPTY_GROUP: &str = "EMPTY_GROUP";
    pub const DUPLICATE_GROUP: &str = "DUPLICATE_GROUP";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const TOO_FEW_GROUPS: &str = "TOO_FEW_GROUPS";
    pub const SAME_GROUP: &str = "SAME_GROUP";
    pub const GROUP_INDEX: &str = "GROUP_INDEX";
    pub const SIGNIFICANCE: &str = "SIGNIFICANCE";
    pub const CONFIG: &str = "CONFIG";
    pub const PAIR_NOT_FOUND: &str = "PAIR_NOT_FOUND";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The request was rejected
    Error,
    /// Internal bookkeeping is broken
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnovaError {
    #[error("dataset has no groups")]
    NoGroups,

    #[error("group '{0}' has no observations")]
    EmptyGroup(String),

    #[error("group name '{0}' appears more than once")]
    DuplicateGroup(String),

    #[error("group '{group}' observation {index} is not a finite number")]
    NonFiniteValue { group: String, index: usize },

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("{operation} requires at least {required} groups, dataset has {actual}")]
    TooFewGroups {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("the two groups of a pair must be different, both were {0}")]
    SameGroup(usize),

    #[error("group index {index} must be greater than 0 and less than {limit}", limit = .groups + 1)]
    GroupIndexOutOfRange { index: usize, groups: usize },

    #[error("significance level {0} must lie strictly between 0 and 1")]
    InvalidSignificance(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no comparison found for groups {0} and {1}")]
    PairNotFound(usize, usize),
}

impl AnovaError {
    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AnovaError::NoGroups => codes::NO_GROUPS,
            AnovaError::EmptyGroup(_) => codes::EMPTY_GROUP,
            AnovaError::DuplicateGroup(_) => codes::DUPLICATE_GROUP,
            AnovaError::NonFiniteValue { .. } => codes::NON_FINITE,
            AnovaError::Number(NumberError::NonFinite(_)) => codes::NON_FINITE,
            AnovaError::Number(NumberError::ParseError(_)) => codes::PARSE_ERROR,
            AnovaError::TooFewGroups { .. } => codes::TOO_FEW_GROUPS,
            AnovaError::SameGroup(_) => codes::SAME_GROUP,
            AnovaError::GroupIndexOutOfRange { .. } => codes::GROUP_INDEX,
            AnovaError::InvalidSignificance(_) => codes::SIGNIFICANCE,
            AnovaError::InvalidConfig(_) => codes::CONFIG,
            AnovaError::PairNotFound(..) => codes::PAIR_NOT_FOUND,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AnovaError::PairNotFound(..) => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AnovaError::NoGroups | AnovaError::EmptyGroup(_) => {
                Some("Every group needs at least one observation")
            }
            AnovaError::NonFiniteValue { .. } | AnovaError::Number(_) => {
                Some("Resolve missing or non-numeric cells before analysis")
            }
            AnovaError::TooFewGroups { .. } => Some("Add more groups to the dataset"),
            AnovaError::SameGroup(_) | AnovaError::GroupIndexOutOfRange { .. } => {
                Some("Group indices are 1-based and a pair needs two distinct groups")
            }
            AnovaError::InvalidSignificance(_) => {
                Some("Enter the confidence as a fraction, e.g. 0.95")
            }
            AnovaError::PairNotFound(..) => Some("This is a bug, please report it"),
            AnovaError::DuplicateGroup(_) | AnovaError::InvalidConfig(_) => None,
        }
    }
}
