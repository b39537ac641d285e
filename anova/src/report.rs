//! Structured analysis report
//!
//! Everything an external renderer needs: the statistics blocks, the
//! all-groups ANOVA table and one table per requested pair. Accessors only
//! read; the single exception is a pair query outside the requested set,
//! which is answered by a one-off computation that leaves the report as it
//! was.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;

use anova_core::{AnovaError, NumericPath};

use crate::config::{AnovaConfig, SignificanceLevel};
use crate::dataset::GroupDataset;
use crate::decomposition::DecompositionResult;
use crate::mirror::Mirrored;
use crate::pairwise::{names_of, GroupPair, PairComparison, PairRegistry};
use crate::statistics::GroupStatistics;

/// Label of the table covering every group
pub const ALL_GROUPS: &str = "all groups";

/// Source of variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Between,
    Within,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaRow {
    pub source: Source,
    pub sum_of_squares: Mirrored,
    pub dof: usize,
    pub mean_square: Mirrored,
}

/// Classic one-way ANOVA table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaTable {
    pub label: String,
    pub rows: Vec<AnovaRow>,
    pub f_ratio: Mirrored,
    pub critical_f: f64,
    pub p_value: f64,
}

impl AnovaTable {
    pub fn from_result(label: impl Into<String>, result: &DecompositionResult) -> Self {
        let row = |source, ss: &Mirrored, dof, ms: &Mirrored| AnovaRow {
            source,
            sum_of_squares: ss.clone(),
            dof,
            mean_square: ms.clone(),
        };
        Self {
            label: label.into(),
            rows: vec![
                row(Source::Between, &result.ss_between, result.dof.between, &result.ms_between),
                row(Source::Within, &result.ss_within, result.dof.within, &result.ms_within),
                row(Source::Total, &result.ss_total, result.dof.total, &result.ms_total),
            ],
            f_ratio: result.f_ratio.clone(),
            critical_f: result.critical_f(),
            p_value: result.p_value(),
        }
    }
}

/// Result bundle of one analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnovaReport {
    pub path: NumericPath,
    pub config: AnovaConfig,
    pub statistics: GroupStatistics,
    pub decomposition: DecompositionResult,
    pub pairs: PairRegistry,
    #[serde(skip)]
    pub(crate) dataset: Arc<GroupDataset>,
}

impl AnovaReport {
    pub fn dataset(&self) -> &GroupDataset {
        &self.dataset
    }

    /// Comparison of groups `i` and `j` (1-based, either order).
    ///
    /// Requested pairs come from the cache. With two groups the all-groups
    /// result is returned as is. Any other pair is computed on the spot.
    pub fn pair(&self, i: usize, j: usize) -> Result<Cow<'_, PairComparison>, AnovaError> {
        let pair = GroupPair::new(i, j, self.dataset.group_count())?;

        if self.dataset.group_count() == 2 {
            return Ok(Cow::Owned(PairComparison {
                pair,
                names: names_of(&self.dataset, pair),
                result: self.decomposition.clone(),
            }));
        }

        if self.pairs.covers(pair) {
            return self
                .pairs
                .get(pair)
                .map(Cow::Borrowed)
                .ok_or(AnovaError::PairNotFound(pair.first(), pair.second()));
        }

        let level = self.config.significance;
        PairComparison::compute(&self.dataset, pair, self.path, level).map(Cow::Owned)
    }

    /// Same analysis at another significance level. Critical F-ratios and
    /// confidence intervals are recomputed; everything else is carried over.
    pub fn with_significance(&self, level: SignificanceLevel) -> Self {
        let mut config = self.config.clone();
        config.significance = level;
        Self {
            path: self.path,
            config,
            statistics: self.statistics.with_significance(level),
            decomposition: self.decomposition.with_significance(level),
            pairs: self.pairs.with_significance(level),
            dataset: Arc::clone(&self.dataset),
        }
    }

    /// All-groups table followed by one table per requested pair
    pub fn tables(&self) -> Vec<AnovaTable> {
        let mut tables = vec![AnovaTable::from_result(ALL_GROUPS, &self.decomposition)];
        tables.extend(self.pairs.iter().map(|c| {
            let label = format!("{} vs {}", c.names.0, c.names.1);
            AnovaTable::from_result(label, &c.result)
        }));
        tables
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
