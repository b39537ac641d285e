//! One-way analysis entry point

use std::sync::Arc;

use tracing::debug;

use anova_core::{AnovaError, NumericPath};

use crate::config::AnovaConfig;
use crate::dataset::GroupDataset;
use crate::decomposition::DecompositionResult;
use crate::pairwise::PairRegistry;
use crate::report::AnovaReport;
use crate::statistics::GroupStatistics;

/// A validated dataset and configuration, ready to run
#[derive(Debug, Clone)]
pub struct OneWayAnova {
    dataset: Arc<GroupDataset>,
    config: AnovaConfig,
    path: NumericPath,
}

impl OneWayAnova {
    /// Validate `config` against `dataset` and resolve the numeric path
    pub fn new(dataset: GroupDataset, config: AnovaConfig) -> Result<Self, AnovaError> {
        config.comparison.members(dataset.group_count())?;
        let path = config.precision.resolve(dataset.source());
        Ok(Self {
            dataset: Arc::new(dataset),
            config,
            path,
        })
    }

    pub fn dataset(&self) -> &GroupDataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnovaConfig {
        &self.config
    }

    /// Numeric path the analysis runs in
    pub fn path(&self) -> NumericPath {
        self.path
    }

    /// Descriptive statistics only; valid for a single group
    pub fn statistics(&self) -> Result<GroupStatistics, AnovaError> {
        GroupStatistics::compute(&self.dataset, self.path, &self.config)
    }

    /// Decomposition and F-test only, without descriptive statistics
    pub fn decomposition(&self) -> Result<DecompositionResult, AnovaError> {
        DecompositionResult::compute(&self.dataset, self.path, self.config.significance)
    }

    /// Full analysis: statistics, decomposition and requested pairs
    pub fn run(&self) -> Result<AnovaReport, AnovaError> {
        let statistics = self.statistics()?;
        let decomposition = self.decomposition()?;
        let pairs = PairRegistry::build(&self.dataset, &self.config.comparison, self.path, self.config.significance)?;

        debug!(
            path = %self.path,
            groups = decomposition.groups,
            pairs = pairs.len(),
            significant = decomposition.significance.is_significant(),
            "one-way analysis complete"
        );

        Ok(AnovaReport {
            path: self.path,
            config: self.config.clone(),
            statistics,
            decomposition,
            pairs,
            dataset: Arc::clone(&self.dataset),
        })
    }
}
