//! Per-group and grand descriptive statistics

use serde::Serialize;
use tracing::debug;

use anova_core::{AnovaError, Decimal, NumericPath, Precision};
use anova_stats::{
    location, mean_confidence_interval, moments, normal_probability_plot, ConfidenceInterval, Location, Moments,
    NormalPlot,
};

use crate::config::{AnovaConfig, SignificanceLevel};
use crate::dataset::{Group, GroupDataset};
use crate::mirror::Mirrored;

/// Label of the pooled statistics block
pub const GRAND: &str = "grand";

/// Descriptive statistics of one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStatistics {
    pub name: String,
    pub count: usize,
    pub mean: Mirrored,
    pub minimum: Mirrored,
    pub maximum: Mirrored,
    pub median: Mirrored,
    /// Σ(x - mean)²
    pub sum_of_squares: Mirrored,
    #[serde(flatten)]
    pub moments: Moments,
    pub confidence_interval: ConfidenceInterval,
    /// Absent below three observations
    pub normal_plot: Option<NormalPlot>,
}

fn narrow_location(loc: Location<Decimal>) -> (Location<f64>, [Mirrored; 5]) {
    let lower_quartile = Precision::to_f64(&loc.lower_quartile);
    let upper_quartile = Precision::to_f64(&loc.upper_quartile);
    let mirrored = [
        Mirrored::narrow(loc.mean),
        Mirrored::narrow(loc.minimum),
        Mirrored::narrow(loc.maximum),
        Mirrored::narrow(loc.median),
        Mirrored::narrow(loc.sum_of_squares),
    ];
    let narrowed = Location {
        mean: mirrored[0].float,
        minimum: mirrored[1].float,
        maximum: mirrored[2].float,
        median: mirrored[3].float,
        lower_quartile,
        upper_quartile,
        sum_of_squares: mirrored[4].float,
    };
    (narrowed, mirrored)
}

fn widen_location(loc: &Location<f64>) -> [Mirrored; 5] {
    [
        Mirrored::widen(loc.mean),
        Mirrored::widen(loc.minimum),
        Mirrored::widen(loc.maximum),
        Mirrored::widen(loc.median),
        Mirrored::widen(loc.sum_of_squares),
    ]
}

impl DescriptiveStatistics {
    /// Describe `group` with its location statistics from `path`
    pub fn describe(
        name: &str,
        group: &Group,
        path: NumericPath,
        config: &AnovaConfig,
    ) -> Result<Self, AnovaError> {
        let empty = || AnovaError::EmptyGroup(name.to_string());

        let (float_location, mirrored) = match path {
            NumericPath::Float => {
                let loc = location(group.floats()).ok_or_else(empty)?;
                let mirrored = widen_location(&loc);
                (loc, mirrored)
            }
            NumericPath::Decimal => narrow_location(location(group.decimals()).ok_or_else(empty)?),
        };
        let [mean, minimum, maximum, median, sum_of_squares] = mirrored;

        let moments = moments(group.floats(), &float_location, config.denominator);
        let confidence_interval = mean_confidence_interval(
            mean.float,
            moments.standard_error,
            group.len(),
            config.significance.alpha(),
        );

        Ok(Self {
            name: name.to_string(),
            count: group.len(),
            mean,
            minimum,
            maximum,
            median,
            sum_of_squares,
            moments,
            confidence_interval,
            normal_plot: normal_probability_plot(group.floats()),
        })
    }

    /// Same statistics with the confidence interval at another level
    pub fn with_significance(&self, level: SignificanceLevel) -> Self {
        Self {
            confidence_interval: mean_confidence_interval(
                self.mean.float,
                self.moments.standard_error,
                self.count,
                level.alpha(),
            ),
            ..self.clone()
        }
    }
}

/// Statistics of every group and of all observations pooled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStatistics {
    pub path: NumericPath,
    pub groups: Vec<DescriptiveStatistics>,
    pub grand: DescriptiveStatistics,
}

impl GroupStatistics {
    pub fn compute(dataset: &GroupDataset, path: NumericPath, config: &AnovaConfig) -> Result<Self, AnovaError> {
        let groups = dataset
            .iter()
            .map(|(name, group)| DescriptiveStatistics::describe(name, group, path, config))
            .collect::<Result<Vec<_>, _>>()?;
        let grand = DescriptiveStatistics::describe(GRAND, &dataset.pooled(), path, config)?;

        debug!(path = %path, groups = groups.len(), observations = grand.count, "group statistics");
        Ok(Self { path, groups, grand })
    }

    /// Statistics of the group named `name`
    pub fn group(&self, name: &str) -> Option<&DescriptiveStatistics> {
        self.groups.iter().find(|s| s.name == name)
    }

    /// Recompute only the confidence intervals
    pub fn with_significance(&self, level: SignificanceLevel) -> Self {
        Self {
            path: self.path,
            groups: self.groups.iter().map(|s| s.with_significance(level)).collect(),
            grand: self.grand.with_significance(level),
        }
    }
}
