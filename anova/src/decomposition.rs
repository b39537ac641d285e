//! Variance decomposition
//!
//! A single routine generic over [`Precision`] computes the group means and
//! the grand mean first, then the three deviation sums:
//!
//! ```text
//! SS_within  = Σ_i Σ_j (x_ij - mean_i)²
//! SS_between = Σ_i n_i (mean_i - grand_mean)²
//! SS_total   = Σ_i Σ_j (x_ij - grand_mean)²
//! ```
//!
//! `SS_total` is accumulated on its own, so `SS_total = SS_between + SS_within`
//! is a checked property rather than a definition. On the decimal path it
//! holds exactly whenever every group mean divides exactly.

use serde::Serialize;
use tracing::{debug, warn};

use anova_core::{AnovaError, Decimal, NumericPath, Precision};
use anova_stats::helpers::{mean, sum, sum_of_squares};

use crate::config::SignificanceLevel;
use crate::dataset::GroupDataset;
use crate::mirror::{cross_check, Mirrored, RATIO_TOLERANCE, SUM_TOLERANCE};
use crate::significance::Significance;

/// Degrees of freedom of a one-way layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreesOfFreedom {
    /// N - 1
    pub total: usize,
    /// G - 1
    pub between: usize,
    /// N - G
    pub within: usize,
}

impl DegreesOfFreedom {
    /// For `observations` values in `groups` non-empty groups
    pub fn new(observations: usize, groups: usize) -> Self {
        Self {
            total: observations.saturating_sub(1),
            between: groups.saturating_sub(1),
            within: observations.saturating_sub(groups),
        }
    }
}

/// Decomposition figures in one numeric form.
///
/// A ratio is `None` where the form cannot represent it (decimal division
/// by zero). In `f64` every ratio is `Some`, possibly NaN or infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct Figures<P> {
    pub grand_mean: P,
    pub ss_total: P,
    pub ss_between: P,
    pub ss_within: P,
    pub ms_total: Option<P>,
    pub ms_between: Option<P>,
    pub ms_within: Option<P>,
    pub f_ratio: Option<P>,
}

/// Decompose the variability of `groups` into between- and within-group parts
pub fn decompose<P: Precision>(groups: &[&[P]]) -> Result<(DegreesOfFreedom, Figures<P>), AnovaError> {
    if groups.len() < 2 {
        return Err(AnovaError::TooFewGroups {
            operation: "variance decomposition",
            required: 2,
            actual: groups.len(),
        });
    }

    let mut means = Vec::with_capacity(groups.len());
    let mut grand_total = P::zero();
    let mut observations = 0;
    for (i, &group) in groups.iter().enumerate() {
        let Some(group_mean) = mean(group) else {
            return Err(AnovaError::EmptyGroup(format!("#{}", i + 1)));
        };
        means.push(group_mean);
        grand_total = grand_total.add(&sum(group));
        observations += group.len();
    }
    let Some(grand_mean) = grand_total.ratio(&P::from_count(observations)) else {
        return Err(AnovaError::NoGroups);
    };

    let mut ss_total = P::zero();
    let mut ss_between = P::zero();
    let mut ss_within = P::zero();
    for (&group, group_mean) in groups.iter().zip(&means) {
        ss_within = ss_within.add(&sum_of_squares(group, group_mean));
        ss_total = ss_total.add(&sum_of_squares(group, &grand_mean));
        let dev = group_mean.sub(&grand_mean);
        ss_between = ss_between.add(&P::from_count(group.len()).mul(&dev.mul(&dev)));
    }

    let dof = DegreesOfFreedom::new(observations, groups.len());
    let ms_total = ss_total.ratio(&P::from_count(dof.total));
    let ms_between = ss_between.ratio(&P::from_count(dof.between));
    let ms_within = ss_within.ratio(&P::from_count(dof.within));
    let f_ratio = match (&ms_between, &ms_within) {
        (Some(b), Some(w)) => b.ratio(w),
        _ => None,
    };

    let figures = Figures {
        grand_mean,
        ss_total,
        ss_between,
        ss_within,
        ms_total,
        ms_between,
        ms_within,
        f_ratio,
    };
    Ok((dof, figures))
}

/// Decomposition of one dataset with its F-test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompositionResult {
    /// Numeric path that produced the authoritative figures
    pub path: NumericPath,
    pub groups: usize,
    pub observations: usize,
    pub dof: DegreesOfFreedom,
    pub grand_mean: Mirrored,
    pub ss_total: Mirrored,
    pub ss_between: Mirrored,
    pub ss_within: Mirrored,
    pub ms_total: Mirrored,
    pub ms_between: Mirrored,
    pub ms_within: Mirrored,
    pub f_ratio: Mirrored,
    pub significance: Significance,
}

impl DecompositionResult {
    /// Decompose `dataset` in `path` and test at `level`
    pub fn compute(dataset: &GroupDataset, path: NumericPath, level: SignificanceLevel) -> Result<Self, AnovaError> {
        let (dof, float_figures) = decompose(&dataset.float_groups())?;

        let result = match path {
            NumericPath::Float => Self::from_float(dof, float_figures, level),
            NumericPath::Decimal => {
                let (_, figures) = decompose(&dataset.decimal_groups())?;
                let result = Self::from_decimal(dof, figures, level);
                result.check_against(&float_figures);
                result
            }
        };

        result.check_identity();

        debug!(
            path = %path,
            groups = result.groups,
            observations = result.observations,
            dof_within = dof.within,
            f = result.f_ratio.float,
            "variance decomposition"
        );
        Ok(result)
    }

    fn assemble(
        path: NumericPath,
        dof: DegreesOfFreedom,
        values: [Mirrored; 8],
        level: SignificanceLevel,
    ) -> Self {
        let [grand_mean, ss_total, ss_between, ss_within, ms_total, ms_between, ms_within, f_ratio] = values;
        let significance = Significance::test(f_ratio.float, &dof, level);
        Self {
            path,
            groups: dof.between + 1,
            observations: dof.total + 1,
            dof,
            grand_mean,
            ss_total,
            ss_between,
            ss_within,
            ms_total,
            ms_between,
            ms_within,
            f_ratio,
            significance,
        }
    }

    fn from_float(dof: DegreesOfFreedom, fig: Figures<f64>, level: SignificanceLevel) -> Self {
        let ratio = |r: Option<f64>| Mirrored::widen(r.unwrap_or(f64::NAN));
        let values = [
            Mirrored::widen(fig.grand_mean),
            Mirrored::widen(fig.ss_total),
            Mirrored::widen(fig.ss_between),
            Mirrored::widen(fig.ss_within),
            ratio(fig.ms_total),
            ratio(fig.ms_between),
            ratio(fig.ms_within),
            ratio(fig.f_ratio),
        ];
        Self::assemble(NumericPath::Float, dof, values, level)
    }

    fn from_decimal(dof: DegreesOfFreedom, fig: Figures<Decimal>, level: SignificanceLevel) -> Self {
        let ss_total = Mirrored::narrow(fig.ss_total);
        let ss_between = Mirrored::narrow(fig.ss_between);
        let ss_within = Mirrored::narrow(fig.ss_within);
        let ms_total = Mirrored::narrow_ratio(fig.ms_total, ss_total.float, dof.total as f64);
        let ms_between = Mirrored::narrow_ratio(fig.ms_between, ss_between.float, dof.between as f64);
        let ms_within = Mirrored::narrow_ratio(fig.ms_within, ss_within.float, dof.within as f64);
        let f_ratio = Mirrored::narrow_ratio(fig.f_ratio, ms_between.float, ms_within.float);
        let values = [
            Mirrored::narrow(fig.grand_mean),
            ss_total,
            ss_between,
            ss_within,
            ms_total,
            ms_between,
            ms_within,
            f_ratio,
        ];
        Self::assemble(NumericPath::Decimal, dof, values, level)
    }

    /// `SS_total` against `SS_between + SS_within`, in the narrowed form
    fn check_identity(&self) -> bool {
        let total = self.ss_total.float;
        let parts = self.ss_between.float + self.ss_within.float;
        if !total.is_finite() || !parts.is_finite() {
            return true;
        }
        let holds = (total - parts).abs() <= SUM_TOLERANCE * total.abs().max(parts.abs());
        if !holds {
            warn!(path = %self.path, ss_total = total, ss_parts = parts, "sum of squares identity fails");
        }
        holds
    }

    /// Compare narrowed decimal figures with an end-to-end float run
    fn check_against(&self, float: &Figures<f64>) -> bool {
        let ss_scale = self.ss_total.float;
        let ms_scale = self.ms_total.float;
        let checks = [
            cross_check("ss_total", self.ss_total.float, float.ss_total, ss_scale, SUM_TOLERANCE),
            cross_check("ss_between", self.ss_between.float, float.ss_between, ss_scale, SUM_TOLERANCE),
            cross_check("ss_within", self.ss_within.float, float.ss_within, ss_scale, SUM_TOLERANCE),
            cross_check(
                "ms_between",
                self.ms_between.float,
                float.ms_between.unwrap_or(f64::NAN),
                ms_scale,
                SUM_TOLERANCE,
            ),
            cross_check(
                "ms_within",
                self.ms_within.float,
                float.ms_within.unwrap_or(f64::NAN),
                ms_scale,
                SUM_TOLERANCE,
            ),
            cross_check(
                "f_ratio",
                self.f_ratio.float,
                float.f_ratio.unwrap_or(f64::NAN),
                self.f_ratio.float,
                RATIO_TOLERANCE,
            ),
        ];
        checks.iter().all(|ok| *ok)
    }

    /// Same decomposition tested at another level. Only the critical
    /// F-ratio is recomputed.
    pub fn with_significance(&self, level: SignificanceLevel) -> Self {
        Self {
            significance: self.significance.at_level(&self.dof, level),
            ..self.clone()
        }
    }

    pub fn p_value(&self) -> f64 {
        self.significance.p_value
    }

    pub fn critical_f(&self) -> f64 {
        self.significance.critical_f
    }
}
