//! F-test significance

use serde::Serialize;

use anova_stats::distributions::{f_inv, f_upper_tail};

use crate::config::SignificanceLevel;
use crate::decomposition::DegreesOfFreedom;

/// Outcome of the F-test for one decomposition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Significance {
    /// P(F ≥ f_ratio) under the null hypothesis
    pub p_value: f64,
    /// F-ratio exceeded with probability alpha
    pub critical_f: f64,
    pub level: SignificanceLevel,
}

impl Significance {
    pub fn test(f_ratio: f64, dof: &DegreesOfFreedom, level: SignificanceLevel) -> Self {
        Self {
            p_value: p_value(f_ratio, dof),
            critical_f: critical_f(dof, level),
            level,
        }
    }

    /// Same test at another level; only the critical F-ratio changes
    pub fn at_level(&self, dof: &DegreesOfFreedom, level: SignificanceLevel) -> Self {
        Self {
            p_value: self.p_value,
            critical_f: critical_f(dof, level),
            level,
        }
    }

    /// Whether the null hypothesis of equal means is rejected. An undefined
    /// p-value never rejects.
    pub fn is_significant(&self) -> bool {
        self.p_value < self.level.alpha()
    }
}

/// Upper-tail probability of `f_ratio`; NaN when F or the within-group
/// degrees of freedom are degenerate
pub fn p_value(f_ratio: f64, dof: &DegreesOfFreedom) -> f64 {
    f_upper_tail(f_ratio, dof.between as f64, dof.within as f64)
}

/// F⁻¹(1 - alpha; between, within)
pub fn critical_f(dof: &DegreesOfFreedom, level: SignificanceLevel) -> f64 {
    f_inv(1.0 - level.alpha(), dof.between as f64, dof.within as f64)
}
