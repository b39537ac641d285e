//! Descriptive statistics for one sample
//!
//! Location and order statistics are generic over [`Precision`] so the
//! decimal path keeps them exact. Dispersion, shape and interval statistics
//! need square roots and distribution quantiles and are computed in `f64`.

use serde::{Deserialize, Serialize};

use anova_core::Precision;

use crate::distributions::t_inv;
use crate::helpers::{mean, quartile_sorted, sorted, sum_of_squares};

/// Divisor used for variance and standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Denominator {
    /// Population form, divide by n
    #[serde(rename = "n")]
    N,
    /// Sample form, divide by n - 1
    #[default]
    #[serde(rename = "n-1")]
    NMinusOne,
}

impl Denominator {
    pub fn divisor(&self, n: usize) -> f64 {
        match self {
            Denominator::N => n as f64,
            Denominator::NMinusOne => n as f64 - 1.0,
        }
    }
}

/// Statistics that exist in either numeric form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location<P> {
    pub mean: P,
    pub minimum: P,
    pub maximum: P,
    pub median: P,
    pub lower_quartile: P,
    pub upper_quartile: P,
    /// Σ(x - mean)²
    pub sum_of_squares: P,
}

/// Location statistics of a sample, `None` when it is empty
pub fn location<P: Precision>(values: &[P]) -> Option<Location<P>> {
    let sorted = sorted(values);
    let mean = mean(values)?;
    let sum_of_squares = sum_of_squares(values, &mean);
    Some(Location {
        minimum: sorted.first()?.clone(),
        maximum: sorted.last()?.clone(),
        median: quartile_sorted(&sorted, 2)?,
        lower_quartile: quartile_sorted(&sorted, 1)?,
        upper_quartile: quartile_sorted(&sorted, 3)?,
        sum_of_squares,
        mean,
    })
}

/// Dispersion and shape statistics
///
/// Undefined values (a single observation under the n - 1 divisor, a
/// constant sample) come out as NaN rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub standard_deviation: f64,
    pub standard_error: f64,
    pub variance: f64,
    /// m3 / sd³
    pub moment_skewness: f64,
    /// 3 (mean - median) / sd
    pub median_skewness: f64,
    /// (Q3 - 2 Q2 + Q1) / (Q3 - Q1)
    pub quartile_skewness: f64,
    /// m4 / sd⁴
    pub kurtosis: f64,
    /// kurtosis - 3
    pub excess_kurtosis: f64,
}

/// Dispersion and shape of `values` around an already computed location.
///
/// `location` may come from the decimal path, narrowed to `f64`.
pub fn moments(values: &[f64], location: &Location<f64>, denominator: Denominator) -> Moments {
    let n = values.len();
    let divisor = denominator.divisor(n);
    let m = location.mean;

    let (mut s2, mut s3, mut s4) = (0.0, 0.0, 0.0);
    for &x in values {
        let d = x - m;
        let d2 = d * d;
        s2 += d2;
        s3 += d2 * d;
        s4 += d2 * d2;
    }

    let variance = s2 / divisor;
    let sd = variance.sqrt();
    let kurtosis = (s4 / divisor) / (variance * variance);

    let (q1, q2, q3) = (location.lower_quartile, location.median, location.upper_quartile);

    Moments {
        standard_deviation: sd,
        standard_error: sd / (n as f64).sqrt(),
        variance,
        moment_skewness: (s3 / divisor) / (sd * sd * sd),
        median_skewness: 3.0 * (m - location.median) / sd,
        quartile_skewness: (q3 - 2.0 * q2 + q1) / (q3 - q1),
        kurtosis,
        excess_kurtosis: kurtosis - 3.0,
    }
}

/// Two-sided interval for the mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Student-t interval for the mean at upper-tail probability `alpha`
/// split over both tails, with n - 1 degrees of freedom.
pub fn mean_confidence_interval(mean: f64, standard_error: f64, n: usize, alpha: f64) -> ConfidenceInterval {
    let t = t_inv(1.0 - alpha / 2.0, n as f64 - 1.0);
    let margin = t * standard_error;
    ConfidenceInterval {
        lower: mean - margin,
        upper: mean + margin,
    }
}
