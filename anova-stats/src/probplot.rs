//! Gaussian probability plot
//!
//! Sorted observations are plotted against the standard normal quantiles of
//! Filliben's order-statistic medians. A least-squares line through the
//! points estimates the location and scale; the correlation of the data with
//! the fitted order-statistic medians measures normality.

use serde::Serialize;

use crate::distributions::normal_quantile;
use crate::helpers::sorted;

/// Fewest observations for which a plot is fitted
pub const MIN_PLOT_POINTS: usize = 3;

/// Fitted normal probability plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalPlot {
    /// Correlation between data and fitted order-statistic medians
    pub correlation: f64,
    pub gradient: f64,
    pub intercept: f64,
    /// Location estimate (mu)
    pub mu: f64,
    /// Scale estimate (sigma)
    pub sigma: f64,
}

/// Filliben estimates of the uniform order-statistic medians
fn filliben_medians(n: usize) -> Vec<f64> {
    let nf = n as f64;
    let last = 0.5_f64.powf(1.0 / nf);
    (0..n)
        .map(|i| {
            if i == 0 {
                1.0 - last
            } else if i == n - 1 {
                last
            } else {
                (i as f64 + 1.0 - 0.3175) / (nf + 0.365)
            }
        })
        .collect()
}

/// Least-squares line y = intercept + gradient * x, with correlation r
fn linear_fit(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let gradient = sxy / sxx;
    let intercept = y_mean - gradient * x_mean;
    let r = sxy / (sxx * syy).sqrt();
    (intercept, gradient, r)
}

/// Fit a normal probability plot, `None` below [`MIN_PLOT_POINTS`] observations
pub fn normal_probability_plot(values: &[f64]) -> Option<NormalPlot> {
    let n = values.len();
    if n < MIN_PLOT_POINTS {
        return None;
    }

    let data = sorted(values);
    let z: Vec<f64> = filliben_medians(n).into_iter().map(normal_quantile).collect();

    let (mu, sigma, _) = linear_fit(&z, &data);

    let fitted: Vec<f64> = z.iter().map(|zi| mu + sigma * zi).collect();
    let (intercept, gradient, correlation) = linear_fit(&fitted, &data);

    Some(NormalPlot {
        correlation,
        gradient,
        intercept,
        mu,
        sigma,
    })
}
