//! F distribution functions

use super::invert_on_half_line;
use super::t::{gamma_ln, regularized_incomplete_beta};

fn valid_dof(d1: f64, d2: f64) -> bool {
    d1 > 0.0 && d2 > 0.0
}

/// F density
pub fn f_pdf(x: f64, d1: f64, d2: f64) -> f64 {
    if !valid_dof(d1, d2) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    if x == 0.0 {
        if d1 < 2.0 {
            return f64::INFINITY;
        } else if d1 == 2.0 {
            return 1.0;
        } else {
            return 0.0;
        }
    }

    let ln_beta = gamma_ln(d1 / 2.0) + gamma_ln(d2 / 2.0) - gamma_ln((d1 + d2) / 2.0);
    let ln_num = 0.5 * (d1 * (d1 * x).ln() + d2 * d2.ln() - (d1 + d2) * (d1 * x + d2).ln());
    (ln_num - x.ln() - ln_beta).exp()
}

/// F cumulative distribution
pub fn f_cdf(x: f64, d1: f64, d2: f64) -> f64 {
    if !valid_dof(d1, d2) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x.is_infinite() {
        return 1.0;
    }

    // F CDF = I_{d1*x/(d1*x+d2)}(d1/2, d2/2)
    let z = d1 * x / (d1 * x + d2);
    regularized_incomplete_beta(d1 / 2.0, d2 / 2.0, z)
}

/// Upper tail probability P(F > x).
///
/// Evaluated directly as I_{d2/(d2+d1*x)}(d2/2, d1/2) rather than as
/// `1 - f_cdf`, so small p-values keep their relative precision.
pub fn f_upper_tail(x: f64, d1: f64, d2: f64) -> f64 {
    if !valid_dof(d1, d2) || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    if x.is_infinite() {
        return 0.0;
    }

    let z = d2 / (d2 + d1 * x);
    regularized_incomplete_beta(d2 / 2.0, d1 / 2.0, z)
}

/// F quantile, NaN outside `0 < p < 1` or for non-positive degrees of freedom
pub fn f_inv(p: f64, d1: f64, d2: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) || !valid_dof(d1, d2) {
        return f64::NAN;
    }
    invert_on_half_line(|x| f_cdf(x, d1, d2), p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f_cdf() {
        // F(1, 5, 10) ≈ 0.5349
        assert!((f_cdf(1.0, 5.0, 10.0) - 0.5348805734621996).abs() < 1e-10);
        assert_eq!(f_cdf(-1.0, 5.0, 10.0), 0.0);
    }

    #[test]
    fn test_upper_tail_closed_form() {
        // d1 = 2, d2 = 6: P(F > x) = (1 + x/3)^-3
        assert!((f_upper_tail(27.0, 2.0, 6.0) - 0.001).abs() < 1e-15);
        assert!((f_upper_tail(2.5, 3.0, 10.0) - 0.11903956265827815).abs() < 1e-10);
    }

    #[test]
    fn test_upper_tail_edges() {
        assert_eq!(f_upper_tail(0.0, 2.0, 6.0), 1.0);
        assert_eq!(f_upper_tail(f64::INFINITY, 2.0, 6.0), 0.0);
        assert!(f_upper_tail(f64::NAN, 2.0, 6.0).is_nan());
        assert!(f_upper_tail(3.0, 2.0, 0.0).is_nan());
    }

    #[test]
    fn test_f_inv_table_values() {
        assert!((f_inv(0.95, 2.0, 6.0) - 5.143252849784720).abs() < 1e-8);
        assert!((f_inv(0.95, 3.0, 10.0) - 3.708264819046844).abs() < 1e-8);
        assert!((f_inv(0.95, 1.0, 1.0) - 161.4476387975885).abs() < 1e-6);
    }

    #[test]
    fn test_f_inv_inverts_cdf() {
        let x = f_inv(0.8, 4.0, 12.0);
        assert!((f_cdf(x, 4.0, 12.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_f_pdf() {
        // d1 = 2, d2 = 6: pdf(x) = (1 + x/3)^-4
        assert!((f_pdf(3.0, 2.0, 6.0) - 1.0 / 16.0).abs() < 1e-12);
        assert_eq!(f_pdf(0.0, 2.0, 6.0), 1.0);
        assert_eq!(f_pdf(-1.0, 2.0, 6.0), 0.0);
    }
}
