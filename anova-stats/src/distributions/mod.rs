//! Continuous distributions used by the F-test and the group summaries

pub mod f;
pub mod normal;
pub mod t;

pub use f::{f_cdf, f_inv, f_pdf, f_upper_tail};
pub use normal::normal_quantile;
pub use t::{gamma_ln, regularized_incomplete_beta, t_cdf, t_inv, t_pdf};

const BISECTION_STEPS: usize = 300;

/// Invert an increasing CDF on `[0, inf)`.
///
/// The upper bracket doubles until it passes `p`, then the bracket is
/// bisected down to a relative width of about one ulp.
pub(crate) fn invert_on_half_line(cdf: impl Fn(f64) -> f64, p: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;

    while cdf(hi) < p {
        lo = hi;
        hi *= 2.0;
        if !hi.is_finite() {
            return f64::INFINITY;
        }
    }

    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-15 * hi {
            break;
        }
    }

    0.5 * (lo + hi)
}
