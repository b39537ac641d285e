//! Helper functions for statistical operations
//!
//! Order and location helpers shared by both numeric paths.

use std::cmp::Ordering;

use anova_core::Precision;

/// Calculate sum of values
pub fn sum<P: Precision>(values: &[P]) -> P {
    values.iter().fold(P::zero(), |acc, v| acc.add(v))
}

/// Calculate mean of values, `None` for an empty slice
pub fn mean<P: Precision>(values: &[P]) -> Option<P> {
    if values.is_empty() {
        return None;
    }
    sum(values).ratio(&P::from_count(values.len()))
}

/// Sum of squared deviations from `centre`
pub fn sum_of_squares<P: Precision>(values: &[P], centre: &P) -> P {
    values.iter().fold(P::zero(), |acc, v| {
        let dev = v.sub(centre);
        acc.add(&dev.mul(&dev))
    })
}

/// Sort values (returns new sorted vector)
pub fn sorted<P: Precision>(values: &[P]) -> Vec<P> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Quartile `k` (0..=4) of already sorted values using linear interpolation.
///
/// rank = k * (n - 1) / 4, so the interpolation weight is always a whole
/// number of quarters and stays exact on the decimal path.
pub fn quartile_sorted<P: Precision>(sorted: &[P], k: usize) -> Option<P> {
    let n = sorted.len();
    if n == 0 || k > 4 {
        return None;
    }

    let scaled = k * (n - 1);
    let floor_idx = scaled / 4;
    let quarters = scaled % 4;

    if quarters == 0 {
        return Some(sorted[floor_idx].clone());
    }

    let lower = &sorted[floor_idx];
    let upper = &sorted[floor_idx + 1];
    let frac = P::from_count(quarters).ratio(&P::from_count(4))?;
    Some(lower.add(&upper.sub(lower).mul(&frac)))
}

/// Median of already sorted values
pub fn median_sorted<P: Precision>(sorted: &[P]) -> Option<P> {
    quartile_sorted(sorted, 2)
}
