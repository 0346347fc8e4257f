//! The overflow-count math. Pure functions over cached widths.

/// Returns how many leading items fit in `available_width` while keeping at least `threshold`
/// of spare width.
///
/// Items are walked in order; the walk stops at the first item whose cumulative width leaves
/// strictly less than `threshold`. Leaving exactly `threshold` keeps the item.
///
/// A NaN `available_width` is treated as `0.0`.
pub fn renderable_count(widths: &[f64], available_width: f64, threshold: f64) -> usize {
    let available_width = if available_width.is_nan() {
        0.0
    } else {
        available_width
    };

    let mut accumulated = 0.0;
    let mut renderable = 0usize;
    for &width in widths {
        accumulated += width;
        if available_width - accumulated < threshold {
            break;
        }
        renderable += 1;
    }
    renderable
}

/// Returns `k`: how many trailing items must collapse into the overflow list.
///
/// Always in `0..=widths.len()`. Shrinking `available_width` never decreases the result.
pub fn collapse_count(widths: &[f64], available_width: f64, threshold: f64) -> usize {
    widths.len() - renderable_count(widths, available_width, threshold)
}

/// Total captured width plus `threshold`: roughly the available width needed to show every item.
pub fn required_width(widths: &[f64], threshold: f64) -> f64 {
    widths.iter().sum::<f64>() + threshold
}
