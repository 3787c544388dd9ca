//! Utilities
//!
//! Small numeric helpers shared by the criteria, the splitter and the tree.

/// Join a list of items into a single comma separated string,
/// used when reporting the accepted values of a parameter.
pub fn items_to_strings(items: Vec<&str>) -> String {
    items.join(", ")
}

/// Arithmetic mean of a slice, NaN when the slice is empty.
pub fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return f64::NAN;
    }
    v.iter().sum::<f64>() / v.len() as f64
}

/// Distinct values of `v` in ascending order, along with how many
/// times each one occurs.
pub fn unique_counts(v: &[f64]) -> Vec<(f64, usize)> {
    let mut sorted = v.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for x in sorted {
        match counts.last_mut() {
            Some((last, c)) if *last == x => *c += 1,
            _ => counts.push((x, 1)),
        }
    }
    counts
}

/// Distinct values of `v` in ascending order.
pub fn unique_sorted(v: &[f64]) -> Vec<f64> {
    let mut sorted = v.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted
}

/// The most frequent value and its count.
/// Ties go to the smallest value, as distinct values are scanned in ascending order.
pub fn most_frequent(v: &[f64]) -> Option<(f64, usize)> {
    let mut best: Option<(f64, usize)> = None;
    for (value, count) in unique_counts(v) {
        match best {
            Some((_, c)) if c >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best
}

/// Majority vote over class labels, NaN when there are none.
pub fn majority_vote(y: &[f64]) -> f64 {
    most_frequent(y).map_or(f64::NAN, |(v, _)| v)
}

/// Round a number to a given precision.
pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}
