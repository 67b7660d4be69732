//! Small descriptive statistics shared by the summary and trend code.

/// Mean of a data slice, `None` when empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median of a data slice. Even-length input averages the two middle values.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Differences between consecutive values (`data[i] - data[i - 1]`).
///
/// A pair with a missing side yields no difference, so a gap costs the two
/// steps around it instead of bridging them.
pub fn successive_differences(data: &[Option<f64>]) -> Vec<f64> {
    data.windows(2)
        .filter_map(|w| match (w[0], w[1]) {
            (Some(prev), Some(next)) => Some(next - prev),
            _ => None,
        })
        .collect()
}
