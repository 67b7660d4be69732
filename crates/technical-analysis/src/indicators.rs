/// Trailing mean over up to `window` values, one value per input.
///
/// The first `window - 1` entries average whatever history exists, so the
/// output has the same length as `data`. A zero window is treated as 1.
pub fn rolling_mean(data: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut result = Vec::with_capacity(data.len());
    let mut sum = 0.0;

    for i in 0..data.len() {
        sum += data[i];
        if i >= window {
            sum -= data[i - window];
        }
        let count = (i + 1).min(window);
        result.push(sum / count as f64);
    }
    result
}

/// Percentage change from `previous` to `current`, `None` if `previous` is zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}
