use radar_core::{stats, ScoreResult, SentimentLabel};
use serde::Serialize;

pub const DEFAULT_HIGHLIGHT_COUNT: usize = 5;

/// Median of the non-zero intensities, `0.0` when there are none.
///
/// Articles scored exactly zero carry no signal and would drag the median
/// towards neutral, so they are left out.
pub fn median_intensity(results: &[ScoreResult]) -> f64 {
    let scores: Vec<f64> = results
        .iter()
        .map(|r| r.intensity)
        .filter(|&i| i != 0.0)
        .collect();
    stats::median(&scores).unwrap_or(0.0)
}

/// The `n` strongest results by absolute intensity. Ties keep input order.
pub fn highlights(results: &[ScoreResult], n: usize) -> Vec<ScoreResult> {
    let mut ranked: Vec<&ScoreResult> = results.iter().collect();
    ranked.sort_by(|a, b| {
        b.intensity
            .abs()
            .partial_cmp(&a.intensity.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.into_iter().take(n).cloned().collect()
}

/// Batch-level view used by the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub median_intensity: f64,
    pub label: SentimentLabel,
    pub scored_articles: usize,
    pub highlights: Vec<ScoreResult>,
}

impl SentimentSummary {
    pub fn from_results(results: &[ScoreResult], highlight_count: usize) -> Self {
        let median = median_intensity(results);
        Self {
            median_intensity: median,
            label: SentimentLabel::from_intensity(median),
            scored_articles: results.len(),
            highlights: highlights(results, highlight_count),
        }
    }
}
