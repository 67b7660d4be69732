use radar_core::{stats, PricePoint};
use serde::Serialize;

/// Rows inspected at the end of the series.
pub const TREND_WINDOW: usize = 5;

/// Short-term price trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
    InsufficientData,
}

impl Trend {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Uptrend => "Tendência de alta",
            Trend::Downtrend => "Tendência de baixa",
            Trend::Sideways => "Tendência lateral ou indefinida",
            Trend::InsufficientData => "Dados insuficientes para análise de tendência",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Values the decision was taken on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendReading {
    pub trend: Trend,
    pub current_close: f64,
    /// `None` when the last row has no moving average.
    pub current_ma: Option<f64>,
    /// Mean step of the moving average; `None` without two adjacent averages.
    pub slope: Option<f64>,
}

/// Price vs moving average, confirmed by the moving-average slope.
#[derive(Debug, Clone, Copy)]
pub struct TrendClassifier {
    window: usize,
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self::new(TREND_WINDOW)
    }
}

impl TrendClassifier {
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1) }
    }

    pub fn classify(&self, points: &[PricePoint]) -> Trend {
        self.reading(points)
            .map(|r| r.trend)
            .unwrap_or(Trend::InsufficientData)
    }

    /// `None` when the series is empty or carries no moving average at all.
    ///
    /// Gaps inside the window only cost the steps around them. A last row
    /// without an average cannot be compared and reads as sideways.
    pub fn reading(&self, points: &[PricePoint]) -> Option<TrendReading> {
        if points.iter().all(|p| p.moving_average.is_none()) {
            return None;
        }
        let start = points.len().saturating_sub(self.window);
        let window = &points[start..];
        let last = window.last()?;

        let averages: Vec<Option<f64>> = window.iter().map(|p| p.moving_average).collect();
        let current_ma = last.moving_average;
        let current_close = last.close;
        let slope = stats::mean(&stats::successive_differences(&averages));

        // Strict inequalities on both sides: equality falls through to sideways.
        let trend = match (current_ma, slope) {
            (Some(ma), Some(s)) if current_close > ma && s > 0.0 => Trend::Uptrend,
            (Some(ma), Some(s)) if current_close < ma && s < 0.0 => Trend::Downtrend,
            _ => Trend::Sideways,
        };

        tracing::debug!(
            "Trend over {} rows: close={:.2} ma={:?} slope={:?} -> {:?}",
            window.len(),
            current_close,
            current_ma,
            slope,
            trend
        );

        Some(TrendReading {
            trend,
            current_close,
            current_ma,
            slope,
        })
    }
}
