use radar_core::{PriceBar, PricePoint};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::indicators::{percent_change, rolling_mean};

const DEFAULT_MA_WINDOW: usize = 20;
const DEFAULT_INTERVAL: &str = "1d";

/// Chart period selectable for an asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    #[default]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::Max => "max",
        }
    }

    /// Moving-average window in bars; longer periods smooth over more history.
    pub fn moving_average_window(&self) -> usize {
        match self {
            Period::FiveDays => 3,
            Period::OneMonth => 10,
            Period::ThreeMonths => 20,
            Period::SixMonths => 30,
            Period::OneYear => 50,
            Period::TwoYears => 100,
            Period::FiveYears => 200,
            Period::Max => 300,
        }
    }

    /// Bar interval to request so long periods stay light.
    pub fn bar_interval(&self) -> &'static str {
        match self {
            Period::FiveDays | Period::OneMonth | Period::ThreeMonths => "1d",
            Period::SixMonths | Period::OneYear => "1wk",
            Period::TwoYears | Period::FiveYears | Period::Max => "1mo",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5d" => Ok(Period::FiveDays),
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "5y" => Ok(Period::FiveYears),
            "max" => Ok(Period::Max),
            other => Err(format!("unknown period '{}'", other)),
        }
    }
}

/// Moving-average window for a period string, 20 for unknown periods.
pub fn moving_average_window(period: &str) -> usize {
    period
        .parse::<Period>()
        .map(|p| p.moving_average_window())
        .unwrap_or(DEFAULT_MA_WINDOW)
}

/// Bar interval for a period string, daily for unknown periods.
pub fn bar_interval(period: &str) -> &'static str {
    period
        .parse::<Period>()
        .map(|p| p.bar_interval())
        .unwrap_or(DEFAULT_INTERVAL)
}

/// Price rows ascending by date, every row with a close
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// Build from raw bars, dropping rows without a close.
    ///
    /// With `ma_window`, the moving average is recomputed over the closes;
    /// without it, the bars' own `moving_average` values are kept.
    pub fn from_bars(bars: &[PriceBar], ma_window: Option<usize>) -> Self {
        let total = bars.len();
        let points: Vec<PricePoint> = bars
            .iter()
            .filter_map(|bar| PricePoint::try_from(bar).ok())
            .collect();

        let dropped = total - points.len();
        if dropped > 0 {
            tracing::debug!("Dropped {} of {} price rows without a close", dropped, total);
        }

        let mut series = Self::new(points);
        if let Some(window) = ma_window {
            series.apply_moving_average(window);
        }
        series
    }

    fn apply_moving_average(&mut self, window: usize) {
        let averages = rolling_mean(&self.closes(), window);
        for (point, ma) in self.points.iter_mut().zip(averages) {
            point.moving_average = Some(ma);
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Last `n` rows (all of them if the series is shorter).
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}

/// Latest close and its change against the previous close
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub current_price: f64,
    pub change_percent: f64,
}

impl PriceSnapshot {
    /// `None` on an empty series. A single row reports no change.
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let [.., previous, current] = series.tail(2) else {
            return series.points().last().map(|p| Self {
                current_price: p.close,
                change_percent: 0.0,
            });
        };

        Some(Self {
            current_price: current.close,
            change_percent: percent_change(previous.close, current.close).unwrap_or(0.0),
        })
    }
}
