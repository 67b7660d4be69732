use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::RadarError;

/// Intensity strictly above this value is labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Intensity strictly below this value is labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// News record as delivered by the feed, before validation.
///
/// Feeds disagree on key names, so both the English and the Portuguese
/// spellings are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default, alias = "titulo")]
    pub title: Option<String>,
    #[serde(default, alias = "resumo", alias = "description")]
    pub summary: Option<String>,
    #[serde(default, alias = "asset_ticker", alias = "cod")]
    pub ticker: Option<String>,
    #[serde(default, alias = "fonte")]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawArticle {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            summary: Some(summary.into()),
            ..Default::default()
        }
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }
}

/// Validated news article. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub asset_ticker: Option<String>,
}

impl Article {
    /// Validate a raw record, reporting its position in the batch on failure.
    pub fn from_raw(index: usize, raw: &RawArticle) -> Result<Self, RadarError> {
        let title = raw
            .title
            .clone()
            .ok_or(RadarError::MalformedArticle { index, field: "title" })?;
        let summary = raw
            .summary
            .clone()
            .ok_or(RadarError::MalformedArticle { index, field: "summary" })?;

        Ok(Self {
            title,
            summary,
            asset_ticker: raw.ticker.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    /// Title and summary joined by a single space, untouched.
    pub fn original_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// Sector metadata for the asset an article talks about.
/// Empty strings mean the ticker could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetContext {
    pub sector: String,
    pub subsector: String,
}

impl AssetContext {
    pub fn new(sector: impl Into<String>, subsector: impl Into<String>) -> Self {
        Self {
            sector: sector.into(),
            subsector: subsector.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.sector.is_empty()
    }
}

/// Asset catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub ticker: String,
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "SETOR")]
    pub sector: String,
    #[serde(default, alias = "SUBSETOR")]
    pub subsector: String,
    #[serde(default, alias = "SEGMENTO")]
    pub segment: String,
}

impl AssetRecord {
    pub fn context(&self) -> AssetContext {
        AssetContext::new(self.sector.clone(), self.subsector.clone())
    }

    /// Ticker without the exchange suffix (`PETR4.SA` -> `PETR4`).
    pub fn base_code(&self) -> &str {
        self.ticker.split('.').next().unwrap_or(&self.ticker)
    }
}

/// Three-way output of the base polarity classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarityLabel {
    Negative,
    Neutral,
    Positive,
}

impl PolarityLabel {
    /// Signed unit value: -1, 0 or +1.
    pub fn unit_value(&self) -> f64 {
        match self {
            PolarityLabel::Negative => -1.0,
            PolarityLabel::Neutral => 0.0,
            PolarityLabel::Positive => 1.0,
        }
    }

    /// Parse a classifier label. Unknown labels count as neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "positivo" | "pos" => PolarityLabel::Positive,
            "negative" | "negativo" | "neg" => PolarityLabel::Negative,
            _ => PolarityLabel::Neutral,
        }
    }
}

/// Categorical classifier output plus its confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseSignal {
    pub label: PolarityLabel,
    pub confidence: f64, // 0.0 to 1.0
}

impl BaseSignal {
    pub fn new(label: PolarityLabel, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { label, confidence }
    }

    pub fn neutral() -> Self {
        Self::new(PolarityLabel::Neutral, 0.0)
    }

    /// Confidence-scaled signed value in [-1, 1].
    pub fn scalar(&self) -> f64 {
        self.label.unit_value() * self.confidence
    }
}

/// Final sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Positivo")]
    Positive,
    #[serde(rename = "Negativo")]
    Negative,
    #[serde(rename = "Neutro")]
    Neutral,
}

impl SentimentLabel {
    /// Symmetric deadband: both boundaries are neutral.
    pub fn from_intensity(intensity: f64) -> Self {
        if intensity > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if intensity < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positivo",
            SentimentLabel::Negative => "Negativo",
            SentimentLabel::Neutral => "Neutro",
        }
    }

    /// Single-character marker for plain-text listings.
    pub fn marker(&self) -> char {
        match self {
            SentimentLabel::Positive => '+',
            SentimentLabel::Negative => '-',
            SentimentLabel::Neutral => '=',
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scored article. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub original_text: String,
    pub label: SentimentLabel,
    pub intensity: f64, // -1.0 to 1.0
}

impl ScoreResult {
    pub fn new(original_text: String, intensity: f64) -> Self {
        Self {
            original_text,
            label: SentimentLabel::from_intensity(intensity),
            intensity,
        }
    }
}

/// Raw price row as delivered by the price feed. Any numeric field may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub moving_average: Option<f64>,
}

/// Price row with a guaranteed close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
    pub moving_average: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64, moving_average: Option<f64>) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
            moving_average,
        }
    }
}

impl TryFrom<&PriceBar> for PricePoint {
    type Error = RadarError;

    fn try_from(bar: &PriceBar) -> Result<Self, Self::Error> {
        let close = bar
            .close
            .filter(|c| c.is_finite())
            .ok_or_else(|| RadarError::InvalidData(format!("no close on {}", bar.date)))?;

        Ok(Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close,
            volume: bar.volume,
            moving_average: bar.moving_average,
        })
    }
}
