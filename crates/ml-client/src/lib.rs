pub mod error;
pub mod sentiment;

pub use error::{MLError, MLResult};
pub use sentiment::{SentimentClient, SentimentPrediction, SentimentResponse};

use std::time::Duration;

const DEFAULT_SENTIMENT_URL: &str = "http://localhost:8001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_TEXT_CHARS: usize = 2048;

/// Configuration for the polarity classifier service
#[derive(Debug, Clone)]
pub struct MLConfig {
    pub sentiment_url: String,
    pub timeout: Duration,
    /// Texts are cut to this many characters before being sent.
    pub max_text_chars: usize,
}

impl Default for MLConfig {
    fn default() -> Self {
        Self {
            sentiment_url: DEFAULT_SENTIMENT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
        }
    }
}

impl MLConfig {
    /// Read `ML_SENTIMENT_URL`, `ML_TIMEOUT_SECS` and `ML_MAX_TEXT_CHARS`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> MLResult<Self> {
        let defaults = Self::default();

        let sentiment_url = std::env::var("ML_SENTIMENT_URL").unwrap_or(defaults.sentiment_url);
        let timeout = match std::env::var("ML_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(v.trim().parse().map_err(|_| {
                MLError::InvalidConfig(format!("ML_TIMEOUT_SECS must be an integer, got '{}'", v))
            })?),
            Err(_) => defaults.timeout,
        };
        let max_text_chars = match std::env::var("ML_MAX_TEXT_CHARS") {
            Ok(v) => v.trim().parse().map_err(|_| {
                MLError::InvalidConfig(format!("ML_MAX_TEXT_CHARS must be an integer, got '{}'", v))
            })?,
            Err(_) => defaults.max_text_chars,
        };

        if max_text_chars == 0 {
            return Err(MLError::InvalidConfig("ML_MAX_TEXT_CHARS must be positive".to_string()));
        }

        Ok(Self {
            sentiment_url,
            timeout,
            max_text_chars,
        })
    }
}
