use async_trait::async_trait;
use radar_core::{BaseSignal, PolarityClassifier, PolarityLabel, RadarError};
use serde::{Deserialize, Serialize};

use crate::error::{MLError, MLResult};
use crate::MLConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: String,
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub negative: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub score: f64,
}

impl SentimentPrediction {
    /// Map the service output onto the engine's base signal. When the service
    /// omits `confidence`, the largest class probability is used.
    pub fn to_base_signal(&self) -> BaseSignal {
        let confidence = self
            .confidence
            .unwrap_or_else(|| self.positive.max(self.negative).max(self.neutral));
        BaseSignal::new(PolarityLabel::from_label(&self.label), confidence)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub predictions: Vec<SentimentPrediction>,
    #[serde(default)]
    pub processing_time_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
struct SentimentRequest {
    texts: Vec<String>,
    symbol: Option<String>,
    use_cache: bool,
}

/// HTTP client for a FinBERT-style polarity service
#[derive(Clone)]
pub struct SentimentClient {
    client: reqwest::Client,
    base_url: String,
    max_text_chars: usize,
}

impl SentimentClient {
    pub fn new(config: &MLConfig) -> MLResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.sentiment_url.trim_end_matches('/').to_string(),
            max_text_chars: config.max_text_chars,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Predict sentiment for text(s)
    pub async fn predict(&self, texts: Vec<String>) -> MLResult<SentimentResponse> {
        let request = SentimentRequest {
            texts: texts
                .into_iter()
                .map(|t| clip_chars(&t, self.max_text_chars))
                .collect(),
            symbol: None,
            use_cache: true,
        };

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MLError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        // Decode failures mean the payload, not the transport, is broken.
        let result = response.json::<SentimentResponse>().await.map_err(|e| {
            if e.is_decode() {
                MLError::InvalidResponse(e.to_string())
            } else {
                MLError::RequestFailed(e)
            }
        })?;
        Ok(result)
    }

    /// Check service health
    pub async fn health(&self) -> MLResult<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl PolarityClassifier for SentimentClient {
    async fn classify(&self, text: &str) -> Result<BaseSignal, RadarError> {
        let response = self.predict(vec![text.to_string()]).await?;
        let prediction = response.predictions.first().ok_or_else(|| {
            RadarError::InvalidClassifierOutput("empty predictions list".to_string())
        })?;
        tracing::trace!(
            "Classifier returned '{}' ({:.3}) in {:.1}ms",
            prediction.label,
            prediction.confidence.unwrap_or_default(),
            response.processing_time_ms
        );
        Ok(prediction.to_base_signal())
    }

    async fn is_available(&self) -> bool {
        match self.health().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::debug!("Sentiment service health check failed: {}", e);
                false
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

/// Cut `text` to at most `max_chars` characters without splitting a code point.
/// Nothing is appended; the service only ever sees a prefix of the text.
fn clip_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::{get, post}, Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn spawn_service() -> String {
        let app = Router::new()
            .route(
                "/predict",
                post(|Json(body): Json<Value>| async move {
                    let text = body["texts"][0].as_str().unwrap_or_default().to_string();
                    let label = if text.contains("lucro") { "positive" } else { "neutral" };
                    Json(json!({
                        "predictions": [{
                            "label": label,
                            "positive": 0.7,
                            "negative": 0.1,
                            "neutral": 0.2,
                            "confidence": 0.7,
                            "score": 0.6
                        }],
                        "processing_time_ms": 1.5
                    }))
                }),
            )
            .route("/health", get(|| async { "ok" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_broken_service() -> String {
        let app = Router::new()
            .route("/predict", post(|| async { Json(json!({"resultado": "positivo"})) }))
            .route("/health", get(|| async { "ok" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config_for(url: String) -> MLConfig {
        MLConfig {
            sentiment_url: url,
            timeout: Duration::from_secs(2),
            max_text_chars: 16,
        }
    }

    #[test]
    fn test_prediction_without_confidence_uses_max_probability() {
        let prediction: SentimentPrediction = serde_json::from_value(json!({
            "label": "Negative",
            "positive": 0.1,
            "negative": 0.65,
            "neutral": 0.25
        }))
        .unwrap();
        let signal = prediction.to_base_signal();
        assert_eq!(signal.label, PolarityLabel::Negative);
        assert!((signal.scalar() + 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_clip_chars_respects_code_points() {
        assert_eq!(clip_chars("ações em alta", 4), "açõe");
        assert_eq!(clip_chars("curto", 50), "curto");
    }

    #[tokio::test]
    async fn test_classify_against_local_service() {
        let url = spawn_service().await;
        let client = SentimentClient::new(&config_for(url)).unwrap();

        assert!(client.is_available().await);
        let signal = client.classify("lucro recorde no trimestre").await.unwrap();
        assert_eq!(signal.label, PolarityLabel::Positive);
        assert!((signal.confidence - 0.7).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_undecodable_body_is_invalid_output() {
        let url = spawn_broken_service().await;
        let client = SentimentClient::new(&config_for(url)).unwrap();

        let err = client.predict(vec!["lucro".to_string()]).await.unwrap_err();
        assert!(matches!(err, MLError::InvalidResponse(_)));

        let err = client.classify("lucro").await.unwrap_err();
        assert!(matches!(err, RadarError::InvalidClassifierOutput(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_reported_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SentimentClient::new(&config_for(format!("http://{}", addr))).unwrap();
        assert!(!client.is_available().await);
        let err = client.classify("qualquer texto").await.unwrap_err();
        assert!(matches!(err, RadarError::ClassifierUnavailable(_)));
    }
}
