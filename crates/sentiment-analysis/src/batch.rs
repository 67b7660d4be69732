use radar_core::{AssetCatalog, PolarityClassifier, RadarError, RawArticle, ScoreResult};
use std::sync::Arc;

use crate::normalizer::normalize_article;
use crate::scorer::HierarchicalScorer;

/// Article left out of a batch and why
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedArticle {
    pub index: usize,
    pub reason: RadarError,
}

/// Scored articles in input order, plus whatever had to be skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub results: Vec<ScoreResult>,
    pub skipped: Vec<SkippedArticle>,
}

impl BatchOutcome {
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Runs the per-article pipeline over a batch. Holds no decision logic.
pub struct BatchOrchestrator {
    scorer: HierarchicalScorer,
    classifier: Option<Arc<dyn PolarityClassifier>>,
    catalog: Arc<dyn AssetCatalog>,
}

impl BatchOrchestrator {
    pub fn new(
        scorer: HierarchicalScorer,
        classifier: Option<Arc<dyn PolarityClassifier>>,
        catalog: Arc<dyn AssetCatalog>,
    ) -> Self {
        Self {
            scorer,
            classifier,
            catalog,
        }
    }

    /// Score every article, in order. Malformed records and classifier
    /// failures are skipped individually; the batch always completes.
    pub async fn score_batch(&self, articles: &[RawArticle]) -> BatchOutcome {
        let indexed: Vec<(usize, &RawArticle)> = articles.iter().enumerate().collect();
        self.score_indexed(&indexed).await
    }

    /// Same as [`BatchOrchestrator::score_batch`] for articles picked out of a
    /// larger feed; skips are reported under the given positions.
    pub async fn score_indexed(&self, articles: &[(usize, &RawArticle)]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        if articles.is_empty() {
            return outcome;
        }

        if self.classifier.is_none() {
            tracing::warn!(
                "No polarity classifier available, skipping sentiment for {} articles",
                articles.len()
            );
        }

        for &(index, raw) in articles {
            let normalized = match normalize_article(index, raw) {
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!("Skipping article: {}", e);
                    outcome.skipped.push(SkippedArticle { index, reason: e });
                    continue;
                }
            };

            let Some(classifier) = self.classifier.as_ref() else {
                outcome.skipped.push(SkippedArticle {
                    index,
                    reason: RadarError::ClassifierUnavailable("no classifier configured".to_string()),
                });
                continue;
            };

            let base = match classifier.classify(&normalized.text).await {
                Ok(signal) => signal,
                Err(e) => {
                    tracing::warn!("Classifier failed on article #{}: {}", index, e);
                    outcome.skipped.push(SkippedArticle { index, reason: e });
                    continue;
                }
            };

            let context = normalized
                .article
                .asset_ticker
                .as_deref()
                .map(|ticker| self.catalog.resolve(ticker))
                .unwrap_or_default();

            let breakdown = self.scorer.score(&normalized.text, &context, &base);
            tracing::debug!(
                "Article #{}: base={:.3} sector={:.3} concrete={:.3} qualitative={:.3} raw={:.3} override={:?} -> {:.3} {}",
                index,
                breakdown.evidence.base_polarity,
                breakdown.evidence.sectoral,
                breakdown.evidence.concrete,
                breakdown.evidence.qualitative,
                breakdown.raw_score,
                breakdown.override_applied,
                breakdown.intensity,
                breakdown.label,
            );

            outcome.results.push(ScoreResult {
                original_text: normalized.original_text,
                label: breakdown.label,
                intensity: breakdown.intensity,
            });
        }

        tracing::info!(
            "Scored {} of {} articles ({} skipped)",
            outcome.results.len(),
            articles.len(),
            outcome.skipped.len()
        );
        outcome
    }
}
