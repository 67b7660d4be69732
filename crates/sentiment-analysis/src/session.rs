use keyword_ledger::KeywordLedger;
use radar_core::{AssetCatalog, PolarityClassifier, RawArticle};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::batch::{BatchOrchestrator, BatchOutcome};
use crate::scorer::HierarchicalScorer;

/// Process-lifetime resources for sentiment scoring.
///
/// The ledger is fixed at construction. The classifier is acquired on the
/// first non-empty batch that finds it healthy and reused for every later
/// batch. While it is unavailable each batch is scored without it and the
/// next batch checks its health again.
pub struct AnalysisSession {
    ledger: Arc<KeywordLedger>,
    catalog: Arc<dyn AssetCatalog>,
    candidate: Option<Arc<dyn PolarityClassifier>>,
    classifier: OnceCell<Arc<dyn PolarityClassifier>>,
}

impl AnalysisSession {
    pub fn new(
        ledger: KeywordLedger,
        catalog: Arc<dyn AssetCatalog>,
        classifier: Option<Arc<dyn PolarityClassifier>>,
    ) -> Self {
        if ledger.is_degraded() {
            tracing::warn!("Keyword dictionaries are degraded; scores rely on the base classifier");
        }
        Self {
            ledger: Arc::new(ledger),
            catalog,
            candidate: classifier,
            classifier: OnceCell::new(),
        }
    }

    pub fn ledger(&self) -> &KeywordLedger {
        &self.ledger
    }

    /// Classifier for this session. Only a successful acquisition is cached.
    pub async fn classifier(&self) -> Option<Arc<dyn PolarityClassifier>> {
        let candidate = self.candidate.as_ref()?;
        self.classifier
            .get_or_try_init(|| async {
                if candidate.is_available().await {
                    tracing::info!("Polarity classifier ready ({})", candidate.backend_name());
                    Ok(candidate.clone())
                } else {
                    tracing::warn!(
                        "Polarity classifier ({}) unavailable; batch scored without sentiment",
                        candidate.backend_name()
                    );
                    Err(())
                }
            })
            .await
            .ok()
            .cloned()
    }

    pub async fn score_batch(&self, articles: &[RawArticle]) -> BatchOutcome {
        let indexed: Vec<(usize, &RawArticle)> = articles.iter().enumerate().collect();
        self.score_indexed(&indexed).await
    }

    /// Score articles that keep their position in a larger feed.
    pub async fn score_indexed(&self, articles: &[(usize, &RawArticle)]) -> BatchOutcome {
        if articles.is_empty() {
            return BatchOutcome::default();
        }
        let orchestrator = BatchOrchestrator::new(
            HierarchicalScorer::new(self.ledger.clone()),
            self.classifier().await,
            self.catalog.clone(),
        );
        orchestrator.score_indexed(articles).await
    }

    /// Release the session's resources.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for AnalysisSession {
    fn drop(&mut self) {
        tracing::info!("Analysis session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use radar_core::{BaseSignal, EmptyCatalog, PolarityLabel, RadarError};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingClassifier {
        available: AtomicBool,
        health_checks: AtomicUsize,
    }

    impl CountingClassifier {
        fn new(available: bool) -> Self {
            Self {
                available: AtomicBool::new(available),
                health_checks: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PolarityClassifier for CountingClassifier {
        async fn classify(&self, _text: &str) -> Result<BaseSignal, RadarError> {
            Ok(BaseSignal::new(PolarityLabel::Positive, 1.0))
        }

        async fn is_available(&self) -> bool {
            self.health_checks.fetch_add(1, Ordering::SeqCst);
            self.available.load(Ordering::SeqCst)
        }

        fn backend_name(&self) -> &'static str {
            "counting"
        }
    }

    fn ledger() -> KeywordLedger {
        KeywordLedger::from_values(&json!({"concretas": {"positivas": {"lucro": 0.6}}}), &json!({}))
    }

    #[tokio::test]
    async fn test_classifier_acquired_once() {
        let classifier = Arc::new(CountingClassifier::new(true));
        let session = AnalysisSession::new(ledger(), Arc::new(EmptyCatalog), Some(classifier.clone()));
        let articles = vec![RawArticle::new("Lucro", "cresce")];

        let first = session.score_batch(&articles).await;
        let second = session.score_batch(&articles).await;

        assert_eq!(first.results.len(), 1);
        assert_eq!(first.results, second.results);
        assert_eq!(classifier.health_checks.load(Ordering::SeqCst), 1);
        session.close();
    }

    #[tokio::test]
    async fn test_empty_batch_skips_acquisition() {
        let classifier = Arc::new(CountingClassifier::new(true));
        let session = AnalysisSession::new(ledger(), Arc::new(EmptyCatalog), Some(classifier.clone()));

        let outcome = session.score_batch(&[]).await;

        assert!(outcome.results.is_empty());
        assert_eq!(classifier.health_checks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unavailable_classifier_is_checked_again_until_it_recovers() {
        let classifier = Arc::new(CountingClassifier::new(false));
        let session = AnalysisSession::new(ledger(), Arc::new(EmptyCatalog), Some(classifier.clone()));
        let articles = vec![RawArticle::new("Lucro", "cresce")];

        let outcome = session.score_batch(&articles).await;
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.skipped.len(), 1);

        classifier.available.store(true, Ordering::SeqCst);
        let recovered = session.score_batch(&articles).await;
        assert_eq!(recovered.results.len(), 1);

        session.score_batch(&articles).await;
        assert_eq!(classifier.health_checks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_score_indexed_reports_feed_positions() {
        let classifier = Arc::new(CountingClassifier::new(true));
        let session = AnalysisSession::new(ledger(), Arc::new(EmptyCatalog), Some(classifier));
        let valid = RawArticle::new("Lucro", "cresce");
        let broken = RawArticle {
            title: Some("Sem resumo".to_string()),
            ..Default::default()
        };

        let outcome = session.score_indexed(&[(4, &valid), (9, &broken)]).await;

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.skipped[0].index, 9);
        assert_eq!(outcome.skipped[0].reason.article_index(), Some(9));
    }
}
