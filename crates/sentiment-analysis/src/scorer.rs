use keyword_ledger::{KeywordLedger, Tier};
use radar_core::{AssetContext, BaseSignal, SentimentLabel};
use serde::Serialize;
use std::sync::Arc;

// Tier weights. They must keep summing to 1.0.
pub const BASE_POLARITY_WEIGHT: f64 = 0.20;
pub const SECTOR_WEIGHT: f64 = 0.35;
pub const CONCRETE_WEIGHT: f64 = 0.35;
pub const QUALITATIVE_WEIGHT: f64 = 0.10;

/// Macro/irrelevant news is pulled almost all the way to zero.
pub const NEUTRALIZING_FACTOR: f64 = 0.1;
/// Sarcasm makes the polarity unreliable, so intensity is halved.
pub const IRONY_FACTOR: f64 = 0.5;

pub const MIN_INTENSITY: f64 = -1.0;
pub const MAX_INTENSITY: f64 = 1.0;

/// Text-level attenuation applied after the tiers are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Override {
    Neutralized,
    Ironic,
    None,
}

impl Override {
    pub fn factor(&self) -> f64 {
        match self {
            Override::Neutralized => NEUTRALIZING_FACTOR,
            Override::Ironic => IRONY_FACTOR,
            Override::None => 1.0,
        }
    }
}

/// Unweighted evidence of each tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TierEvidence {
    pub base_polarity: f64,
    pub sectoral: f64,
    pub concrete: f64,
    pub qualitative: f64,
}

impl TierEvidence {
    pub fn weighted_sum(&self) -> f64 {
        self.base_polarity * BASE_POLARITY_WEIGHT
            + self.sectoral * SECTOR_WEIGHT
            + self.concrete * CONCRETE_WEIGHT
            + self.qualitative * QUALITATIVE_WEIGHT
    }
}

/// Every intermediate value of one scoring pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub evidence: TierEvidence,
    pub raw_score: f64,
    pub override_applied: Override,
    pub intensity: f64,
    pub label: SentimentLabel,
}

/// Combines the base polarity signal with keyword evidence from the ledger.
#[derive(Debug, Clone)]
pub struct HierarchicalScorer {
    ledger: Arc<KeywordLedger>,
}

impl HierarchicalScorer {
    pub fn new(ledger: Arc<KeywordLedger>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &KeywordLedger {
        &self.ledger
    }

    /// Collect the four tiers for already-normalized `text`.
    pub fn evidence(&self, text: &str, context: &AssetContext, base: &BaseSignal) -> TierEvidence {
        TierEvidence {
            base_polarity: base.scalar(),
            sectoral: self
                .ledger
                .sector_evidence(text, &context.sector, &context.subsector),
            concrete: self.ledger.general_evidence(text, Tier::Concrete),
            qualitative: self.ledger.general_evidence(text, Tier::Qualitative),
        }
    }

    /// Neutralization takes precedence; irony is only checked without it.
    pub fn override_for(&self, text: &str) -> Override {
        if self.ledger.contains_neutralizing_phrase(text) {
            Override::Neutralized
        } else if self.ledger.contains_ironic_phrase(text) {
            Override::Ironic
        } else {
            Override::None
        }
    }

    /// Score normalized `text` for the asset in `context`.
    pub fn score(&self, text: &str, context: &AssetContext, base: &BaseSignal) -> ScoreBreakdown {
        let evidence = self.evidence(text, context, base);
        let raw_score = evidence.weighted_sum();
        let override_applied = self.override_for(text);

        let adjusted = raw_score * override_applied.factor();
        let intensity = if adjusted.is_nan() {
            0.0
        } else {
            adjusted.clamp(MIN_INTENSITY, MAX_INTENSITY)
        };

        ScoreBreakdown {
            evidence,
            raw_score,
            override_applied,
            intensity,
            label: SentimentLabel::from_intensity(intensity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::PolarityLabel;
    use serde_json::json;

    fn scorer_with(general: serde_json::Value, sectoral: serde_json::Value) -> HierarchicalScorer {
        HierarchicalScorer::new(Arc::new(KeywordLedger::from_values(&general, &sectoral)))
    }

    fn lucro_scorer() -> HierarchicalScorer {
        scorer_with(
            json!({
                "concretas": {"positivas": {"lucro": 0.6}},
                "neutralizadoras": ["copom"],
                "ironico": ["que maravilha"]
            }),
            json!({}),
        )
    }

    #[test]
    fn test_tier_weights_sum_to_one() {
        let total = BASE_POLARITY_WEIGHT + SECTOR_WEIGHT + CONCRETE_WEIGHT + QUALITATIVE_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12, "tier weights sum to {}", total);
    }

    #[test]
    fn test_concrete_keyword_example() {
        let scorer = lucro_scorer();
        let base = BaseSignal::new(PolarityLabel::Positive, 0.5);
        let result = scorer.score("empresa reporta lucro", &AssetContext::default(), &base);

        assert!((result.raw_score - 0.31).abs() < 1e-9);
        assert!((result.intensity - 0.31).abs() < 1e-9);
        assert_eq!(result.override_applied, Override::None);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_neutralizing_phrase_example() {
        let scorer = lucro_scorer();
        let base = BaseSignal::new(PolarityLabel::Positive, 0.5);
        let result = scorer.score("lucro antes do copom", &AssetContext::default(), &base);

        assert!((result.intensity - 0.031).abs() < 1e-9);
        assert_eq!(result.override_applied, Override::Neutralized);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_neutralization_dominates_irony() {
        let scorer = lucro_scorer();
        let base = BaseSignal::new(PolarityLabel::Positive, 0.5);
        let result = scorer.score(
            "que maravilha, lucro antes do copom",
            &AssetContext::default(),
            &base,
        );

        assert_eq!(result.override_applied, Override::Neutralized);
        assert!((result.intensity - result.raw_score * 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_irony_halves_intensity() {
        let scorer = lucro_scorer();
        let base = BaseSignal::new(PolarityLabel::Positive, 0.5);
        let result = scorer.score("que maravilha de lucro", &AssetContext::default(), &base);

        assert_eq!(result.override_applied, Override::Ironic);
        assert!((result.intensity - 0.155).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_is_clipped_for_huge_weights() {
        let scorer = scorer_with(
            json!({
                "concretas": {"positivas": {"alta": 1000.0}, "negativas": {"queda": 5000.0}}
            }),
            json!({}),
        );
        let neutral = BaseSignal::neutral();

        let up = scorer.score("alta", &AssetContext::default(), &neutral);
        assert_eq!(up.intensity, MAX_INTENSITY);
        assert!(up.raw_score > 1.0);

        let down = scorer.score("queda", &AssetContext::default(), &neutral);
        assert_eq!(down.intensity, MIN_INTENSITY);
        assert_eq!(down.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_sector_tier_uses_context() {
        let scorer = scorer_with(
            json!({}),
            json!({"Financeiro": {"Bancos": {"negativas": {"inadimplência": 0.8}}}}),
        );
        let base = BaseSignal::neutral();
        let text = "inadimplência dispara";

        let banks = scorer.score(text, &AssetContext::new("Financeiro", "Bancos"), &base);
        assert!((banks.evidence.sectoral + 0.8).abs() < 1e-12);
        assert!((banks.intensity + 0.28).abs() < 1e-9);
        assert_eq!(banks.label, SentimentLabel::Negative);

        let unresolved = scorer.score(text, &AssetContext::default(), &base);
        assert_eq!(unresolved.evidence.sectoral, 0.0);
        assert_eq!(unresolved.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_empty_ledger_uses_only_base_signal() {
        let scorer = scorer_with(json!("broken"), json!(null));
        let base = BaseSignal::new(PolarityLabel::Negative, 1.0);
        let result = scorer.score("qualquer coisa", &AssetContext::default(), &base);

        assert!((result.intensity + 0.2).abs() < 1e-12);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_score_is_deterministic() {
        let scorer = scorer_with(
            json!({
                "concretas": {"positivas": {"lucro": 0.6, "recorde": 0.3}, "negativas": {"dívida": 0.45}},
                "qualitativas": {"positivas": {"otimismo": 0.15}}
            }),
            json!({}),
        );
        let base = BaseSignal::new(PolarityLabel::Positive, 0.83);
        let text = "lucro recorde apesar da dívida, otimismo";

        let first = scorer.score(text, &AssetContext::default(), &base);
        let second = scorer.score(text, &AssetContext::default(), &base);
        assert_eq!(first.intensity.to_bits(), second.intensity.to_bits());
    }
}
