//! Hierarchical news sentiment.
//!
//! Each article is normalized, scored by the base polarity classifier and
//! then adjusted with three tiers of keyword evidence (sectoral, concrete,
//! qualitative). Neutralizing or ironic phrases attenuate the combined score,
//! which is clipped to [-1, 1] and labelled with a symmetric deadband.

pub mod batch;
pub mod normalizer;
pub mod scorer;
pub mod session;
pub mod summary;

pub use batch::{BatchOrchestrator, BatchOutcome, SkippedArticle};
pub use normalizer::{clean_for_display, normalize, normalize_article, truncate_chars, NormalizedArticle};
pub use scorer::{HierarchicalScorer, Override, ScoreBreakdown, TierEvidence};
pub use session::AnalysisSession;
pub use summary::{highlights, median_intensity, SentimentSummary, DEFAULT_HIGHLIGHT_COUNT};
