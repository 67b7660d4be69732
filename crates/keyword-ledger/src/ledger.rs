use serde_json::Value;
use std::path::Path;

use crate::tables::{GeneralTable, Polarity, PolarityBuckets, SectorTable, Tier, TermWeights};
use crate::{LedgerError, LoadWarning};

/// Read-only view over the general and sectoral dictionaries.
#[derive(Debug, Clone, Default)]
pub struct KeywordLedger {
    general: GeneralTable,
    sectoral: SectorTable,
    diagnostics: Vec<LoadWarning>,
}

impl KeywordLedger {
    pub fn new(general: GeneralTable, sectoral: SectorTable) -> Self {
        Self {
            general,
            sectoral,
            diagnostics: Vec::new(),
        }
    }

    /// Build from already-parsed JSON documents. Never fails; problems end up
    /// in [`KeywordLedger::diagnostics`].
    pub fn from_values(general: &Value, sectoral: &Value) -> Self {
        let mut diagnostics = Vec::new();
        let general = GeneralTable::from_value(general, &mut diagnostics);
        let sectoral = SectorTable::from_value(sectoral, &mut diagnostics);
        let ledger = Self {
            general,
            sectoral,
            diagnostics,
        };
        ledger.log_diagnostics();
        ledger
    }

    /// Load both dictionaries from disk. A missing or unparsable file leaves
    /// that dictionary empty.
    pub fn from_files(general_path: impl AsRef<Path>, sectoral_path: impl AsRef<Path>) -> Self {
        let mut diagnostics = Vec::new();

        let general = match read_document(general_path.as_ref()) {
            Ok(value) => GeneralTable::from_value(&value, &mut diagnostics),
            Err(e) => {
                diagnostics.push(LoadWarning::DocumentUnavailable {
                    document: "general",
                    reason: e.to_string(),
                });
                GeneralTable::default()
            }
        };
        let sectoral = match read_document(sectoral_path.as_ref()) {
            Ok(value) => SectorTable::from_value(&value, &mut diagnostics),
            Err(e) => {
                diagnostics.push(LoadWarning::DocumentUnavailable {
                    document: "sectoral",
                    reason: e.to_string(),
                });
                SectorTable::default()
            }
        };

        let ledger = Self {
            general,
            sectoral,
            diagnostics,
        };
        ledger.log_diagnostics();
        ledger
    }

    fn log_diagnostics(&self) {
        for warning in &self.diagnostics {
            tracing::warn!("Keyword dictionary: {}", warning);
        }
        if self.general.is_empty() {
            tracing::warn!("General keyword dictionary is empty; keyword tiers contribute no evidence");
        }
        tracing::info!(
            "Keyword ledger loaded: {} concrete, {} qualitative, {} sectors, {} neutralizing, {} ironic",
            self.general.concrete.len(),
            self.general.qualitative.len(),
            self.sectoral.sectors.len(),
            self.general.neutralizing_phrases.len(),
            self.general.ironic_phrases.len(),
        );
    }

    pub fn diagnostics(&self) -> &[LoadWarning] {
        &self.diagnostics
    }

    /// True when a whole dictionary could not be used.
    pub fn is_degraded(&self) -> bool {
        self.diagnostics.iter().any(|w| {
            matches!(w, LoadWarning::DocumentUnavailable { .. })
                || matches!(w, LoadWarning::NotAMapping { path } if path == "$")
        })
    }

    pub fn general(&self) -> &GeneralTable {
        &self.general
    }

    pub fn sectoral(&self) -> &SectorTable {
        &self.sectoral
    }

    /// Weight of `term` in a general bucket, `0.0` when absent.
    pub fn weight_for(&self, term: &str, tier: Tier, polarity: Polarity) -> f64 {
        self.general
            .tier(tier)
            .get(polarity)
            .get(&term.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }

    /// Weight of `term` in a sectoral bucket, `0.0` when the sector,
    /// subsector or term is absent.
    pub fn sector_weight_for(
        &self,
        term: &str,
        sector: &str,
        subsector: &str,
        polarity: Polarity,
    ) -> f64 {
        self.sectoral
            .buckets(sector, subsector)
            .and_then(|b| b.get(polarity).get(&term.to_lowercase()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn terms(&self, tier: Tier, polarity: Polarity) -> &TermWeights {
        self.general.tier(tier).get(polarity)
    }

    pub fn sector_terms(&self, sector: &str, subsector: &str, polarity: Polarity) -> Option<&TermWeights> {
        self.sectoral.buckets(sector, subsector).map(|b| b.get(polarity))
    }

    /// Signed keyword evidence of a general tier. `text` must already be lower-cased.
    pub fn general_evidence(&self, text: &str, tier: Tier) -> f64 {
        self.general.tier(tier).signed_evidence(text)
    }

    /// Signed keyword evidence of a sector/subsector. `text` must already be lower-cased.
    pub fn sector_evidence(&self, text: &str, sector: &str, subsector: &str) -> f64 {
        self.sectoral
            .buckets(sector, subsector)
            .map(|b: &PolarityBuckets| b.signed_evidence(text))
            .unwrap_or(0.0)
    }

    pub fn contains_neutralizing_phrase(&self, text: &str) -> bool {
        contains_any(text, &self.general.neutralizing_phrases)
    }

    pub fn contains_ironic_phrase(&self, text: &str) -> bool {
        contains_any(text, &self.general.ironic_phrases)
    }
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    if phrases.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    phrases.iter().any(|phrase| text.contains(phrase.as_str()))
}

/// Read and parse a JSON dictionary file.
pub fn read_document(path: &Path) -> Result<Value, LedgerError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LedgerError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LedgerError::Parse {
        path: path.display().to_string(),
        source,
    })
}
