use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::LoadWarning;

/// Canonical key of the neutralizing phrase list.
pub const NEUTRALIZING_KEY: &str = "neutralizadoras";
/// Older dictionaries used this key for the same list.
pub const LEGACY_NEUTRALIZING_KEY: &str = "neutras";
pub const IRONIC_KEY: &str = "ironico";

/// Evidence tier of the general dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Concrete,
    Qualitative,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Concrete, Tier::Qualitative];

    pub fn key(&self) -> &'static str {
        match self {
            Tier::Concrete => "concretas",
            Tier::Qualitative => "qualitativas",
        }
    }
}

/// Bucket a term lives in. The bucket, not the stored weight, carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub const ALL: [Polarity; 2] = [Polarity::Positive, Polarity::Negative];

    pub fn key(&self) -> &'static str {
        match self {
            Polarity::Positive => "positivas",
            Polarity::Negative => "negativas",
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

/// Lower-cased term to non-negative weight. Ordered so that summation order
/// is the same on every run.
pub type TermWeights = BTreeMap<String, f64>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolarityBuckets {
    pub positive: TermWeights,
    pub negative: TermWeights,
}

impl PolarityBuckets {
    pub fn get(&self, polarity: Polarity) -> &TermWeights {
        match polarity {
            Polarity::Positive => &self.positive,
            Polarity::Negative => &self.negative,
        }
    }

    fn get_mut(&mut self, polarity: Polarity) -> &mut TermWeights {
        match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => &mut self.negative,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Signed sum of the weights of every term contained in `text`.
    pub fn signed_evidence(&self, text: &str) -> f64 {
        Polarity::ALL
            .iter()
            .map(|polarity| {
                let matched: f64 = self
                    .get(*polarity)
                    .iter()
                    .filter(|(term, _)| text.contains(term.as_str()))
                    .map(|(_, weight)| *weight)
                    .sum();
                polarity.sign() * matched
            })
            .sum()
    }

    /// Parse `{"positivas": {...}, "negativas": {...}}`.
    pub(crate) fn parse(value: &Value, path: &str, warnings: &mut Vec<LoadWarning>) -> Self {
        let mut buckets = PolarityBuckets::default();
        let Some(object) = as_mapping(value, path, warnings) else {
            return buckets;
        };

        for polarity in Polarity::ALL {
            let Some(terms) = object.get(polarity.key()) else {
                continue;
            };
            let bucket_path = format!("{}.{}", path, polarity.key());
            let Some(terms) = as_mapping(terms, &bucket_path, warnings) else {
                continue;
            };
            let target = buckets.get_mut(polarity);
            for (term, weight) in terms {
                let term = term.trim().to_lowercase();
                if term.is_empty() {
                    warnings.push(LoadWarning::EmptyTerm { path: bucket_path.clone() });
                    continue;
                }
                match weight.as_f64().filter(|w| w.is_finite()) {
                    // Legacy files store negative numbers in the negative bucket.
                    Some(w) => {
                        target.insert(term, w.abs());
                    }
                    None => warnings.push(LoadWarning::InvalidWeight {
                        path: bucket_path.clone(),
                        term,
                    }),
                }
            }
        }

        buckets
    }
}

/// General dictionary: two tiers plus override phrases
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralTable {
    pub concrete: PolarityBuckets,
    pub qualitative: PolarityBuckets,
    pub neutralizing_phrases: Vec<String>,
    pub ironic_phrases: Vec<String>,
}

impl GeneralTable {
    pub fn tier(&self, tier: Tier) -> &PolarityBuckets {
        match tier {
            Tier::Concrete => &self.concrete,
            Tier::Qualitative => &self.qualitative,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.concrete.is_empty()
            && self.qualitative.is_empty()
            && self.neutralizing_phrases.is_empty()
            && self.ironic_phrases.is_empty()
    }

    pub fn from_value(value: &Value, warnings: &mut Vec<LoadWarning>) -> Self {
        let mut table = GeneralTable::default();
        let Some(object) = as_mapping(value, "$", warnings) else {
            return table;
        };

        if let Some(tier) = object.get(Tier::Concrete.key()) {
            table.concrete = PolarityBuckets::parse(tier, Tier::Concrete.key(), warnings);
        }
        if let Some(tier) = object.get(Tier::Qualitative.key()) {
            table.qualitative = PolarityBuckets::parse(tier, Tier::Qualitative.key(), warnings);
        }

        if let Some(list) = object.get(NEUTRALIZING_KEY) {
            table.neutralizing_phrases = parse_phrases(list, NEUTRALIZING_KEY, warnings);
        }
        if let Some(list) = object.get(LEGACY_NEUTRALIZING_KEY) {
            warnings.push(LoadWarning::LegacyKey {
                legacy: LEGACY_NEUTRALIZING_KEY,
                canonical: NEUTRALIZING_KEY,
            });
            for phrase in parse_phrases(list, LEGACY_NEUTRALIZING_KEY, warnings) {
                if !table.neutralizing_phrases.contains(&phrase) {
                    table.neutralizing_phrases.push(phrase);
                }
            }
        }
        if let Some(list) = object.get(IRONIC_KEY) {
            table.ironic_phrases = parse_phrases(list, IRONIC_KEY, warnings);
        }

        table
    }
}

/// Sectoral dictionary: sector -> subsector -> buckets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorTable {
    pub sectors: BTreeMap<String, BTreeMap<String, PolarityBuckets>>,
}

impl SectorTable {
    pub fn buckets(&self, sector: &str, subsector: &str) -> Option<&PolarityBuckets> {
        self.sectors.get(sector)?.get(subsector)
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn from_value(value: &Value, warnings: &mut Vec<LoadWarning>) -> Self {
        let mut table = SectorTable::default();
        let Some(object) = as_mapping(value, "$", warnings) else {
            return table;
        };

        for (sector, subsectors) in object {
            let Some(subsectors) = as_mapping(subsectors, sector, warnings) else {
                continue;
            };
            let entry = table.sectors.entry(sector.clone()).or_default();
            for (subsector, buckets) in subsectors {
                let path = format!("{}.{}", sector, subsector);
                entry.insert(subsector.clone(), PolarityBuckets::parse(buckets, &path, warnings));
            }
        }

        table
    }
}

fn as_mapping<'a>(
    value: &'a Value,
    path: &str,
    warnings: &mut Vec<LoadWarning>,
) -> Option<&'a Map<String, Value>> {
    let object = value.as_object();
    if object.is_none() {
        warnings.push(LoadWarning::NotAMapping { path: path.to_string() });
    }
    object
}

fn parse_phrases(value: &Value, path: &str, warnings: &mut Vec<LoadWarning>) -> Vec<String> {
    let Some(items) = value.as_array() else {
        warnings.push(LoadWarning::NotAList { path: path.to_string() });
        return Vec::new();
    };

    let mut phrases = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str().map(|s| s.trim().to_lowercase()) {
            Some(phrase) if !phrase.is_empty() => {
                if !phrases.contains(&phrase) {
                    phrases.push(phrase);
                }
            }
            _ => warnings.push(LoadWarning::EmptyTerm { path: path.to_string() }),
        }
    }
    phrases
}
