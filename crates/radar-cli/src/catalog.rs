use anyhow::{Context, Result};
use radar_core::{Article, AssetCatalog, AssetRecord, RawArticle};
use sentiment_analysis::SkippedArticle;
use std::collections::HashMap;
use std::path::Path;

/// Market words that make an article relevant to any listed asset.
const MARKET_WORDS: &[&str] = &[
    "ações",
    "lucro",
    "balanço",
    "mercado",
    "investidores",
    "dividendos",
    "CVM",
    "B3",
];

/// Asset catalog loaded from a JSON array of records.
///
/// Lookups are case-insensitive and match either the full ticker
/// (`PETR4.SA`) or its base code (`PETR4`).
#[derive(Debug, Clone, Default)]
pub struct JsonAssetCatalog {
    records: Vec<AssetRecord>,
    index: HashMap<String, usize>,
}

impl JsonAssetCatalog {
    pub fn new(records: Vec<AssetRecord>) -> Self {
        let mut index = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            index.entry(record.ticker.to_uppercase()).or_insert(i);
            index.entry(record.base_code().to_uppercase()).or_insert(i);
        }
        Self { records, index }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read asset catalog {}", path.display()))?;
        let records: Vec<AssetRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse asset catalog {}", path.display()))?;
        tracing::info!("Loaded {} assets from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    /// Sector lookups degrade to empty contexts when the catalog is missing.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Asset catalog unavailable, sector tier disabled: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AssetCatalog for JsonAssetCatalog {
    fn lookup(&self, ticker: &str) -> Option<AssetRecord> {
        self.index
            .get(&ticker.trim().to_uppercase())
            .and_then(|&i| self.records.get(i))
            .cloned()
    }
}

/// Lower-cased terms that mark an article as being about `record`.
pub fn asset_keywords(record: &AssetRecord) -> Vec<String> {
    let fields = [
        record.name.as_str(),
        record.ticker.as_str(),
        record.sector.as_str(),
        record.subsector.as_str(),
        record.segment.as_str(),
        record.base_code(),
    ];

    let mut keywords: Vec<String> = Vec::new();
    for term in fields.into_iter().chain(MARKET_WORDS.iter().copied()) {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !keywords.contains(&term) {
            keywords.push(term);
        }
    }
    keywords
}

/// Feed entries worth scoring, each with its position in the feed.
#[derive(Debug, Default)]
pub struct FeedSelection<'a> {
    pub relevant: Vec<(usize, &'a RawArticle)>,
    /// Records that are not valid articles, reported whatever they mention.
    pub malformed: Vec<SkippedArticle>,
    pub irrelevant: usize,
}

/// Split the feed into malformed records and articles whose
/// `"{title} {summary}"` mentions any keyword. Input order is kept.
pub fn select_relevant<'a>(articles: &'a [RawArticle], keywords: &[String]) -> FeedSelection<'a> {
    let mut selection = FeedSelection::default();
    for (index, raw) in articles.iter().enumerate() {
        let article = match Article::from_raw(index, raw) {
            Ok(article) => article,
            Err(reason) => {
                tracing::warn!("Skipping feed entry: {}", reason);
                selection.malformed.push(SkippedArticle { index, reason });
                continue;
            }
        };
        let text = article.original_text().to_lowercase();
        if keywords.iter().any(|k| text.contains(k.as_str())) {
            selection.relevant.push((index, raw));
        } else {
            selection.irrelevant += 1;
        }
    }
    selection
}
