use anyhow::{Context, Result};
use radar_core::{PriceBar, RawArticle};
use serde_json::Value;
use std::path::Path;

fn read_json(path: &Path, what: &str) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} file {}", what, path.display()))
}

/// Load the news feed.
///
/// Entries that are not article objects are kept as empty records, so they
/// are reported as malformed under their position in the feed.
pub fn load_articles(path: &Path) -> Result<Vec<RawArticle>> {
    let Value::Array(items) = read_json(path, "articles")? else {
        anyhow::bail!("Articles file {} must contain a JSON array", path.display());
    };

    let articles: Vec<RawArticle> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                tracing::debug!("Article {} is not a valid record: {}", i, e);
                RawArticle::default()
            })
        })
        .collect();

    tracing::info!("Loaded {} articles from {}", articles.len(), path.display());
    Ok(articles)
}

pub fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let bars: Vec<PriceBar> = serde_json::from_value(read_json(path, "prices")?)
        .with_context(|| format!("Invalid price rows in {}", path.display()))?;
    tracing::info!("Loaded {} price rows from {}", bars.len(), path.display());
    Ok(bars)
}
