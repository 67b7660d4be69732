use radar_core::{Article, RadarError, RawArticle};

/// Encoding artifacts seen in Portuguese news feeds (`R$401,9bilho~es`, `\c a`).
const ARTIFACTS: &[&str] = &["~", "\\c", "\\x03", "\u{3}"];

/// Lower-case `raw`, strip feed artifacts, turn CR-LF into a space and trim.
pub fn normalize(raw: &str) -> String {
    strip_artifacts(&raw.to_lowercase())
}

/// Same artifact removal as [`normalize`] but keeps the original casing.
pub fn clean_for_display(raw: &str) -> String {
    strip_artifacts(raw)
}

fn strip_artifacts(text: &str) -> String {
    let mut cleaned = text.to_string();
    for artifact in ARTIFACTS {
        if cleaned.contains(artifact) {
            cleaned = cleaned.replace(artifact, "");
        }
    }
    cleaned.replace("\r\n", " ").trim().to_string()
}

/// Cut `text` to `max_chars` characters, appending `...` when something was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Validated article with both its display text and its matching text.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedArticle {
    pub index: usize,
    pub article: Article,
    /// `"{title} {summary}"` as received, kept for display.
    pub original_text: String,
    /// Basis for keyword matching and classification.
    pub text: String,
}

/// Validate and normalize the article at `index` of a batch.
pub fn normalize_article(index: usize, raw: &RawArticle) -> Result<NormalizedArticle, RadarError> {
    let article = Article::from_raw(index, raw)?;
    let original_text = article.original_text();
    let text = normalize(&original_text);

    Ok(NormalizedArticle {
        index,
        article,
        original_text,
        text,
    })
}
