use radar_core::ScoreResult;
use sentiment_analysis::{clean_for_display, truncate_chars, SentimentSummary, SkippedArticle};
use serde::Serialize;
use std::fmt::Write;
use technical_analysis::{Period, PriceSnapshot, Trend, TrendReading};

const HIGHLIGHT_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: String,
}

/// Everything the radar prints for one asset
#[derive(Debug, Clone, Serialize)]
pub struct RadarReport {
    pub ticker: String,
    pub asset_name: String,
    pub period: Period,
    pub trend: Trend,
    pub trend_reading: Option<TrendReading>,
    pub price: Option<PriceSnapshot>,
    pub total_articles: usize,
    pub relevant_articles: usize,
    pub sentiment: SentimentSummary,
    pub articles: Vec<ScoreResult>,
    pub skipped: Vec<SkippedEntry>,
}

impl RadarReport {
    /// Merge skip lists into one, ordered by feed position.
    pub fn skipped_from(lists: &[&[SkippedArticle]]) -> Vec<SkippedEntry> {
        let mut entries: Vec<SkippedEntry> = lists
            .iter()
            .flat_map(|list| list.iter())
            .map(|s| SkippedEntry {
                index: s.index,
                reason: s.reason.to_string(),
            })
            .collect();
        entries.sort_by_key(|e| e.index);
        entries
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // writeln! into a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let title = if self.asset_name.is_empty() {
            self.ticker.clone()
        } else {
            format!("{} - {}", self.ticker, self.asset_name)
        };
        writeln!(out, "=== {} ({}) ===", title, self.period.as_str())?;
        writeln!(out)?;

        writeln!(out, "Tendência: {}", self.trend)?;
        match &self.price {
            Some(p) => writeln!(
                out,
                "Preço atual: R$ {:.2} ({:+.2}%)",
                p.current_price, p.change_percent
            )?,
            None => writeln!(out, "Preço atual: indisponível")?,
        }
        writeln!(out)?;

        writeln!(
            out,
            "Notícias relevantes: {} de {}",
            self.relevant_articles, self.total_articles
        )?;
        if self.sentiment.scored_articles == 0 {
            writeln!(out, "Nenhuma notícia pontuada.")?;
        } else {
            writeln!(
                out,
                "Sentimento mediano: {} ({:.2})",
                self.sentiment.label, self.sentiment.median_intensity
            )?;
            writeln!(out)?;
            writeln!(out, "Destaques:")?;
            for result in &self.sentiment.highlights {
                writeln!(
                    out,
                    "  [{}] {:+.2} {}",
                    result.label.marker(),
                    result.intensity,
                    truncate_chars(&clean_for_display(&result.original_text), HIGHLIGHT_CHARS)
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Notícias:")?;
            for result in &self.articles {
                writeln!(
                    out,
                    "  {:<8} {:>5.2}  {}",
                    result.label.as_str(),
                    result.intensity,
                    clean_for_display(&result.original_text)
                )?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(out)?;
            writeln!(out, "Ignoradas: {}", self.skipped.len())?;
            for entry in &self.skipped {
                writeln!(out, "  #{}: {}", entry.index, entry.reason)?;
            }
        }
        Ok(())
    }
}
