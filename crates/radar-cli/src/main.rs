//! radar: news sentiment and price trend for a single listed asset.
//!
//! Reads a news feed and a price history from JSON files, keeps the articles
//! that mention the asset, scores them with the hierarchical sentiment model
//! and classifies the short-term trend.
//!
//! Usage:
//!   radar --ticker PETR4.SA --articles news.json --prices bars.json
//!   radar --ticker VALE3.SA --articles news.json --prices bars.json --period 1y --json

mod catalog;
mod config;
mod input;
mod report;

use anyhow::Result;
use keyword_ledger::KeywordLedger;
use ml_client::SentimentClient;
use radar_core::{AssetCatalog, AssetRecord, PolarityClassifier};
use sentiment_analysis::{AnalysisSession, SentimentSummary, DEFAULT_HIGHLIGHT_COUNT};
use std::sync::Arc;
use technical_analysis::{PriceSeries, PriceSnapshot, TrendClassifier};

use crate::catalog::{asset_keywords, select_relevant, JsonAssetCatalog};
use crate::config::{RadarConfig, USAGE};
use crate::report::RadarReport;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }
    let config = RadarConfig::from_args(&args)?;

    tracing::info!("📡 Radar for {} ({})", config.ticker, config.period.as_str());

    let ledger = KeywordLedger::from_files(&config.keywords_path, &config.sector_keywords_path);
    let catalog = Arc::new(JsonAssetCatalog::load_or_empty(&config.catalog_path));
    let record = catalog.lookup(&config.ticker).unwrap_or_else(|| {
        tracing::warn!("{} not found in the asset catalog", config.ticker);
        AssetRecord {
            ticker: config.ticker.clone(),
            ..Default::default()
        }
    });

    let classifier: Option<Arc<dyn PolarityClassifier>> = match SentimentClient::new(&config.ml) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!("Sentiment service client could not be built: {}", e);
            None
        }
    };
    let session = AnalysisSession::new(ledger, catalog.clone(), classifier);

    // Prices and trend
    let bars = input::load_bars(&config.prices_path)?;
    let precomputed = !bars.is_empty() && bars.iter().all(|b| b.moving_average.is_some());
    let ma_window = (!precomputed).then(|| config.period.moving_average_window());
    let series = PriceSeries::from_bars(&bars, ma_window);
    let trend_classifier = TrendClassifier::default();
    let trend_reading = trend_classifier.reading(series.points());
    let trend = trend_classifier.classify(series.points());
    let price = PriceSnapshot::from_series(&series);

    // News
    let mut articles = input::load_articles(&config.articles_path)?;
    let total_articles = articles.len();
    for article in &mut articles {
        if article.ticker.as_deref().map_or(true, |t| t.trim().is_empty()) {
            article.ticker = Some(record.ticker.clone());
        }
    }
    let selection = select_relevant(&articles, &asset_keywords(&record));
    tracing::info!(
        "{} of {} articles mention {} ({} unrelated, {} malformed)",
        selection.relevant.len(),
        total_articles,
        record.ticker,
        selection.irrelevant,
        selection.malformed.len()
    );

    let outcome = session.score_indexed(&selection.relevant).await;
    if outcome.is_partial() {
        tracing::warn!("{} articles could not be scored", outcome.skipped.len());
    }
    let sentiment = SentimentSummary::from_results(&outcome.results, DEFAULT_HIGHLIGHT_COUNT);

    let report = RadarReport {
        ticker: record.ticker.clone(),
        asset_name: record.name.clone(),
        period: config.period,
        trend,
        trend_reading,
        price,
        total_articles,
        relevant_articles: selection.relevant.len(),
        sentiment,
        skipped: RadarReport::skipped_from(&[
            selection.malformed.as_slice(),
            outcome.skipped.as_slice(),
        ]),
        articles: outcome.results,
    };

    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    session.close();
    Ok(())
}
