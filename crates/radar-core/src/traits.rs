use async_trait::async_trait;
use crate::{AssetContext, AssetRecord, BaseSignal, RadarError};

/// Opaque base polarity model.
///
/// Implementations receive already-normalized text and are responsible for
/// truncating it to whatever length their model accepts.
#[async_trait]
pub trait PolarityClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<BaseSignal, RadarError>;

    /// Whether the underlying model can currently serve requests.
    async fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str;
}

/// Lookup of asset metadata by ticker
pub trait AssetCatalog: Send + Sync {
    fn lookup(&self, ticker: &str) -> Option<AssetRecord>;

    /// Sector/subsector for `ticker`, empty when unknown.
    fn resolve(&self, ticker: &str) -> AssetContext {
        self.lookup(ticker)
            .map(|record| record.context())
            .unwrap_or_default()
    }
}

/// Catalog that knows nothing; every ticker resolves to an empty context.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl AssetCatalog for EmptyCatalog {
    fn lookup(&self, _ticker: &str) -> Option<AssetRecord> {
        None
    }
}
