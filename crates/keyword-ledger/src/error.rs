use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dictionary {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Problem found while loading a dictionary. Never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadWarning {
    #[error("{document} dictionary unavailable: {reason}")]
    DocumentUnavailable { document: &'static str, reason: String },

    #[error("expected a mapping at '{path}', ignoring it")]
    NotAMapping { path: String },

    #[error("expected a list of phrases at '{path}', ignoring it")]
    NotAList { path: String },

    #[error("non-numeric weight for '{term}' at '{path}', ignoring it")]
    InvalidWeight { path: String, term: String },

    #[error("empty term at '{path}', ignoring it")]
    EmptyTerm { path: String },

    #[error("legacy key '{legacy}' read as '{canonical}'")]
    LegacyKey { legacy: &'static str, canonical: &'static str },
}
