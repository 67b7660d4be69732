use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RadarError {
    #[error("Malformed article #{index}: missing field '{field}'")]
    MalformedArticle { index: usize, field: &'static str },

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Invalid classifier output: {0}")]
    InvalidClassifierOutput(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RadarError {
    /// Index of the article that caused the error, when the error is tied to one.
    pub fn article_index(&self) -> Option<usize> {
        match self {
            RadarError::MalformedArticle { index, .. } => Some(*index),
            _ => None,
        }
    }
}
