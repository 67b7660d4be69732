use radar_core::RadarError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MLError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type MLResult<T> = Result<T, MLError>;

impl From<MLError> for RadarError {
    fn from(err: MLError) -> Self {
        match err {
            MLError::InvalidResponse(msg) => RadarError::InvalidClassifierOutput(msg),
            other => RadarError::ClassifierUnavailable(other.to_string()),
        }
    }
}
