#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures while parsing the daily-trends response body.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("response body contains no JSON object")]
    MissingPrefix,

    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("response contained no trending searches")]
    Empty,
}

pub type Result<T> = std::result::Result<T, TrendError>;
