use reqwest::StatusCode;

/// Failure of a single GET against the API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Unexpected response shape from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to write report: {0}")]
    Output(String),
}

pub type AppResult<T> = Result<T, AppError>;
