use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response at '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl TmdbError {
    /// True when the request hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TmdbError::Request(e) if e.is_timeout())
    }
}
