use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum DuprError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be decoded as JSON.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// Logging in failed, or a request needed credentials the client does not hold.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The club roster could not be fetched. This aborts a crawl.
    #[error("members of club {club_id} are unavailable: {reason}")]
    MembersUnavailable {
        /// The club whose roster was requested.
        club_id: String,
        /// The underlying failure, rendered as text.
        reason: String,
    },
}

impl DuprError {
    /// Returns `true` for the error that aborts a whole crawl.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MembersUnavailable { .. })
    }
}
