use thiserror::Error;

/// Errors returned by the `YouTube` Data API client.
///
/// Request URLs carry the API key, so [`YoutubeError::Http`] values are
/// always stripped of their URL before being constructed.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("YouTube API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured channel id resolved to no channel.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
