use thiserror::Error;

/// Errors returned by the Twitter API client.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by Twitter API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// 401 or 403: the bearer token is missing, revoked or lacks access.
    #[error("unauthorized (HTTP {status}): check TWITTER_BEARER_TOKEN")]
    Unauthorized { status: u16 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A 200 response whose body carried an `errors` array and no `data`.
    #[error("Twitter API error: {0}")]
    ApiError(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
