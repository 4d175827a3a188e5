//! Error type shared by the request pipeline and the endpoint methods.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while talking to the Börsdata API.
///
/// URLs carried by the variants never include the `authKey` query parameter.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP response (connect, TLS, timeout, body read).
    #[error("Failed to send request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status that is neither success nor rate limited.
    #[error("Failed to communicate with {url} status: {status}")]
    Api {
        url: String,
        status: u16,
        body: String,
    },

    /// A bounded retry policy ran out of attempts while the server kept answering 429.
    #[error("Rate limit still in effect for {url} after {attempts} attempts")]
    RateLimited { url: String, attempts: u32 },

    /// The body was not valid JSON, or did not match the record schema.
    #[error("Failed to parse JSON response from {url}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but lacks the array field the endpoint maps from.
    #[error("Response from {url} has no '{field}' field")]
    MissingField { url: String, field: &'static str },

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(crate::http::RATE_LIMIT_STATUS),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
