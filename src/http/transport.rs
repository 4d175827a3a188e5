//! Single-shot HTTP GET, the seam between the pipeline and the network.

use log::debug;
use reqwest::blocking::Client;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends exactly one GET request. Retrying is the caller's business.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse>;
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct BlockingTransport {
    client: Client,
}

impl BlockingTransport {
    /// Creates a transport wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the underlying client from the TLS, timeout and user agent settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent())
            .danger_accept_invalid_certs(config.accept_invalid_certs());

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::new(client))
    }
}

impl Transport for BlockingTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse> {
        // reqwest errors embed the request URL, which carries the API key.
        let transport_error = |e: reqwest::Error| Error::Transport {
            url: url.to_string(),
            source: e.without_url(),
        };

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(RawResponse { status, body })
    }
}
