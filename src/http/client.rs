//! The request pipeline shared by every endpoint.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::params::Params;
use super::retry::{StatusClass, classify_status};
use super::transport::{BlockingTransport, RawResponse, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Authenticated GET client with rate-limit retry.
#[derive(Debug, Clone)]
pub struct HttpClient<T: Transport = BlockingTransport> {
    config: ClientConfig,
    transport: T,
}

impl HttpClient<BlockingTransport> {
    /// Creates a client backed by a blocking reqwest transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = BlockingTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs a GET on `endpoint` and parses the JSON body.
    ///
    /// Rate-limited responses are retried according to the configured
    /// [`RetryPolicy`](super::RetryPolicy). Any other non-success status fails
    /// immediately with [`Error::Api`].
    #[tracing::instrument(skip(self, params))]
    pub fn get_json(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let url = self.config.endpoint_url(endpoint);
        self.fetch_json(&url, params)
    }

    /// Performs a GET on `endpoint` and maps each element of the `field`
    /// array into `R`.
    ///
    /// A `null` array is read as empty; an absent one is an error.
    #[tracing::instrument(skip(self, params))]
    pub fn get_list<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &Params,
        field: &'static str,
    ) -> Result<Vec<R>> {
        let url = self.config.endpoint_url(endpoint);
        let mut payload = self.fetch_json(&url, params)?;

        let items = match payload.get_mut(field) {
            Some(items) => items.take(),
            None => return Err(Error::MissingField { url, field }),
        };

        if items.is_null() {
            debug!("{}: '{}' is null, returning no records", url, field);
            return Ok(Vec::new());
        }

        let records: Vec<R> =
            serde_json::from_value(items).map_err(|source| Error::Json { url, source })?;

        debug!("Parsed {} records from '{}'", records.len(), field);

        Ok(records)
    }

    fn fetch_json(&self, url: &str, params: &Params) -> Result<Value> {
        let response = self.send_with_retry(url, params)?;

        serde_json::from_str(&response.body).map_err(|source| Error::Json {
            url: url.to_string(),
            source,
        })
    }

    fn send_with_retry(&self, url: &str, params: &Params) -> Result<RawResponse> {
        let policy = self.config.retry_policy();
        let query = self.config.query(params);
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            debug!(
                "GET {} (attempt {}, key {})...",
                url,
                attempt,
                self.config.masked_key()
            );

            let response = self.transport.get(url, &query)?;

            match classify_status(response.status) {
                StatusClass::Success => return Ok(response),
                StatusClass::Failure => {
                    debug!("GET {}: non-retryable status {}", url, response.status);
                    return Err(Error::Api {
                        url: url.to_string(),
                        status: response.status,
                        body: response.body,
                    });
                }
                StatusClass::RateLimited => {
                    if !policy.should_retry(attempt) {
                        warn!("GET {}: still rate limited after {} attempts", url, attempt);
                        return Err(Error::RateLimited {
                            url: url.to_string(),
                            attempts: attempt,
                        });
                    }

                    debug!(
                        "GET {}: rate limited, retrying in {}ms...",
                        url,
                        policy.delay.as_millis()
                    );
                    std::thread::sleep(policy.delay);
                }
            }
        }
    }
}
