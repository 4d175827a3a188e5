//! Immutable client configuration.

use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::{Error, Result};
use crate::http::{Params, RetryPolicy};

/// Production host of the Börsdata API.
pub const DEFAULT_HOST: &str = "https://apiservice.borsdata.se";

/// API version segment every endpoint lives under.
pub const DEFAULT_VERSION: &str = "v1";

/// Query parameter carrying the API key.
pub const AUTH_PARAM: &str = "authKey";

/// Everything a client needs to reach the API. Built once, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: String,
    version: String,
    auth_key: String,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
    user_agent: String,
}

impl ClientConfig {
    pub fn builder(auth_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(auth_key)
    }

    /// Configuration with every default and the given API key.
    pub fn new(auth_key: impl Into<String>) -> Result<Self> {
        Self::builder(auth_key).build()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn auth_key(&self) -> &str {
        &self.auth_key
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `{host}/{version}/`
    pub fn root(&self) -> String {
        format!("{}/{}/", self.host, self.version)
    }

    /// Absolute URL of an endpoint, without query string.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.root(), endpoint.trim_start_matches('/'))
    }

    /// Full query for one request: the credential first, then the overlay.
    pub fn query(&self, overlay: &Params) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(1 + overlay.iter().count());
        query.push((AUTH_PARAM.to_string(), self.auth_key.clone()));
        query.extend(
            overlay
                .iter()
                .filter(|(k, _)| *k != AUTH_PARAM)
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        query
    }

    /// The API key with everything but its edges hidden, for logs.
    pub fn masked_key(&self) -> String {
        mask(&self.auth_key)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("version", &self.version)
            .field("auth_key", &self.masked_key())
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}*********{}", head, tail)
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    host: String,
    version: String,
    auth_key: String,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
    user_agent: String,
}

impl ClientConfigBuilder {
    pub fn new(auth_key: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            version: DEFAULT_VERSION.to_string(),
            auth_key: auth_key.into(),
            retry: RetryPolicy::default(),
            timeout: None,
            // The production deployment is reached with verification turned off.
            accept_invalid_certs: true,
            user_agent: concat!("borsdata-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        if self.auth_key.trim().is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }

        let host = self.host.trim_end_matches('/').to_string();
        Url::parse(&host).map_err(|e| Error::Config(format!("invalid host '{}': {}", host, e)))?;

        let version = self.version.trim_matches('/').to_string();
        if version.is_empty() {
            return Err(Error::Config("API version must not be empty".to_string()));
        }

        Ok(ClientConfig {
            host,
            version,
            auth_key: self.auth_key,
            retry: self.retry,
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
            user_agent: self.user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("0123456789abcdef").unwrap();
        assert_eq!(config.host(), "https://apiservice.borsdata.se");
        assert_eq!(config.version(), "v1");
        assert_eq!(config.root(), "https://apiservice.borsdata.se/v1/");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.timeout(), None);
        assert!(config.accept_invalid_certs());
        assert!(config.user_agent().starts_with("borsdata-rs/"));
    }

    #[test]
    fn test_endpoint_url() {
        let config = ClientConfig::builder("key-123456789")
            .host("http://127.0.0.1:1234/")
            .build()
            .unwrap();
        assert_eq!(
            config.endpoint_url("instruments/3/stockprices"),
            "http://127.0.0.1:1234/v1/instruments/3/stockprices"
        );
        assert_eq!(
            config.endpoint_url("/markets"),
            "http://127.0.0.1:1234/v1/markets"
        );
    }

    #[test]
    fn test_query_puts_credential_first() {
        let config = ClientConfig::new("secret-key-value").unwrap();
        let overlay = Params::new().with("from", "2020-01-01").with("to", "2020-01-31");
        let query = config.query(&overlay);
        assert_eq!(
            query,
            vec![
                ("authKey".to_string(), "secret-key-value".to_string()),
                ("from".to_string(), "2020-01-01".to_string()),
                ("to".to_string(), "2020-01-31".to_string()),
            ]
        );
    }

    #[test]
    fn test_overlay_cannot_replace_credential() {
        let config = ClientConfig::new("secret-key-value").unwrap();
        let overlay = Params::new().with("authKey", "other");
        let query = config.query(&overlay);
        assert_eq!(query.len(), 1);
        assert_eq!(query[0].1, "secret-key-value");
    }

    #[test]
    fn test_query_does_not_mutate_config() {
        let config = ClientConfig::new("secret-key-value").unwrap();
        let before = config.clone();
        let _ = config.query(&Params::new().with("date", "2021-01-01"));
        assert_eq!(config, before);
        assert_eq!(config.query(&Params::new()).len(), 1);
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = ClientConfig::new("   ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_key_is_sent_unchanged() {
        let config = ClientConfig::new(" padded-key-0001 ").unwrap();
        assert_eq!(config.auth_key(), " padded-key-0001 ");
        assert_eq!(config.query(&Params::new())[0].1, " padded-key-0001 ");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result = ClientConfig::builder("secret-key-value")
            .host("not a url")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_version_rejected() {
        let result = ClientConfig::builder("secret-key-value").version("/").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_masks_key() {
        let config = ClientConfig::new("abcd1234efgh5678").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("abcd1234efgh5678"));
        assert!(debug.contains("abcd*********78"));
    }

    #[test]
    fn test_mask_short_key() {
        assert_eq!(mask("short"), "*****");
        assert_eq!(mask(""), "");
    }
}
