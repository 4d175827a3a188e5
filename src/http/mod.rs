//! HTTP request pipeline with rate-limit retry and error handling.

mod client;
mod params;
mod retry;
mod transport;

pub use client::HttpClient;
pub use params::Params;
pub use retry::{RATE_LIMIT_STATUS, RETRY_DELAY_MS, RetryPolicy, StatusClass, classify_status};
pub use transport::{BlockingTransport, RawResponse, Transport};

#[cfg(test)]
pub use transport::MockTransport;
