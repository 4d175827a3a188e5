//! Blocking client for the Börsdata financial data REST API.
//!
//! ```no_run
//! use borsdata::Borsdata;
//!
//! # fn main() -> borsdata::Result<()> {
//! let client = Borsdata::new("my-api-key")?;
//! for market in client.get_markets()? {
//!     println!("{} {}", market.id, market.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every request carries the API key as the `authKey` query parameter. When the
//! server answers 429 the request is resent after a fixed delay, without limit
//! unless a bounded [`RetryPolicy`] is configured. Any other non-success status
//! is returned as [`Error::Api`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{
    Borsdata, Branch, Country, Instrument, InstrumentUpdate, Market, Report, ReportType, Sector,
    StockPrice, StockSplit, Timestamp, TranslationMetadata,
};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use http::{Params, RetryPolicy};
