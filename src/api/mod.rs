//! Endpoint methods and the records they return.

mod client;
mod timestamp;
mod types;

pub use client::Borsdata;
pub use timestamp::Timestamp;
pub use types::{
    Branch, Country, Instrument, InstrumentUpdate, Market, Report, ReportType, Sector, StockPrice,
    StockSplit, TranslationMetadata,
};
