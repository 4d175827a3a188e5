use chrono::NaiveDate;
use log::debug;

use super::types::{
    Branch, Country, Instrument, InstrumentUpdate, Market, Report, ReportType, Sector, StockPrice,
    StockSplit, TranslationMetadata,
};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{BlockingTransport, HttpClient, Params, Transport};

/// Format of date query parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Blocking client for the Börsdata REST API.
///
/// Each method issues one logical request (plus any rate-limit retries) and
/// returns freshly parsed records. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Borsdata<T: Transport = BlockingTransport> {
    http: HttpClient<T>,
}

impl Borsdata<BlockingTransport> {
    /// Creates a client for the production API with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

impl<T: Transport> Borsdata<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            http: HttpClient::with_transport(config, transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Returns all markets.
    #[tracing::instrument(skip(self))]
    pub fn get_markets(&self) -> Result<Vec<Market>> {
        self.get_data_object("markets")
    }

    /// Returns all branches (industries).
    #[tracing::instrument(skip(self))]
    pub fn get_branches(&self) -> Result<Vec<Branch>> {
        self.get_data_object("branches")
    }

    #[tracing::instrument(skip(self))]
    pub fn get_sectors(&self) -> Result<Vec<Sector>> {
        self.get_data_object("sectors")
    }

    #[tracing::instrument(skip(self))]
    pub fn get_countries(&self) -> Result<Vec<Country>> {
        self.get_data_object("countries")
    }

    #[tracing::instrument(skip(self))]
    pub fn get_translation_metadata(&self) -> Result<Vec<TranslationMetadata>> {
        self.get_data_object("translationmetadata")
    }

    /// Returns all instruments, optionally keeping only those listed on one
    /// of `markets`.
    ///
    /// The API has no market filter; the full list is fetched and filtered
    /// here, preserving order.
    #[tracing::instrument(skip(self))]
    pub fn get_instruments(&self, markets: Option<&[i64]>) -> Result<Vec<Instrument>> {
        let instruments: Vec<Instrument> = self.get_data_object("instruments")?;

        let Some(markets) = markets else {
            return Ok(instruments);
        };

        let total = instruments.len();
        let filtered: Vec<Instrument> = instruments
            .into_iter()
            .filter(|instrument| markets.contains(&instrument.market_id))
            .collect();

        debug!(
            "Kept {} of {} instruments for markets {:?}",
            filtered.len(),
            total,
            markets
        );

        Ok(filtered)
    }

    /// Returns the last update time of every instrument.
    #[tracing::instrument(skip(self))]
    pub fn get_instruments_updated(&self) -> Result<Vec<InstrumentUpdate>> {
        self.http
            .get_list("instruments/updated", &Params::new(), "instruments")
    }

    /// Returns the reports of one instrument at the given granularity.
    #[tracing::instrument(skip(self))]
    pub fn get_instrument_reports(
        &self,
        ins_id: i64,
        report_type: ReportType,
    ) -> Result<Vec<Report>> {
        let endpoint = format!("instruments/{}/reports/{}", ins_id, report_type);
        self.http.get_list(&endpoint, &Params::new(), "reports")
    }

    /// Returns the daily prices of one instrument.
    ///
    /// The range is only sent when both `start` and `end` are given;
    /// otherwise the server's default window (up to ten years) applies.
    #[tracing::instrument(skip(self))]
    pub fn get_instrument_stock_price(
        &self,
        ins_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<StockPrice>> {
        let params = match (start, end) {
            (Some(start), Some(end)) => Params::new()
                .with("from", start.format(DATE_FORMAT))
                .with("to", end.format(DATE_FORMAT)),
            _ => Params::new(),
        };

        let endpoint = format!("instruments/{}/stockprices", ins_id);
        self.http.get_list(&endpoint, &params, "stockPricesList")
    }

    /// Returns the latest price of every instrument.
    #[tracing::instrument(skip(self))]
    pub fn get_instrument_stock_price_last(&self) -> Result<Vec<StockPrice>> {
        self.http
            .get_list("instruments/stockprices/last", &Params::new(), "stockPricesList")
    }

    /// Returns the price of every instrument traded on `date`.
    #[tracing::instrument(skip(self))]
    pub fn get_instrument_stock_price_date(&self, date: NaiveDate) -> Result<Vec<StockPrice>> {
        let params = Params::new().with("date", date.format(DATE_FORMAT));
        self.http
            .get_list("instruments/stockprices/date", &params, "stockPricesList")
    }

    /// Returns stock splits for all instruments over the last year.
    #[tracing::instrument(skip(self))]
    pub fn get_stock_splits(&self) -> Result<Vec<StockSplit>> {
        self.http
            .get_list("instruments/StockSplits", &Params::new(), "stockSplitList")
    }

    /// Fetches an endpoint whose array field shares the endpoint's name.
    fn get_data_object<R: serde::de::DeserializeOwned>(
        &self,
        data_type: &'static str,
    ) -> Result<Vec<R>> {
        self.http.get_list(data_type, &Params::new(), data_type)
    }
}
