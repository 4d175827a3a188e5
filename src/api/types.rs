use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// A stock exchange or index list.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: i64,
    pub name: String,
    pub country_id: Option<i64>,
    pub is_index: bool,
    pub exchange_name: Option<String>,
}

/// An industry. Every branch belongs to a sector.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub sector_id: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    pub name: String,
}

/// A listed instrument.
///
/// Market, sector, branch and country are referenced by id only; nothing is
/// resolved client side.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub ins_id: i64,
    pub name: String,
    pub url_name: String,
    /// Instrument type code (share, index, preference share, ...).
    pub instrument: i32,
    pub isin: Option<String>,
    pub ticker: String,
    pub yahoo: Option<String>,
    pub sector_id: Option<i64>,
    pub market_id: i64,
    pub branch_id: Option<i64>,
    pub country_id: Option<i64>,
    pub listing_date: Option<Timestamp>,
    pub stock_price_currency: Option<String>,
    pub report_currency: Option<String>,
}

/// Last time an instrument's data changed on the server.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentUpdate {
    pub ins_id: i64,
    pub updated_at: Timestamp,
}

/// One financial report (year, rolling twelve months or quarter).
///
/// Amounts are in millions of the report currency, as delivered.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Report {
    pub year: i32,
    pub period: i32,
    pub revenues: Option<f64>,
    #[serde(rename = "gross_Income")]
    pub gross_income: Option<f64>,
    #[serde(rename = "operating_Income")]
    pub operating_income: Option<f64>,
    #[serde(rename = "profit_Before_Tax")]
    pub profit_before_tax: Option<f64>,
    #[serde(rename = "profit_To_Equity_Holders")]
    pub profit_to_equity_holders: Option<f64>,
    #[serde(rename = "earnings_Per_Share")]
    pub earnings_per_share: Option<f64>,
    #[serde(rename = "number_Of_Shares")]
    pub number_of_shares: Option<f64>,
    pub dividend: Option<f64>,
    #[serde(rename = "intangible_Assets")]
    pub intangible_assets: Option<f64>,
    #[serde(rename = "tangible_Assets")]
    pub tangible_assets: Option<f64>,
    #[serde(rename = "financial_Assets")]
    pub financial_assets: Option<f64>,
    #[serde(rename = "non_Current_Assets")]
    pub non_current_assets: Option<f64>,
    #[serde(rename = "cash_And_Equivalents")]
    pub cash_and_equivalents: Option<f64>,
    #[serde(rename = "current_Assets")]
    pub current_assets: Option<f64>,
    #[serde(rename = "total_Assets")]
    pub total_assets: Option<f64>,
    #[serde(rename = "total_Equity")]
    pub total_equity: Option<f64>,
    #[serde(rename = "non_Current_Liabilities")]
    pub non_current_liabilities: Option<f64>,
    #[serde(rename = "current_Liabilities")]
    pub current_liabilities: Option<f64>,
    #[serde(rename = "total_Liabilities_And_Equity")]
    pub total_liabilities_and_equity: Option<f64>,
    #[serde(rename = "net_Debt")]
    pub net_debt: Option<f64>,
    #[serde(rename = "cash_Flow_From_Operating_Activities")]
    pub cash_flow_from_operating_activities: Option<f64>,
    #[serde(rename = "cash_Flow_From_Investing_Activities")]
    pub cash_flow_from_investing_activities: Option<f64>,
    #[serde(rename = "cash_Flow_From_Financing_Activities")]
    pub cash_flow_from_financing_activities: Option<f64>,
    #[serde(rename = "cash_Flow_For_The_Year")]
    pub cash_flow_for_the_year: Option<f64>,
    #[serde(rename = "free_Cash_Flow")]
    pub free_cash_flow: Option<f64>,
    #[serde(rename = "stock_Price_Average")]
    pub stock_price_average: Option<f64>,
    #[serde(rename = "stock_Price_High")]
    pub stock_price_high: Option<f64>,
    #[serde(rename = "stock_Price_Low")]
    pub stock_price_low: Option<f64>,
    #[serde(rename = "report_Start_Date")]
    pub report_start_date: Option<Timestamp>,
    #[serde(rename = "report_End_Date")]
    pub report_end_date: Option<Timestamp>,
    #[serde(rename = "broken_Fiscal_Year")]
    pub broken_fiscal_year: bool,
    pub currency: Option<String>,
    #[serde(rename = "currency_Ratio")]
    pub currency_ratio: Option<f64>,
    #[serde(rename = "net_Sales")]
    pub net_sales: Option<f64>,
    #[serde(rename = "report_Date")]
    pub report_date: Option<Timestamp>,
}

/// One trading day for one instrument.
///
/// The instrument id is only present in the all-instruments endpoints
/// (`last` and `date`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StockPrice {
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<i64>,
    #[serde(rename = "d")]
    pub date: NaiveDate,
    #[serde(rename = "h")]
    pub high: Option<f64>,
    #[serde(rename = "l")]
    pub low: Option<f64>,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "o")]
    pub open: Option<f64>,
    #[serde(rename = "v")]
    pub volume: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockSplit {
    pub instrument_id: i64,
    pub split_type: String,
    /// Split ratio as delivered, e.g. `"2:1"`.
    pub ratio: String,
    pub split_date: Timestamp,
}

/// Swedish/English display names for a translation key.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationMetadata {
    pub translation_key: String,
    pub name_sv: Option<String>,
    pub name_en: Option<String>,
}

/// Report granularity, used as the last path segment of the reports endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportType {
    Year,
    /// Rolling twelve months.
    R12,
    #[default]
    Quarter,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Year => "year",
            ReportType::R12 => "r12",
            ReportType::Quarter => "quarter",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
