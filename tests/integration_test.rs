use std::time::{Duration, Instant};

use borsdata::{Borsdata, ClientConfig, Error, ReportType, RetryPolicy};
use chrono::NaiveDate;
use mockito::{Matcher, Server};

const KEY: &str = "itest-key-0001";

fn client(server: &Server, retry: RetryPolicy) -> Borsdata {
    let config = ClientConfig::builder(KEY)
        .host(server.url())
        .retry_policy(retry)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    Borsdata::with_config(config).unwrap()
}

fn auth_only() -> Matcher {
    Matcher::Exact(format!("authKey={}", KEY))
}

#[test_log::test]
fn test_end_to_end_instruments_filtered_by_market() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v1/instruments")
        .match_query(auth_only())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"instruments": [
                {"insId": 10, "name": "One", "urlName": "one", "instrument": 0, "ticker": "ONE", "marketId": 1},
                {"insId": 11, "name": "Three", "urlName": "three", "instrument": 0, "ticker": "THR", "marketId": 3},
                {"insId": 12, "name": "Five", "urlName": "five", "instrument": 0, "ticker": "FIV", "marketId": 5},
                {"insId": 13, "name": "Seven", "urlName": "seven", "instrument": 0, "ticker": "SEV", "marketId": 7},
                {"insId": 14, "name": "Nine", "urlName": "nine", "instrument": 0, "ticker": "NIN", "marketId": 9},
                {"insId": 15, "name": "Seven B", "urlName": "seven-b", "instrument": 0, "ticker": "SVB", "marketId": 7}
            ]}"#,
        )
        .expect(1)
        .create();

    let client = client(&server, RetryPolicy::default());
    let instruments = client.get_instruments(Some(&[3, 7])).unwrap();

    mock.assert();
    let ids: Vec<i64> = instruments.iter().map(|i| i.ins_id).collect();
    assert_eq!(ids, vec![11, 13, 15]);
}

#[test_log::test]
fn test_rate_limit_is_retried_until_success() {
    let mut server = Server::new();

    let limited = server
        .mock("GET", "/v1/markets")
        .match_query(auth_only())
        .with_status(429)
        .expect(2)
        .create();

    let ok = server
        .mock("GET", "/v1/markets")
        .match_query(auth_only())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"markets": [{"id": 1, "name": "Large Cap", "countryId": 1, "isIndex": false, "exchangeName": "Nasdaq Stockholm"}]}"#)
        .expect(1)
        .create();

    let delay = Duration::from_millis(20);
    let client = client(&server, RetryPolicy::unbounded(delay));

    let started = Instant::now();
    let markets = client.get_markets().unwrap();

    limited.assert();
    ok.assert();
    assert!(started.elapsed() >= delay * 2);
    assert_eq!(markets.len(), 1);
    assert_eq!(markets[0].name, "Large Cap");
}

#[test_log::test]
fn test_bounded_retry_policy_surfaces_rate_limit() {
    let mut server = Server::new();

    let limited = server
        .mock("GET", "/v1/sectors")
        .match_query(auth_only())
        .with_status(429)
        .expect(3)
        .create();

    let client = client(&server, RetryPolicy::bounded(Duration::from_millis(1), 3));
    let err = client.get_sectors().unwrap_err();

    limited.assert();
    assert!(matches!(err, Error::RateLimited { attempts: 3, .. }));
}

#[test_log::test]
fn test_error_status_is_not_retried() {
    let mut server = Server::new();

    let failing = server
        .mock("GET", "/v1/instruments/101/stockprices")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create();

    let client = client(&server, RetryPolicy::unbounded(Duration::from_millis(1)));
    let err = client
        .get_instrument_stock_price(
            101,
            NaiveDate::from_ymd_opt(2020, 1, 1),
            NaiveDate::from_ymd_opt(2020, 1, 31),
        )
        .unwrap_err();

    failing.assert();
    match err {
        Error::Api { url, status, body } => {
            assert_eq!(url, format!("{}/v1/instruments/101/stockprices", server.url()));
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[test_log::test]
fn test_stock_price_range_is_sent_as_query() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v1/instruments/101/stockprices")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("authKey".into(), KEY.into()),
            Matcher::UrlEncoded("from".into(), "2020-01-01".into()),
            Matcher::UrlEncoded("to".into(), "2020-01-31".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"instrument": 101, "stockPricesList": [
                {"d": "2020-01-02", "h": 11.0, "l": 9.5, "c": 10.0, "o": 9.75, "v": 1000}
            ]}"#,
        )
        .expect(1)
        .create();

    let client = client(&server, RetryPolicy::default());
    let prices = client
        .get_instrument_stock_price(
            101,
            NaiveDate::from_ymd_opt(2020, 1, 1),
            NaiveDate::from_ymd_opt(2020, 1, 31),
        )
        .unwrap();

    mock.assert();
    assert_eq!(prices.len(), 1);
    assert_eq!(prices[0].volume, Some(1000));
}

#[test_log::test]
fn test_stock_price_without_full_range_sends_no_dates() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/v1/instruments/101/stockprices")
        .match_query(auth_only())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"stockPricesList": []}"#)
        .expect(1)
        .create();

    let client = client(&server, RetryPolicy::default());
    let prices = client
        .get_instrument_stock_price(101, NaiveDate::from_ymd_opt(2020, 1, 1), None)
        .unwrap();

    mock.assert();
    assert!(prices.is_empty());
}

#[test_log::test]
fn test_reports_and_stock_splits() {
    let mut server = Server::new();

    let reports = server
        .mock("GET", "/v1/instruments/3/reports/quarter")
        .match_query(auth_only())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"instrument": 3, "reports": [{
                "year": 2020, "period": 1, "revenues": 1250.5, "broken_Fiscal_Year": false,
                "currency": "SEK", "report_End_Date": "2020-03-31T00:00:00"
            }]}"#,
        )
        .expect(1)
        .create();

    let splits = server
        .mock("GET", "/v1/instruments/StockSplits")
        .match_query(auth_only())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"stockSplitList": [
                {"instrumentId": 97, "splitType": "Split", "ratio": "2:1", "splitDate": "2020-05-12T00:00:00"},
                {"instrumentId": 98, "splitType": "Reverse", "ratio": "1:10", "splitDate": "2020-06-01T00:00:00"}
            ]}"#,
        )
        .expect(1)
        .create();

    let client = client(&server, RetryPolicy::default());

    let quarter = client
        .get_instrument_reports(3, ReportType::default())
        .unwrap();
    let split_list = client.get_stock_splits().unwrap();

    reports.assert();
    splits.assert();
    assert_eq!(quarter.len(), 1);
    assert_eq!(quarter[0].currency.as_deref(), Some("SEK"));
    assert_eq!(
        quarter[0].report_end_date.as_ref().map(|d| d.date()),
        NaiveDate::from_ymd_opt(2020, 3, 31)
    );
    assert_eq!(split_list.len(), 2);
    assert_eq!(split_list[1].instrument_id, 98);
}

#[test_log::test]
fn test_schema_mismatch_is_json_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/v1/countries")
        .match_query(auth_only())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"countries": [{"id": "SE"}]}"#)
        .create();

    let client = client(&server, RetryPolicy::default());
    let err = client.get_countries().unwrap_err();

    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn test_empty_api_key_is_rejected() {
    let result = Borsdata::new("");
    assert!(matches!(result, Err(Error::Config(_))));
}
