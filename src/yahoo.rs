use crate::models::Bar;
use crate::provider::{BarSource, ProviderError};
use chrono::{TimeZone, Utc};
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
// Yahoo rejects requests without a browser-looking user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) vwap-bias/0.1";

/// Client for the Yahoo Finance v8 chart API.
pub struct YahooClient<'a> {
    http: &'a Client,
    base_url: String,
}

impl<'a> YahooClient<'a> {
    pub fn new(http: &'a Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn with_base_url(http: &'a Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl BarSource for YahooClient<'_> {
    async fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        debug!("Fetching {} bars ({}, {})", symbol, interval, range);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("interval", interval), ("range", range)])
            .send()
            .await?;

        // Yahoo reports unknown symbols with a 404 carrying a JSON error
        // body; fold that into DataUnavailable rather than an HTTP failure.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::DataUnavailable {
                symbol: symbol.to_string(),
                interval: interval.to_string(),
                range: range.to_string(),
            });
        }

        let body = response.error_for_status()?.text().await?;
        parse_chart_body(symbol, interval, range, &body)
    }
}

/// Parses a chart API payload into timestamp-ordered bars.
pub fn parse_chart_body(
    symbol: &str,
    interval: &str,
    range: &str,
    body: &str,
) -> Result<Vec<Bar>, ProviderError> {
    let payload: ChartResponse = serde_json::from_str(body)
        .map_err(|err| ProviderError::Malformed(format!("chart payload: {}", err)))?;

    let data_unavailable = || ProviderError::DataUnavailable {
        symbol: symbol.to_string(),
        interval: interval.to_string(),
        range: range.to_string(),
    };

    if let Some(error) = payload.chart.error {
        warn!(
            "Provider error for {}: {} ({})",
            symbol,
            error.description.as_deref().unwrap_or("no description"),
            error.code.as_deref().unwrap_or("no code")
        );
        return Err(data_unavailable());
    }

    let result = payload
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0))
            }
        })
        .ok_or_else(data_unavailable)?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("missing quote block".to_string()))?;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (index, unix) in result.timestamp.iter().enumerate() {
        let date = match Utc.timestamp_opt(*unix, 0).single() {
            Some(date) => date,
            None => {
                return Err(ProviderError::Malformed(format!(
                    "timestamp {} out of range",
                    unix
                )))
            }
        };

        // Yahoo pads halted or not-yet-traded intervals with nulls; those
        // rows carry no observation and are dropped.
        let (Some(close), Some(high), Some(low)) = (
            value_at(&quote.close, index),
            value_at(&quote.high, index),
            value_at(&quote.low, index),
        ) else {
            continue;
        };
        let open = value_at(&quote.open, index).unwrap_or(close);
        let volume = value_at(&quote.volume, index).unwrap_or(0.0);

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars.sort_by(|a, b| a.date.cmp(&b.date));
    if bars.is_empty() {
        return Err(data_unavailable());
    }
    Ok(bars)
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Vec<Bar>, ProviderError> {
        parse_chart_body("TEST.NS", "5m", "12mo", body)
    }

    #[test]
    fn parses_quote_rows_into_bars() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704189000, 1704189300],
                    "indicators": {
                        "quote": [{
                            "open": [100.0, 100.5],
                            "high": [101.0, 101.5],
                            "low": [99.5, 100.0],
                            "close": [100.5, 101.2],
                            "volume": [1200, 800]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let bars = parse(body).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.5);
        assert_eq!(bars[1].volume, 800.0);
        assert!(bars[0].date < bars[1].date);
    }

    #[test]
    fn drops_null_padded_rows() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704189000, 1704189300, 1704189600],
                    "indicators": {
                        "quote": [{
                            "open": [100.0, null, 101.0],
                            "high": [101.0, null, 102.0],
                            "low": [99.5, null, 100.5],
                            "close": [100.5, null, 101.8],
                            "volume": [1200, null, 900]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let bars = parse(body).unwrap();
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn provider_error_body_maps_to_data_unavailable() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        assert!(matches!(
            parse(body),
            Err(ProviderError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn all_null_rows_map_to_data_unavailable() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704189000],
                    "indicators": {
                        "quote": [{
                            "open": [null], "high": [null], "low": [null],
                            "close": [null], "volume": [null]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        assert!(matches!(
            parse(body),
            Err(ProviderError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            parse("not json"),
            Err(ProviderError::Malformed(_))
        ));
    }
}
