use anyhow::anyhow;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single OHLCV observation at either intraday or daily granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Calendar year+month identifier used to group and index series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_datetime(date: DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("Month key must be YYYY-MM (value: {})", s))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| anyhow!("Invalid year in month key '{}'", s))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| anyhow!("Invalid month in month key '{}'", s))?;
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month in '{}' must be between 1 and 12", s));
        }
        Ok(Self { year, month })
    }
}

/// Directional bet taken for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Long,
    Short,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Long => "Long",
            Bias::Short => "Short",
        }
    }
}

/// How a simulated monthly trade resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    TargetHit,
    Stopped,
    Expired,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::TargetHit => "Target Hit",
            Outcome::Stopped => "Stopped",
            Outcome::Expired => "Expired",
        }
    }
}

/// One simulated month. Reported fields are rounded to 2 decimal places;
/// the simulator compares unrounded values before constructing this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub month: MonthKey,
    pub reference: f64,
    pub entry: f64,
    pub bias: Bias,
    pub exit: f64,
    pub outcome: Outcome,
    pub pnl: f64,
}

/// Chronological trade records plus the running cumulative PnL column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub symbol: String,
    pub records: Vec<TradeRecord>,
    pub cumulative_pnl: Vec<f64>,
}

impl BacktestResult {
    pub fn new(symbol: String, records: Vec<TradeRecord>) -> Self {
        let mut running = 0.0;
        let cumulative_pnl = records
            .iter()
            .map(|record| {
                running += record.pnl;
                round2(running)
            })
            .collect();
        Self {
            symbol,
            records,
            cumulative_pnl,
        }
    }

    pub fn total_pnl(&self) -> f64 {
        round2(self.records.iter().map(|record| record.pnl).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Live forward classification of the current price against its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiveBias {
    Bullish,
    Bearish,
    Undefined,
}

impl LiveBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveBias::Bullish => "Bullish",
            LiveBias::Bearish => "Bearish",
            LiveBias::Undefined => "Undefined",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSignal {
    pub symbol: String,
    pub month: MonthKey,
    pub reference: Option<f64>,
    pub price: f64,
    pub bias: LiveBias,
}

/// Rounds to 2 decimal places for reporting.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(month: MonthKey, pnl: f64) -> TradeRecord {
        TradeRecord {
            month,
            reference: 100.0,
            entry: 100.0,
            bias: Bias::Long,
            exit: 100.0 + pnl,
            outcome: Outcome::TargetHit,
            pnl,
        }
    }

    #[test]
    fn month_key_roundtrip() {
        let key = MonthKey::new(2024, 3);
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<MonthKey>().unwrap(), key);
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024".parse::<MonthKey>().is_err());
    }

    #[test]
    fn month_key_truncates_timestamp() {
        let date = Utc.with_ymd_and_hms(2023, 11, 30, 15, 25, 0).unwrap();
        assert_eq!(MonthKey::from_datetime(date), MonthKey::new(2023, 11));
    }

    #[test]
    fn month_keys_order_chronologically() {
        assert!(MonthKey::new(2023, 12) < MonthKey::new(2024, 1));
        assert!(MonthKey::new(2024, 1) < MonthKey::new(2024, 2));
    }

    #[test]
    fn cumulative_pnl_is_a_running_sum() {
        let records = vec![
            record(MonthKey::new(2024, 2), 5.0),
            record(MonthKey::new(2024, 3), -3.0),
            record(MonthKey::new(2024, 4), 2.0),
        ];
        let result = BacktestResult::new("AAA".to_string(), records);
        assert_eq!(result.cumulative_pnl, vec![5.0, 2.0, 4.0]);
        assert_eq!(result.total_pnl(), 4.0);
    }

    #[test]
    fn empty_result_is_valid() {
        let result = BacktestResult::new("AAA".to_string(), Vec::new());
        assert!(result.is_empty());
        assert!(result.cumulative_pnl.is_empty());
        assert_eq!(result.total_pnl(), 0.0);
    }

    #[test]
    fn round2_reports_two_decimals() {
        assert_eq!(round2(15.004), 15.0);
        assert_eq!(round2(-2.344), -2.34);
        assert_eq!(round2(1.675000000001), 1.68);
    }
}
