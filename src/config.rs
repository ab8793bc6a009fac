use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Immutable universe configuration: which indices exist, which stocks
/// belong to each, and the fetch granularity/lookback. Built once at
/// startup and passed to the engine; nothing here is process-global.
#[derive(Debug, Clone, Deserialize)]
pub struct UniverseConfig {
    pub indices: Vec<IndexUniverse>,
    #[serde(default = "default_intraday_interval")]
    pub intraday_interval: String,
    #[serde(default = "default_period")]
    pub period: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexUniverse {
    pub name: String,
    pub ticker: String,
    pub stocks: Vec<StockEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockEntry {
    pub name: String,
    pub ticker: String,
}

/// A resolved stock/index pair ready to backtest.
#[derive(Debug, Clone)]
pub struct Selection {
    pub index_name: String,
    pub index_ticker: String,
    pub stock_name: String,
    pub stock_ticker: String,
}

fn default_intraday_interval() -> String {
    "5m".to_string()
}

fn default_period() -> String {
    "12mo".to_string()
}

impl Default for UniverseConfig {
    fn default() -> Self {
        let stock = |name: &str, ticker: &str| StockEntry {
            name: name.to_string(),
            ticker: ticker.to_string(),
        };
        let index = |name: &str, ticker: &str, stocks: Vec<StockEntry>| IndexUniverse {
            name: name.to_string(),
            ticker: ticker.to_string(),
            stocks,
        };

        Self {
            indices: vec![
                index(
                    "Nifty50",
                    "^NSEI",
                    vec![
                        stock("Reliance", "RELIANCE.NS"),
                        stock("HDFC Bank", "HDFCBANK.NS"),
                        stock("ICICI Bank", "ICICIBANK.NS"),
                        stock("Infosys", "INFY.NS"),
                        stock("TCS", "TCS.NS"),
                    ],
                ),
                index(
                    "BankNifty",
                    "^NSEBANK",
                    vec![
                        stock("HDFC Bank", "HDFCBANK.NS"),
                        stock("ICICI Bank", "ICICIBANK.NS"),
                        stock("Axis Bank", "AXISBANK.NS"),
                        stock("Kotak Bank", "KOTAKBANK.NS"),
                        stock("SBI", "SBIN.NS"),
                    ],
                ),
                index(
                    "FinNifty",
                    "^NSEFINNIFTY",
                    vec![
                        stock("HDFC Bank", "HDFCBANK.NS"),
                        stock("ICICI Bank", "ICICIBANK.NS"),
                        stock("HDFC Ltd", "HDFC.NS"),
                        stock("Axis Bank", "AXISBANK.NS"),
                        stock("Kotak Bank", "KOTAKBANK.NS"),
                    ],
                ),
            ],
            intraday_interval: default_intraday_interval(),
            period: default_period(),
        }
    }
}

impl UniverseConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: UniverseConfig = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.indices.is_empty() {
            return Err(anyhow!("Config must define at least one index"));
        }
        for index in &self.indices {
            if index.name.trim().is_empty() || index.ticker.trim().is_empty() {
                return Err(anyhow!("Index entries need both a name and a ticker"));
            }
            if index.stocks.is_empty() {
                return Err(anyhow!("Index {} has no stocks configured", index.name));
            }
            for stock in &index.stocks {
                if stock.name.trim().is_empty() || stock.ticker.trim().is_empty() {
                    return Err(anyhow!(
                        "Stock entries under {} need both a name and a ticker",
                        index.name
                    ));
                }
            }
        }
        if self.intraday_interval.trim().is_empty() {
            return Err(anyhow!("intraday_interval must not be empty"));
        }
        if self.period.trim().is_empty() {
            return Err(anyhow!("period must not be empty"));
        }
        Ok(())
    }

    pub fn index(&self, name: &str) -> Option<&IndexUniverse> {
        self.indices
            .iter()
            .find(|index| index.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Resolves an index/stock name pair to their tickers, with an error
    /// that lists the valid choices when the lookup fails.
    pub fn resolve(&self, index_name: &str, stock_name: &str) -> Result<Selection> {
        let index = self.index(index_name).ok_or_else(|| {
            anyhow!(
                "Unknown index '{}'. Available: {}",
                index_name,
                self.indices
                    .iter()
                    .map(|index| index.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;

        let stock = index
            .stocks
            .iter()
            .find(|stock| stock.name.eq_ignore_ascii_case(stock_name.trim()))
            .ok_or_else(|| {
                anyhow!(
                    "Unknown stock '{}' in index {}. Available: {}",
                    stock_name,
                    index.name,
                    index
                        .stocks
                        .iter()
                        .map(|stock| stock.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;

        Ok(Selection {
            index_name: index.name.clone(),
            index_ticker: index.ticker.clone(),
            stock_name: stock.name.clone(),
            stock_ticker: stock.ticker.clone(),
        })
    }
}
