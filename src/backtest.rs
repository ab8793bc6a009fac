use crate::models::{Bar, BacktestResult, MonthKey};
use crate::provider::{BarSource, ProviderError};
use crate::reference::ReferenceTable;
use crate::simulator::simulate_month;
use crate::vwap::compute_monthly_last_vwap;
use log::info;
use std::collections::BTreeMap;

pub const DAILY_INTERVAL: &str = "1d";

/// Runs the full monthly VWAP backtest for one symbol.
///
/// Fetches the intraday and daily series, derives the prior-month reference
/// table, and simulates one trade per eligible month. The first month of the
/// daily series is always skipped (it can have no prior-month reference), as
/// is any month whose reference is absent. An outcome with zero trades is a
/// valid empty result, not an error; only a failed fetch propagates.
pub async fn run_backtest(
    source: &impl BarSource,
    symbol: &str,
    intraday_interval: &str,
    period: &str,
) -> Result<(BacktestResult, ReferenceTable), ProviderError> {
    let references = build_reference_table(source, symbol, intraday_interval, period).await?;
    let daily = source.fetch(symbol, DAILY_INTERVAL, period).await?;

    let result = backtest_months(symbol, &daily, &references);
    info!(
        "Backtested {}: {} month(s) traded, total PnL {}",
        symbol,
        result.records.len(),
        result.total_pnl()
    );
    Ok((result, references))
}

/// Builds the prior-month reference table from a fresh intraday fetch.
pub async fn build_reference_table(
    source: &impl BarSource,
    symbol: &str,
    intraday_interval: &str,
    period: &str,
) -> Result<ReferenceTable, ProviderError> {
    let intraday = source.fetch(symbol, intraday_interval, period).await?;
    let monthly_vwap = compute_monthly_last_vwap(&intraday);
    Ok(ReferenceTable::shift_forward(&monthly_vwap))
}

/// Simulates every eligible month of an already-fetched daily series.
pub fn backtest_months(
    symbol: &str,
    daily: &[Bar],
    references: &ReferenceTable,
) -> BacktestResult {
    let by_month = group_by_month(daily);

    let records = by_month
        .iter()
        .skip(1)
        .filter_map(|(month, bars)| simulate_month(*month, bars, references.get(*month)))
        .collect();

    BacktestResult::new(symbol.to_string(), records)
}

fn group_by_month(bars: &[Bar]) -> BTreeMap<MonthKey, Vec<Bar>> {
    let mut grouped: BTreeMap<MonthKey, Vec<Bar>> = BTreeMap::new();
    for bar in bars {
        grouped
            .entry(MonthKey::from_datetime(bar.date))
            .or_default()
            .push(bar.clone());
    }
    grouped
}
