use crate::backtest::run_backtest;
use crate::context::AppContext;
use crate::report;
use crate::yahoo::YahooClient;
use anyhow::{Context, Result};
use log::info;

pub async fn run(app: &AppContext, index_name: &str, stock_name: &str) -> Result<()> {
    let selection = app.config().resolve(index_name, stock_name)?;
    let interval = app.config().intraday_interval.as_str();
    let period = app.config().period.as_str();
    info!(
        "Backtesting {} ({}) vs {} ({}) over {}",
        selection.stock_name,
        selection.stock_ticker,
        selection.index_name,
        selection.index_ticker,
        period
    );

    let client = YahooClient::new(app.http());
    let (stock_result, _) = run_backtest(&client, &selection.stock_ticker, interval, period)
        .await
        .with_context(|| format!("backtest failed for {}", selection.stock_ticker))?;
    let (index_result, _) = run_backtest(&client, &selection.index_ticker, interval, period)
        .await
        .with_context(|| format!("backtest failed for {}", selection.index_ticker))?;

    println!(
        "{}",
        report::render_backtest(&format!("{} Results", selection.stock_name), &stock_result)
    );
    println!(
        "{}",
        report::render_backtest(&format!("{} Results", selection.index_name), &index_result)
    );
    Ok(())
}
