use crate::backtest::run_backtest;
use crate::context::AppContext;
use crate::live::{alignment, evaluate_live};
use crate::models::MonthKey;
use crate::report;
use crate::yahoo::YahooClient;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

/// Full dashboard run: backtest both symbols, then reuse each reference
/// table for the live forward signal and the alignment verdict.
pub async fn run(app: &AppContext, index_name: &str, stock_name: &str) -> Result<()> {
    let selection = app.config().resolve(index_name, stock_name)?;
    let interval = app.config().intraday_interval.as_str();
    let period = app.config().period.as_str();
    let month = MonthKey::from_datetime(Utc::now());
    info!(
        "Monthly VWAP dashboard: {} ({}) vs {} ({})",
        selection.stock_name,
        selection.stock_ticker,
        selection.index_name,
        selection.index_ticker
    );

    let client = YahooClient::new(app.http());

    let (stock_result, stock_references) =
        run_backtest(&client, &selection.stock_ticker, interval, period)
            .await
            .with_context(|| format!("backtest failed for {}", selection.stock_ticker))?;
    let (index_result, index_references) =
        run_backtest(&client, &selection.index_ticker, interval, period)
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

    let stock_signal = evaluate_live(
        &client,
        &selection.stock_ticker,
        interval,
        &stock_references,
        month,
    )
    .await
    .with_context(|| format!("live fetch failed for {}", selection.stock_ticker))?;
    let index_signal = evaluate_live(
        &client,
        &selection.index_ticker,
        interval,
        &index_references,
        month,
    )
    .await
    .with_context(|| format!("live fetch failed for {}", selection.index_ticker))?;

    println!("Live Forward Signal ({})", month);
    println!("{}", report::render_live(&selection.stock_name, &stock_signal));
    println!("{}", report::render_live(&selection.index_name, &index_signal));
    println!(
        "{}",
        report::render_alignment(
            &selection.stock_name,
            &selection.index_name,
            alignment(stock_signal.bias, index_signal.bias)
        )
    );
    Ok(())
}
