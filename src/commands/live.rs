use crate::backtest::build_reference_table;
use crate::context::AppContext;
use crate::live::{alignment, evaluate_live};
use crate::models::MonthKey;
use crate::report;
use crate::yahoo::YahooClient;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

pub async fn run(app: &AppContext, index_name: &str, stock_name: &str) -> Result<()> {
    let selection = app.config().resolve(index_name, stock_name)?;
    let interval = app.config().intraday_interval.as_str();
    let period = app.config().period.as_str();
    let month = MonthKey::from_datetime(Utc::now());
    info!(
        "Evaluating live {} bias for {} and {}",
        month, selection.stock_name, selection.index_name
    );

    let client = YahooClient::new(app.http());

    let stock_references =
        build_reference_table(&client, &selection.stock_ticker, interval, period)
            .await
            .with_context(|| format!("reference table failed for {}", selection.stock_ticker))?;
    let stock_signal = evaluate_live(
        &client,
        &selection.stock_ticker,
        interval,
        &stock_references,
        month,
    )
    .await
    .with_context(|| format!("live fetch failed for {}", selection.stock_ticker))?;

    let index_references =
        build_reference_table(&client, &selection.index_ticker, interval, period)
            .await
            .with_context(|| format!("reference table failed for {}", selection.index_ticker))?;
    let index_signal = evaluate_live(
        &client,
        &selection.index_ticker,
        interval,
        &index_references,
        month,
    )
    .await
    .with_context(|| format!("live fetch failed for {}", selection.index_ticker))?;

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
