use crate::models::{LiveBias, LiveSignal, MonthKey};
use crate::provider::{BarSource, ProviderError};
use crate::reference::ReferenceTable;
use log::info;

const LIVE_RANGE: &str = "1d";

/// Classifies a live price against the current month's reference VWAP.
///
/// Undefined when the table has no entry for the month (start of a new
/// month, newly listed symbol). Otherwise Bullish iff the price is strictly
/// above the reference; equality counts as Bearish.
pub fn live_bias(price: f64, references: &ReferenceTable, month: MonthKey) -> LiveBias {
    match references.get(month) {
        None => LiveBias::Undefined,
        Some(reference) if price > reference => LiveBias::Bullish,
        Some(_) => LiveBias::Bearish,
    }
}

/// Fetches today's intraday series and classifies the latest close.
pub async fn evaluate_live(
    source: &impl BarSource,
    symbol: &str,
    intraday_interval: &str,
    references: &ReferenceTable,
    month: MonthKey,
) -> Result<LiveSignal, ProviderError> {
    let bars = source.fetch(symbol, intraday_interval, LIVE_RANGE).await?;
    // The provider contract guarantees at least one bar on success.
    let price = bars.last().map(|bar| bar.close).ok_or_else(|| {
        ProviderError::DataUnavailable {
            symbol: symbol.to_string(),
            interval: intraday_interval.to_string(),
            range: LIVE_RANGE.to_string(),
        }
    })?;

    let bias = live_bias(price, references, month);
    info!("Live {}: price {} -> {}", symbol, price, bias.as_str());

    Ok(LiveSignal {
        symbol: symbol.to_string(),
        month,
        reference: references.get(month),
        price,
        bias,
    })
}

/// Verdict on whether the stock's live bias agrees with its index's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Aligned(LiveBias),
    Diverged { stock: LiveBias, index: LiveBias },
    Unknown,
}

pub fn alignment(stock: LiveBias, index: LiveBias) -> Alignment {
    if stock == LiveBias::Undefined || index == LiveBias::Undefined {
        return Alignment::Unknown;
    }
    if stock == index {
        Alignment::Aligned(stock)
    } else {
        Alignment::Diverged { stock, index }
    }
}
