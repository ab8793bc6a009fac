use crate::models::Bar;
use thiserror::Error;

/// Failures surfaced by a market data provider. `DataUnavailable` is the
/// taxonomy's terminal "no bars" case; it is never retried here.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no data returned for {symbol} (interval {interval}, range {range})")]
    DataUnavailable {
        symbol: String,
        interval: String,
        range: String,
    },
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed market data response: {0}")]
    Malformed(String),
}

/// Seam between the engine and whatever serves historical bars.
///
/// Symbol, interval and range strings are opaque pass-through values; the
/// engine attaches no meaning to them beyond forwarding. Implementations
/// must return bars in strictly increasing timestamp order and fail with
/// `DataUnavailable` instead of returning an empty series.
#[allow(async_fn_in_trait)]
pub trait BarSource {
    async fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, ProviderError>;
}
