use crate::live::Alignment;
use crate::models::{BacktestResult, LiveSignal};
use std::fmt::Write;

/// Renders one symbol's backtest as an aligned text table with a total line.
pub fn render_backtest(title: &str, result: &BacktestResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", title, result.symbol);

    if result.is_empty() {
        let _ = writeln!(out, "  no eligible months in the requested period");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<8} {:>10} {:>10} {:<6} {:>10} {:<11} {:>9} {:>9}",
        "Month", "VWAP Ref", "Entry", "Bias", "Exit", "Outcome", "PnL", "Cum PnL"
    );
    for (record, cumulative) in result.records.iter().zip(&result.cumulative_pnl) {
        let _ = writeln!(
            out,
            "  {:<8} {:>10.2} {:>10.2} {:<6} {:>10.2} {:<11} {:>9.2} {:>9.2}",
            record.month.to_string(),
            record.reference,
            record.entry,
            record.bias.as_str(),
            record.exit,
            record.outcome.as_str(),
            record.pnl,
            cumulative,
        );
    }
    let _ = writeln!(out, "  Total PnL: {} pts", result.total_pnl());
    out
}

/// Renders the live metrics block for one symbol.
pub fn render_live(title: &str, signal: &LiveSignal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", title, signal.symbol);
    match signal.reference {
        Some(reference) => {
            let _ = writeln!(out, "  VWAP Ref: {:.2}", reference);
        }
        None => {
            let _ = writeln!(out, "  VWAP Ref: n/a (no prior month for {})", signal.month);
        }
    }
    let _ = writeln!(out, "  Price:    {:.2}", signal.price);
    let _ = writeln!(out, "  Bias:     {}", signal.bias.as_str());
    out
}

/// One-line verdict banner for stock/index bias agreement.
pub fn render_alignment(stock_name: &str, index_name: &str, verdict: Alignment) -> String {
    match verdict {
        Alignment::Aligned(bias) => format!(
            "Alignment: {} and {} both {}",
            stock_name,
            index_name,
            bias.as_str()
        ),
        Alignment::Diverged { stock, index } => format!(
            "Divergence: {} is {}, but {} is {}",
            stock_name,
            stock.as_str(),
            index_name,
            index.as_str()
        ),
        Alignment::Unknown => format!(
            "Alignment unknown: missing reference for {} or {}",
            stock_name, index_name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bias, LiveBias, MonthKey, Outcome, TradeRecord};

    fn sample_result() -> BacktestResult {
        BacktestResult::new(
            "TCS.NS".to_string(),
            vec![TradeRecord {
                month: MonthKey::new(2024, 2),
                reference: 3500.25,
                entry: 3550.0,
                bias: Bias::Long,
                exit: 3625.5,
                outcome: Outcome::TargetHit,
                pnl: 75.5,
            }],
        )
    }

    #[test]
    fn backtest_table_lists_each_record() {
        let rendered = render_backtest("TCS Results", &sample_result());
        assert!(rendered.contains("2024-02"));
        assert!(rendered.contains("Target Hit"));
        assert!(rendered.contains("Total PnL: 75.5 pts"));
    }

    #[test]
    fn empty_backtest_renders_placeholder() {
        let empty = BacktestResult::new("TCS.NS".to_string(), Vec::new());
        let rendered = render_backtest("TCS Results", &empty);
        assert!(rendered.contains("no eligible months"));
    }

    #[test]
    fn live_block_handles_missing_reference() {
        let signal = LiveSignal {
            symbol: "TCS.NS".to_string(),
            month: MonthKey::new(2024, 3),
            reference: None,
            price: 3600.0,
            bias: LiveBias::Undefined,
        };
        let rendered = render_live("TCS", &signal);
        assert!(rendered.contains("n/a"));
        assert!(rendered.contains("Undefined"));
    }

    #[test]
    fn alignment_banner_wording() {
        let aligned = render_alignment("TCS", "Nifty50", Alignment::Aligned(LiveBias::Bullish));
        assert!(aligned.contains("both Bullish"));

        let diverged = render_alignment(
            "TCS",
            "Nifty50",
            Alignment::Diverged {
                stock: LiveBias::Bullish,
                index: LiveBias::Bearish,
            },
        );
        assert!(diverged.contains("Divergence"));
    }
}
