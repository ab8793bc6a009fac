use crate::models::{round2, Bar, Bias, MonthKey, Outcome, TradeRecord};

/// Simulates the single monthly trade for one calendar month of daily bars.
///
/// Returns `None` when the month has no bars or no prior-month reference
/// VWAP; both are skip conditions, not errors.
///
/// Entry is the first bar's close. Entry above the reference takes a Long
/// bias, otherwise Short (equality is Short). Outcomes are checked in a
/// fixed priority order on the month's extremes. For a Long bias the
/// `high >= entry` check runs first, and because the month high includes the
/// entry bar it almost always passes; Stopped/Expired are reachable only
/// with degenerate bars. The tests pin that asymmetry.
pub fn simulate_month(
    month: MonthKey,
    daily_bars: &[Bar],
    reference: Option<f64>,
) -> Option<TradeRecord> {
    let reference = reference?;
    let (first, last) = match (daily_bars.first(), daily_bars.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return None,
    };

    let entry = first.close;
    let high = daily_bars.iter().map(|bar| bar.high).fold(f64::MIN, f64::max);
    let low = daily_bars.iter().map(|bar| bar.low).fold(f64::MAX, f64::min);
    let end = last.close;

    let (bias, exit, outcome) = if entry > reference {
        if high >= entry {
            (Bias::Long, high, Outcome::TargetHit)
        } else if low <= entry {
            (Bias::Long, low, Outcome::Stopped)
        } else {
            (Bias::Long, end, Outcome::Expired)
        }
    } else if low <= entry {
        (Bias::Short, low, Outcome::TargetHit)
    } else if high >= entry {
        (Bias::Short, high, Outcome::Stopped)
    } else {
        (Bias::Short, end, Outcome::Expired)
    };

    let pnl = match bias {
        Bias::Long => exit - entry,
        Bias::Short => entry - exit,
    };

    Some(TradeRecord {
        month,
        reference: round2(reference),
        entry: round2(entry),
        bias,
        exit: round2(exit),
        outcome,
        pnl: round2(pnl),
    })
}
