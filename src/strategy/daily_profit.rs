//! Daily-profit trade gates

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{debug, warn};

use crate::host::{HistoryError, TradeHistory};

/// Once-per-day cache for the positive-profit gate.
///
/// Owned by the host per strategy instance and passed `&mut` into
/// `confirm_trade_entry`. The cache resets exactly once when the calendar
/// date changes; until then the underlying history query runs at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyProfitState {
    day: Option<NaiveDate>,
    checked: bool,
    positive: bool,
}

impl DailyProfitState {
    /// Fresh state; the first gate call will query
    pub fn new() -> Self {
        Self::default()
    }

    /// Day the cache refers to
    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    /// Whether today's query has already run
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Cached gate result
    pub fn is_positive(&self) -> bool {
        self.positive
    }

    fn roll(&mut self, today: NaiveDate) {
        if self.day != Some(today) {
            self.day = Some(today);
            self.checked = false;
            self.positive = false;
        }
    }
}

/// Whether today's realized profit is positive, cached in `state` for the
/// rest of the calendar day.
///
/// Tries the host's direct aggregate first and falls back to enumerating
/// closed trades. When both fail the gate fails open: the cached result is
/// "not positive" and a warning is logged.
pub fn cached_daily_profit_positive(
    history: &dyn TradeHistory,
    state: &mut DailyProfitState,
    now: DateTime<Utc>,
) -> bool {
    let today = now.date_naive();
    state.roll(today);
    if state.checked {
        return state.positive;
    }

    let day_start = today.and_time(NaiveTime::MIN).and_utc();
    let profit = history.profit_abs_since(day_start).or_else(|err| {
        if !matches!(err, HistoryError::Unsupported) {
            debug!("Direct daily profit query failed ({}), enumerating trades", err);
        }
        closed_profit_abs_since(history, day_start)
    });

    state.checked = true;
    match profit {
        Ok(profit) => {
            state.positive = profit > 0.0;
            debug!(
                "Daily profit {:.4}, entry gate {}",
                profit,
                if state.positive { "closed" } else { "open" }
            );
        }
        Err(err) => {
            state.positive = false;
            warn!("Daily profit check failed, allowing trades: {}", err);
        }
    }
    state.positive
}

fn closed_profit_abs_since(
    history: &dyn TradeHistory,
    since: DateTime<Utc>,
) -> Result<f64, HistoryError> {
    let trades = history.closed_trades()?;
    Ok(trades
        .iter()
        .filter(|t| t.close_time >= since)
        .map(|t| t.profit_abs)
        .sum())
}

/// Sum of profit ratios of trades closed since UTC midnight.
///
/// Uncached by design; errors surface to the caller.
pub fn realized_profit_ratio_today(
    history: &dyn TradeHistory,
    now: DateTime<Utc>,
) -> Result<f64, HistoryError> {
    let day_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let trades = history.closed_trades()?;
    Ok(trades
        .iter()
        .filter(|t| t.close_time >= day_start)
        .map(|t| t.profit_ratio)
        .sum())
}
