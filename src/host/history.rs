//! Trade history capability

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A finished trade as reported by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// Pair identifier
    pub pair: String,
    /// Close time
    pub close_time: DateTime<Utc>,
    /// Absolute profit in stake currency
    pub profit_abs: f64,
    /// Profit as a ratio of the stake
    pub profit_ratio: f64,
}

/// Failure of an optional trade-history query.
///
/// Hooks catch this, log a warning and fall back to their declared default;
/// it never propagates out of the strategy.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The host does not implement this query
    #[error("history query not supported by host")]
    Unsupported,
    /// The host backend failed
    #[error("history backend error: {0}")]
    Backend(String),
}

/// Trade history the host may provide
pub trait TradeHistory {
    /// Sum of absolute profits of trades closed at or after `since`.
    ///
    /// Hosts without a direct aggregate keep the default and let callers
    /// fall back to [`TradeHistory::closed_trades`].
    fn profit_abs_since(&self, _since: DateTime<Utc>) -> Result<f64, HistoryError> {
        Err(HistoryError::Unsupported)
    }

    /// Enumerate closed trades
    fn closed_trades(&self) -> Result<Vec<ClosedTrade>, HistoryError>;
}
