//! Static risk configuration declared by each strategy

use serde::{Deserialize, Serialize};

use crate::config::RoiTable;

/// Static risk configuration a strategy hands to the host.
///
/// Defaults mirror the host interface defaults, so a strategy only spells out
/// the fields it actually overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Stop loss as a signed ratio (e.g., -0.10 = -10%)
    pub stoploss: f64,
    /// Time-based minimum ROI schedule
    pub minimal_roi: RoiTable,
    /// Trailing stop enabled
    pub trailing_stop: bool,
    /// Trailing distance once armed
    pub trailing_stop_positive: Option<f64>,
    /// Profit offset that arms the trailing stop
    pub trailing_stop_positive_offset: f64,
    /// Only trail after the offset is reached
    pub trailing_only_offset_is_reached: bool,
    /// Honor exit signals
    pub use_exit_signal: bool,
    /// Only exit at a profit
    pub exit_profit_only: bool,
    /// Ignore the ROI schedule while an entry signal is active
    pub ignore_roi_if_entry_signal: bool,
    /// Strategy may open short positions
    pub can_short: bool,
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self {
            stoploss: -0.10,
            minimal_roi: RoiTable::default(),
            trailing_stop: false,
            trailing_stop_positive: None,
            trailing_stop_positive_offset: 0.0,
            trailing_only_offset_is_reached: false,
            use_exit_signal: true,
            exit_profit_only: false,
            ignore_roi_if_entry_signal: false,
            can_short: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_host_interface() {
        let risk = RiskProfile::default();
        assert_eq!(risk.stoploss, -0.10);
        assert!(risk.minimal_roi.is_empty());
        assert!(!risk.trailing_stop);
        assert!(risk.use_exit_signal);
        assert!(!risk.can_short);
    }
}
