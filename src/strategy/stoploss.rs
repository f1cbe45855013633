//! Dynamic stoploss math

/// Piecewise-linear trailing stop levels, all expressed as profit ratios
/// relative to the open rate
#[derive(Debug, Clone, Copy)]
pub struct TrailingStopLevels {
    /// Hard floor used below the first profit threshold
    pub hard_stop: f64,
    /// First profit threshold
    pub profit_1: f64,
    /// Stop level at the first threshold
    pub stop_1: f64,
    /// Second profit threshold
    pub profit_2: f64,
    /// Stop level at the second threshold
    pub stop_2: f64,
}

impl TrailingStopLevels {
    /// Desired stop level (as profit relative to open) for the current
    /// profit: above `profit_2` the stop trails at a fixed distance, between
    /// the thresholds it interpolates linearly, below `profit_1` it stays at
    /// the hard floor.
    pub fn stop_profit(&self, current_profit: f64) -> f64 {
        if current_profit > self.profit_2 {
            self.stop_2 + (current_profit - self.profit_2)
        } else if current_profit > self.profit_1 {
            self.stop_1
                + (current_profit - self.profit_1) * (self.stop_2 - self.stop_1)
                    / (self.profit_2 - self.profit_1)
        } else {
            self.hard_stop
        }
    }
}

/// Convert a stop level relative to the open rate into a distance below the
/// current rate, given the current profit.
///
/// Returns a non-negative fraction of the current rate; the degenerate
/// `current_profit == -1` maps to 1.0.
pub fn stoploss_from_open(open_relative_stop: f64, current_profit: f64) -> f64 {
    if current_profit == -1.0 {
        return 1.0;
    }
    let stoploss = 1.0 - (1.0 + open_relative_stop) / (1.0 + current_profit);
    stoploss.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> TrailingStopLevels {
        TrailingStopLevels {
            hard_stop: -0.08,
            profit_1: 0.016,
            stop_1: 0.011,
            profit_2: 0.070,
            stop_2: 0.030,
        }
    }

    #[test]
    fn test_stop_profit_interpolates_between_thresholds() {
        let sl = levels().stop_profit(0.040);
        assert!((sl - 0.0194444).abs() < 1e-6);
    }

    #[test]
    fn test_stop_profit_trails_above_second_threshold() {
        let sl = levels().stop_profit(0.10);
        assert!((sl - 0.060).abs() < 1e-12);
    }

    #[test]
    fn test_stop_profit_floors_below_first_threshold() {
        assert_eq!(levels().stop_profit(0.005), -0.08);
        assert_eq!(levels().stop_profit(-0.03), -0.08);
    }

    #[test]
    fn test_stoploss_from_open() {
        let d = stoploss_from_open(0.060, 0.10);
        assert!((d - 0.0363636).abs() < 1e-6);

        // a stop above the current rate clamps to zero
        assert_eq!(stoploss_from_open(0.05, 0.02), 0.0);
        // total-loss guard
        assert_eq!(stoploss_from_open(0.0, -1.0), 1.0);
    }
}
