//! MessageTest strategy: a diagnostic strategy that alternates entry and
//! exit signals on every candle.
//!
//! Useful for exercising the host wiring end to end (order flow, exit
//! handling, ROI laddering) without depending on market conditions. Not a
//! trading strategy.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::strategy::Strategy;
use crate::Result;

/// Alternating-signal diagnostic strategy: even rows signal entry, odd rows
/// signal exit, both gated on non-zero volume.
#[derive(Debug, Default)]
pub struct MessageTestStrategy;

impl MessageTestStrategy {
    /// Create a new message test strategy
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for MessageTestStrategy {
    fn name(&self) -> &str {
        "MessageTest"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::M15
    }

    fn startup_candle_count(&self) -> usize {
        10
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: -0.10,
            minimal_roi: RoiTable::new(vec![(0, 0.01), (15, 0.005), (30, 0.002)]),
            ..RiskProfile::default()
        }
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, _ctx: &HostContext<'_>) -> Result<()> {
        let len = frame.len();
        let candle_count: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let should_buy: Vec<f64> = (0..len)
            .map(|i| if i % 2 == 0 { 1.0 } else { 0.0 })
            .collect();
        let should_sell: Vec<f64> = (0..len)
            .map(|i| if i % 2 == 1 { 1.0 } else { 0.0 })
            .collect();

        frame.set_column("candle_count", candle_count)?;
        frame.set_column("should_buy", should_buy)?;
        frame.set_column("should_sell", should_sell)?;
        debug!("MessageTest populated {} alternating rows", len);
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let should_buy = frame.column("should_buy")?;
        let volumes = frame.volumes();

        let enter: Vec<bool> = (0..frame.len())
            .map(|i| should_buy[i] == 1.0 && volumes[i] > 0.0)
            .collect();
        frame.mark_enter_long(&enter)
    }

    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let should_sell = frame.column("should_sell")?;
        let volumes = frame.volumes();

        let exit: Vec<bool> = (0..frame.len())
            .map(|i| should_sell[i] == 1.0 && volumes[i] > 0.0)
            .collect();
        frame.mark_exit_long(&exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Candle, CandleStore, CandleTable};
    use chrono::{Duration, TimeZone, Utc};

    fn make_frame(volumes: &[f64]) -> StrategyFrame {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let candles: Vec<Candle> = volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| {
                Candle::new(
                    100.0,
                    101.0,
                    99.0,
                    100.0,
                    volume,
                    start + Duration::minutes(15 * i as i64),
                )
            })
            .collect();
        StrategyFrame::new(CandleTable::new("BTC/USDT", Timeframe::M15, candles).unwrap())
    }

    #[test]
    fn test_metadata() {
        let strategy = MessageTestStrategy::new();
        assert_eq!(strategy.name(), "MessageTest");
        assert_eq!(strategy.timeframe(), Timeframe::M15);
        assert_eq!(strategy.startup_candle_count(), 10);
        let roi = strategy.risk().minimal_roi;
        assert_eq!(roi.target_for(20), Some(0.005));
        assert_eq!(roi.target_for(45), Some(0.002));
    }

    #[test]
    fn test_alternating_signals() {
        let mut frame = make_frame(&[1000.0; 6]);
        let store = CandleStore::new();
        let ctx = HostContext::new(&store);

        let strategy = MessageTestStrategy::new();
        strategy.analyze(&mut frame, &ctx).unwrap();

        assert_eq!(
            frame.enter_long(),
            &[true, false, true, false, true, false]
        );
        assert_eq!(
            frame.exit_long(),
            &[false, true, false, true, false, true]
        );
        assert_eq!(frame.column("candle_count").unwrap()[5], 5.0);
    }

    #[test]
    fn test_zero_volume_suppresses_signals() {
        let mut frame = make_frame(&[1000.0, 1000.0, 0.0, 0.0]);
        let store = CandleStore::new();
        let ctx = HostContext::new(&store);

        let strategy = MessageTestStrategy::new();
        strategy.analyze(&mut frame, &ctx).unwrap();

        assert_eq!(frame.enter_long(), &[true, false, false, false]);
        assert_eq!(frame.exit_long(), &[false, true, false, false]);
    }
}
