//! EMACrossover strategy: a fresh triple-EMA alignment with momentum and
//! volume confirmation, checked against the 1 hour trend.
//!
//! Longs only. The entry requires the fast EMA to have crossed above the mid
//! EMA on this very candle while the full fast > mid > slow stack holds, so
//! continuation candles inside an established trend do not re-trigger.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{merge_informative_pair, StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_atr, calculate_ema, calculate_macd, calculate_rsi, series};
use crate::strategy::{
    DecimalParameter, IntParameter, ParameterInfo, ParameterSpace, Strategy,
};
use crate::Result;

/// Tunable parameters for [`EMACrossoverStrategy`]
#[derive(Debug, Clone)]
pub struct EMACrossoverParams {
    /// Fast EMA period
    pub buy_ema_fast: IntParameter,
    /// Mid EMA period
    pub buy_ema_mid: IntParameter,
    /// Slow EMA period
    pub buy_ema_slow: IntParameter,
    /// Lower bound of the RSI confirmation band
    pub buy_rsi_min: IntParameter,
    /// Upper bound of the RSI confirmation band
    pub buy_rsi_max: IntParameter,
    /// Volume must exceed its 20 candle average times this factor
    pub volume_factor: DecimalParameter,
}

impl Default for EMACrossoverParams {
    fn default() -> Self {
        Self {
            buy_ema_fast: IntParameter::new(5, 15, 9, ParameterSpace::Buy),
            buy_ema_mid: IntParameter::new(15, 30, 21, ParameterSpace::Buy),
            buy_ema_slow: IntParameter::new(30, 60, 50, ParameterSpace::Buy),
            buy_rsi_min: IntParameter::new(40, 55, 50, ParameterSpace::Buy),
            buy_rsi_max: IntParameter::new(60, 75, 70, ParameterSpace::Buy),
            volume_factor: DecimalParameter::new(1.0, 2.5, 1.5, ParameterSpace::Buy),
        }
    }
}

/// Triple EMA crossover strategy with 1 hour trend confirmation
#[derive(Debug)]
pub struct EMACrossoverStrategy {
    params: EMACrossoverParams,
}

impl EMACrossoverStrategy {
    /// Create a new EMA crossover strategy with the given parameters
    pub fn new(params: EMACrossoverParams) -> Self {
        Self { params }
    }
}

impl Default for EMACrossoverStrategy {
    fn default() -> Self {
        Self::new(EMACrossoverParams::default())
    }
}

impl Strategy for EMACrossoverStrategy {
    fn name(&self) -> &str {
        "EMACrossover"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::M15
    }

    fn startup_candle_count(&self) -> usize {
        30
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: -0.06,
            minimal_roi: RoiTable::new(vec![(0, 0.10), (30, 0.05), (60, 0.03), (120, 0.01)]),
            trailing_stop: true,
            trailing_stop_positive: Some(0.015),
            trailing_stop_positive_offset: 0.025,
            trailing_only_offset_is_reached: true,
            ..RiskProfile::default()
        }
    }

    fn parameters(&self) -> Vec<ParameterInfo> {
        vec![
            self.params.buy_ema_fast.info("buy_ema_fast"),
            self.params.buy_ema_mid.info("buy_ema_mid"),
            self.params.buy_ema_slow.info("buy_ema_slow"),
            self.params.buy_rsi_min.info("buy_rsi_min"),
            self.params.buy_rsi_max.info("buy_rsi_max"),
            self.params.volume_factor.info("volume_factor"),
        ]
    }

    fn informative_timeframes(&self) -> Vec<Timeframe> {
        vec![Timeframe::H1]
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let volumes = frame.volumes();

        frame.set_column(
            "ema_fast",
            calculate_ema(&closes, self.params.buy_ema_fast.as_period()),
        )?;
        frame.set_column(
            "ema_mid",
            calculate_ema(&closes, self.params.buy_ema_mid.as_period()),
        )?;
        frame.set_column(
            "ema_slow",
            calculate_ema(&closes, self.params.buy_ema_slow.as_period()),
        )?;
        frame.set_column("rsi", calculate_rsi(&closes, 14))?;
        let macd = calculate_macd(&closes, 12, 26, 9);
        frame.set_column("macd", macd.macd)?;
        frame.set_column("macdsignal", macd.signal)?;
        frame.set_column("macdhist", macd.histogram)?;
        frame.set_column("volume_sma", series::rolling_mean(&volumes, 20))?;
        let atr = calculate_atr(frame.candles(), 14);
        frame.set_column("atr", atr)?;

        let informative = ctx.data().candles(frame.pair(), Timeframe::H1)?;
        let mut inf_frame = StrategyFrame::new(informative);
        let inf_closes = inf_frame.closes();
        inf_frame.set_column("ema_fast", calculate_ema(&inf_closes, 9))?;
        inf_frame.set_column("ema_slow", calculate_ema(&inf_closes, 50))?;
        inf_frame.set_column("rsi", calculate_rsi(&inf_closes, 14))?;
        merge_informative_pair(frame, &inf_frame, &["ema_fast", "ema_slow", "rsi"])?;

        debug!(
            "EMACrossover indicators populated for {} with 1h confirmation",
            frame.pair()
        );
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let volumes = frame.volumes();
        let ema_fast = frame.column("ema_fast")?;
        let ema_mid = frame.column("ema_mid")?;
        let ema_slow = frame.column("ema_slow")?;
        let rsi = frame.column("rsi")?;
        let macd = frame.column("macd")?;
        let macdsignal = frame.column("macdsignal")?;
        let macdhist = frame.column("macdhist")?;
        let volume_sma = frame.column("volume_sma")?;
        let ema_fast_1h = frame.column("ema_fast_1h")?;
        let ema_slow_1h = frame.column("ema_slow_1h")?;

        let fast_prev = series::shift(ema_fast, 1);
        let mid_prev = series::shift(ema_mid, 1);

        let rsi_min = self.params.buy_rsi_min.value as f64;
        let rsi_max = self.params.buy_rsi_max.value as f64;
        let volume_factor = self.params.volume_factor.value;

        let enter: Vec<bool> = (0..volumes.len())
            .map(|i| {
                ema_fast[i] > ema_mid[i]
                    && ema_mid[i] > ema_slow[i]
                    && fast_prev[i] <= mid_prev[i]
                    && ema_fast_1h[i] > ema_slow_1h[i]
                    && rsi[i] > rsi_min
                    && rsi[i] < rsi_max
                    && macd[i] > macdsignal[i]
                    && macdhist[i] > 0.0
                    && volumes[i] > volume_sma[i] * volume_factor
                    && volumes[i] > 0.0
            })
            .collect();
        frame.mark_enter_long(&enter)
    }

    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let ema_fast = frame.column("ema_fast")?;
        let ema_mid = frame.column("ema_mid")?;
        let rsi = frame.column("rsi")?;
        let macd = frame.column("macd")?;
        let macdsignal = frame.column("macdsignal")?;
        let ema_fast_1h = frame.column("ema_fast_1h")?;
        let ema_slow_1h = frame.column("ema_slow_1h")?;
        let rsi_1h = frame.column("rsi_1h")?;

        let exit: Vec<bool> = (0..frame.len())
            .map(|i| {
                ema_fast[i] < ema_mid[i]
                    || macd[i] < macdsignal[i]
                    || rsi[i] > 75.0
                    || ema_fast_1h[i] < ema_slow_1h[i]
                    || rsi_1h[i] < 40.0
            })
            .collect();
        frame.mark_exit_long(&exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Candle, CandleStore, CandleTable};
    use crate::host::DataProvider;
    use chrono::{Duration, TimeZone, Utc};

    fn make_frame(rows: usize) -> StrategyFrame {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let candles: Vec<Candle> = (0..rows)
            .map(|i| {
                Candle::new(
                    100.0,
                    101.0,
                    99.0,
                    100.0,
                    2000.0,
                    start + Duration::minutes(15 * i as i64),
                )
            })
            .collect();
        StrategyFrame::new(CandleTable::new("BTC/USDT", Timeframe::M15, candles).unwrap())
    }

    fn passing_confirmations(frame: &mut StrategyFrame, rows: usize) {
        frame.set_column("rsi", vec![55.0; rows]).unwrap();
        frame.set_column("macd", vec![1.0; rows]).unwrap();
        frame.set_column("macdsignal", vec![0.5; rows]).unwrap();
        frame.set_column("macdhist", vec![0.5; rows]).unwrap();
        frame.set_column("volume_sma", vec![1000.0; rows]).unwrap();
        frame.set_column("ema_fast_1h", vec![101.0; rows]).unwrap();
        frame.set_column("ema_slow_1h", vec![100.0; rows]).unwrap();
        frame.set_column("rsi_1h", vec![55.0; rows]).unwrap();
    }

    #[test]
    fn test_metadata() {
        let strategy = EMACrossoverStrategy::default();
        assert_eq!(strategy.name(), "EMACrossover");
        assert_eq!(strategy.startup_candle_count(), 30);
        assert_eq!(strategy.informative_timeframes(), vec![Timeframe::H1]);
        assert_eq!(strategy.parameters().len(), 6);
    }

    #[test]
    fn test_entry_only_on_fresh_cross() {
        let mut frame = make_frame(3);
        passing_confirmations(&mut frame, 3);
        // Fast crosses the mid EMA between rows 1 and 2.
        frame.set_column("ema_fast", vec![98.0, 98.0, 101.0]).unwrap();
        frame.set_column("ema_mid", vec![99.0, 99.0, 100.0]).unwrap();
        frame.set_column("ema_slow", vec![90.0, 90.0, 90.0]).unwrap();

        let strategy = EMACrossoverStrategy::default();
        strategy.populate_entry_trend(&mut frame).unwrap();
        assert_eq!(frame.enter_long(), &[false, false, true]);
    }

    #[test]
    fn test_established_trend_does_not_retrigger() {
        let mut frame = make_frame(3);
        passing_confirmations(&mut frame, 3);
        // Fast already above mid on every row: no fresh cross anywhere.
        frame.set_column("ema_fast", vec![101.0, 101.0, 101.0]).unwrap();
        frame.set_column("ema_mid", vec![100.0, 100.0, 100.0]).unwrap();
        frame.set_column("ema_slow", vec![90.0, 90.0, 90.0]).unwrap();

        let strategy = EMACrossoverStrategy::default();
        strategy.populate_entry_trend(&mut frame).unwrap();
        assert_eq!(frame.enter_long(), &[false, false, false]);
    }

    #[test]
    fn test_exit_on_hourly_trend_flip() {
        let mut frame = make_frame(2);
        frame.set_column("ema_fast", vec![101.0, 101.0]).unwrap();
        frame.set_column("ema_mid", vec![100.0, 100.0]).unwrap();
        frame.set_column("rsi", vec![55.0, 55.0]).unwrap();
        frame.set_column("macd", vec![1.0, 1.0]).unwrap();
        frame.set_column("macdsignal", vec![0.5, 0.5]).unwrap();
        frame.set_column("ema_fast_1h", vec![101.0, 99.0]).unwrap();
        frame.set_column("ema_slow_1h", vec![100.0, 100.0]).unwrap();
        frame.set_column("rsi_1h", vec![55.0, 55.0]).unwrap();

        let strategy = EMACrossoverStrategy::default();
        strategy.populate_exit_trend(&mut frame).unwrap();
        assert_eq!(frame.exit_long(), &[false, true]);
    }

    #[test]
    fn test_full_pipeline_populates_all_columns() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut store = CandleStore::new();
        let m15: Vec<Candle> = (0..240)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.2).sin() * 2.0;
                Candle::new(
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    2000.0,
                    start + Duration::minutes(15 * i as i64),
                )
            })
            .collect();
        let h1: Vec<Candle> = (0..60)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.4).sin() * 2.0;
                Candle::new(
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    8000.0,
                    start + Duration::minutes(60 * i as i64),
                )
            })
            .collect();
        store.insert(CandleTable::new("BTC/USDT", Timeframe::M15, m15).unwrap());
        store.insert(CandleTable::new("BTC/USDT", Timeframe::H1, h1).unwrap());
        let ctx = HostContext::new(&store);
        let table = store.candles("BTC/USDT", Timeframe::M15).unwrap();
        let mut frame = StrategyFrame::new(table);

        let strategy = EMACrossoverStrategy::default();
        strategy.analyze(&mut frame, &ctx).unwrap();

        for name in [
            "ema_fast",
            "ema_mid",
            "ema_slow",
            "rsi",
            "macd",
            "macdsignal",
            "macdhist",
            "volume_sma",
            "atr",
            "ema_fast_1h",
            "ema_slow_1h",
            "rsi_1h",
        ] {
            assert!(frame.has_column(name), "missing column {}", name);
        }
        let last = frame.len() - 1;
        assert!(!frame.column("ema_slow_1h").unwrap()[last].is_nan());
        assert!(!frame.column("atr").unwrap()[last].is_nan());
    }
}
