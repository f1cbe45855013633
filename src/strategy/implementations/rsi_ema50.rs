//! RSIEMA50 strategy: momentum continuation above a slow EMA, confirmed on
//! the 1 hour interval.
//!
//! Longs only. Entries need price above the EMA with RSI in a momentum band,
//! MACD agreement, a volume surge and a bullish 1 hour backdrop; exits fire
//! on a close back under the EMA or when either interval turns bearish.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{merge_informative_pair, StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_ema, calculate_macd, calculate_rsi, series};
use crate::strategy::{
    DecimalParameter, IntParameter, ParameterInfo, ParameterSpace, Strategy,
};
use crate::Result;

/// Tunable parameters for [`RSIEMA50Strategy`]
#[derive(Debug, Clone)]
pub struct RSIEMA50Params {
    /// Lower bound of the RSI momentum band
    pub buy_rsi_min: IntParameter,
    /// Upper bound of the RSI momentum band
    pub buy_rsi_max: IntParameter,
    /// Period of the trend EMA
    pub buy_ema_period: IntParameter,
    /// Volume must exceed its 20 candle average times this factor
    pub buy_volume_factor: DecimalParameter,
}

impl Default for RSIEMA50Params {
    fn default() -> Self {
        Self {
            buy_rsi_min: IntParameter::new(45, 60, 50, ParameterSpace::Buy),
            buy_rsi_max: IntParameter::new(65, 80, 70, ParameterSpace::Buy),
            buy_ema_period: IntParameter::new(40, 60, 50, ParameterSpace::Buy),
            buy_volume_factor: DecimalParameter::new(1.0, 2.5, 1.5, ParameterSpace::Buy),
        }
    }
}

/// RSI momentum strategy above EMA50 with 1 hour confirmation
#[derive(Debug)]
pub struct RSIEMA50Strategy {
    params: RSIEMA50Params,
}

impl RSIEMA50Strategy {
    /// Create a new RSIEMA50 strategy with the given parameters
    pub fn new(params: RSIEMA50Params) -> Self {
        Self { params }
    }
}

impl Default for RSIEMA50Strategy {
    fn default() -> Self {
        Self::new(RSIEMA50Params::default())
    }
}

impl Strategy for RSIEMA50Strategy {
    fn name(&self) -> &str {
        "RSIEMA50"
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
            self.params.buy_rsi_min.info("buy_rsi_min"),
            self.params.buy_rsi_max.info("buy_rsi_max"),
            self.params.buy_ema_period.info("buy_ema_period"),
            self.params.buy_volume_factor.info("buy_volume_factor"),
        ]
    }

    fn informative_timeframes(&self) -> Vec<Timeframe> {
        vec![Timeframe::H1]
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let volumes = frame.volumes();

        frame.set_column(
            "ema",
            calculate_ema(&closes, self.params.buy_ema_period.as_period()),
        )?;
        frame.set_column("rsi", calculate_rsi(&closes, 14))?;
        let macd = calculate_macd(&closes, 12, 26, 9);
        frame.set_column("macd", macd.macd)?;
        frame.set_column("macdsignal", macd.signal)?;
        frame.set_column("macdhist", macd.histogram)?;
        frame.set_column("volume_sma", series::rolling_mean(&volumes, 20))?;

        let informative = ctx.data().candles(frame.pair(), Timeframe::H1)?;
        let mut inf_frame = StrategyFrame::new(informative);
        let inf_closes = inf_frame.closes();
        inf_frame.set_column("ema", calculate_ema(&inf_closes, 50))?;
        inf_frame.set_column("rsi", calculate_rsi(&inf_closes, 14))?;
        merge_informative_pair(frame, &inf_frame, &["ema", "rsi"])?;

        debug!(
            "RSIEMA50 indicators populated for {} with 1h confirmation",
            frame.pair()
        );
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let volumes = frame.volumes();
        let ema = frame.column("ema")?;
        let rsi = frame.column("rsi")?;
        let macd = frame.column("macd")?;
        let macdsignal = frame.column("macdsignal")?;
        let volume_sma = frame.column("volume_sma")?;
        let ema_1h = frame.column("ema_1h")?;
        let rsi_1h = frame.column("rsi_1h")?;

        let rsi_min = self.params.buy_rsi_min.value as f64;
        let rsi_max = self.params.buy_rsi_max.value as f64;
        let volume_factor = self.params.buy_volume_factor.value;

        let enter: Vec<bool> = (0..closes.len())
            .map(|i| {
                closes[i] > ema[i]
                    && rsi[i] > rsi_min
                    && rsi[i] < rsi_max
                    && macd[i] > macdsignal[i]
                    && closes[i] > ema_1h[i]
                    && rsi_1h[i] > 50.0
                    && volumes[i] > volume_sma[i] * volume_factor
                    && volumes[i] > 0.0
            })
            .collect();
        frame.mark_enter_long(&enter)
    }

    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let ema = frame.column("ema")?;
        let rsi = frame.column("rsi")?;
        let macd = frame.column("macd")?;
        let macdsignal = frame.column("macdsignal")?;
        let ema_1h = frame.column("ema_1h")?;
        let rsi_1h = frame.column("rsi_1h")?;

        let crossed_under_ema = series::crossed_below(&closes, ema);

        let exit: Vec<bool> = (0..closes.len())
            .map(|i| {
                crossed_under_ema[i]
                    || rsi[i] > 75.0
                    || macd[i] < macdsignal[i]
                    || closes[i] < ema_1h[i]
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
    use crate::error::StrategyError;
    use crate::host::DataProvider;
    use chrono::{Duration, TimeZone, Utc};

    fn candle_row(close: f64, volume: f64, minutes: i64) -> Candle {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Candle::new(
            close,
            close + 0.5,
            close - 0.5,
            close,
            volume,
            start + Duration::minutes(minutes),
        )
    }

    fn seeded_store(hours: usize) -> CandleStore {
        let mut store = CandleStore::new();
        let m15: Vec<Candle> = (0..hours * 4)
            .map(|i| candle_row(100.0 + (i as f64 * 0.3).sin(), 1000.0, 15 * i as i64))
            .collect();
        let h1: Vec<Candle> = (0..hours)
            .map(|i| candle_row(100.0 + (i as f64 * 0.3).sin(), 4000.0, 60 * i as i64))
            .collect();
        store.insert(CandleTable::new("BTC/USDT", Timeframe::M15, m15).unwrap());
        store.insert(CandleTable::new("BTC/USDT", Timeframe::H1, h1).unwrap());
        store
    }

    #[test]
    fn test_metadata() {
        let strategy = RSIEMA50Strategy::default();
        assert_eq!(strategy.name(), "RSIEMA50");
        assert_eq!(strategy.timeframe(), Timeframe::M15);
        assert_eq!(strategy.informative_timeframes(), vec![Timeframe::H1]);
        assert!(strategy.risk().trailing_stop);
        assert_eq!(strategy.risk().trailing_stop_positive, Some(0.015));
    }

    #[test]
    fn test_informative_columns_merged() {
        let store = seeded_store(60);
        let ctx = HostContext::new(&store);
        let table = store.candles("BTC/USDT", Timeframe::M15).unwrap();
        let mut frame = StrategyFrame::new(table);

        let strategy = RSIEMA50Strategy::default();
        strategy.populate_indicators(&mut frame, &ctx).unwrap();

        assert!(frame.has_column("ema_1h"));
        assert!(frame.has_column("rsi_1h"));
        let last = frame.len() - 1;
        assert!(!frame.column("ema_1h").unwrap()[last].is_nan());
        assert!(!frame.column("rsi_1h").unwrap()[last].is_nan());
        // The 1h series is undefined until enough coarse candles close.
        assert!(frame.column("ema_1h").unwrap()[0].is_nan());
    }

    #[test]
    fn test_missing_informative_is_an_error() {
        let mut store = CandleStore::new();
        let m15: Vec<Candle> = (0..8)
            .map(|i| candle_row(100.0, 1000.0, 15 * i as i64))
            .collect();
        store.insert(CandleTable::new("BTC/USDT", Timeframe::M15, m15).unwrap());
        let ctx = HostContext::new(&store);
        let table = store.candles("BTC/USDT", Timeframe::M15).unwrap();
        let mut frame = StrategyFrame::new(table);

        let strategy = RSIEMA50Strategy::default();
        assert!(matches!(
            strategy.populate_indicators(&mut frame, &ctx),
            Err(StrategyError::MissingInformative { .. })
        ));
    }

    #[test]
    fn test_entry_needs_full_alignment() {
        let candles: Vec<Candle> = (0..2)
            .map(|i| candle_row(100.0, 2000.0, 15 * i))
            .collect();
        let mut frame =
            StrategyFrame::new(CandleTable::new("BTC/USDT", Timeframe::M15, candles).unwrap());
        frame.set_column("ema", vec![99.0, 99.0]).unwrap();
        frame.set_column("rsi", vec![55.0, 42.0]).unwrap();
        frame.set_column("macd", vec![1.0, 1.0]).unwrap();
        frame.set_column("macdsignal", vec![0.5, 0.5]).unwrap();
        frame.set_column("volume_sma", vec![1000.0, 1000.0]).unwrap();
        frame.set_column("ema_1h", vec![98.0, 98.0]).unwrap();
        frame.set_column("rsi_1h", vec![60.0, 60.0]).unwrap();

        let strategy = RSIEMA50Strategy::default();
        strategy.populate_entry_trend(&mut frame).unwrap();

        // Row 1 fails only the RSI band (42 < buy_rsi_min).
        assert_eq!(frame.enter_long(), &[true, false]);
    }

    #[test]
    fn test_exit_on_hourly_breakdown() {
        let candles: Vec<Candle> = (0..2)
            .map(|i| candle_row(100.0, 2000.0, 15 * i))
            .collect();
        let mut frame =
            StrategyFrame::new(CandleTable::new("BTC/USDT", Timeframe::M15, candles).unwrap());
        frame.set_column("ema", vec![99.0, 99.0]).unwrap();
        frame.set_column("rsi", vec![55.0, 55.0]).unwrap();
        frame.set_column("macd", vec![1.0, 1.0]).unwrap();
        frame.set_column("macdsignal", vec![0.5, 0.5]).unwrap();
        frame.set_column("ema_1h", vec![98.0, 102.0]).unwrap();
        frame.set_column("rsi_1h", vec![60.0, 60.0]).unwrap();

        let strategy = RSIEMA50Strategy::default();
        strategy.populate_exit_trend(&mut frame).unwrap();

        // Row 1 closes below the 1h EMA.
        assert_eq!(frame.exit_long(), &[false, true]);
    }
}
