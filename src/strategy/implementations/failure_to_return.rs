//! FailureToReturn strategy: breakout impulses that pull back to the broken
//! level, hold it and re-engulf away from it.
//!
//! An impulse is a wide-bodied close beyond the recent swing extreme. The
//! broken level stays armed for a limited number of candles; a pullback must
//! touch the level without falling through it, and the entry fires when a
//! later candle closes clear of the level again. Both directions are traded.
//! Optional filters restrict entries to liquid sessions and stop trading for
//! the day once a realized profit target is reached.

use chrono::Timelike;
use tracing::{debug, info, warn};

use crate::config::{RiskProfile, RoiTable};
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_atr, calculate_ema, series};
use crate::strategy::{
    realized_profit_ratio_today, BoolParameter, DailyProfitState, DecimalParameter, EntryProposal,
    IntParameter, ParameterInfo, ParameterSpace, Strategy,
};
use crate::Result;

/// Tunable parameters for [`FailureToReturnStrategy`]
#[derive(Debug, Clone)]
pub struct FailureToReturnParams {
    /// Swing lookback for the reference extreme
    pub sr_lookback: IntParameter,
    /// Candles the broken level stays armed, and the pullback memory
    pub pullback_lookback: IntParameter,
    /// Impulse must close this many ATRs beyond the swing
    pub impulse_atr: DecimalParameter,
    /// Impulse body must span this many ATRs
    pub impulse_body_atr: DecimalParameter,
    /// Pullback may reach this many ATRs past the level
    pub pullback_atr: DecimalParameter,
    /// Pullback fails once it falls this many ATRs through the level
    pub fail_atr: DecimalParameter,
    /// Re-engulf must close this many ATRs clear of the level
    pub reengulf_atr: DecimalParameter,
    /// Volume must exceed its 20 candle average times this factor
    pub volume_factor: DecimalParameter,
    /// Minimum ATR as a fraction of the close
    pub min_atr_ratio: DecimalParameter,
    /// Restrict entries to the London and New York sessions
    pub use_session_filter: BoolParameter,
    pub london_start_hour: IntParameter,
    pub london_end_hour: IntParameter,
    pub ny_start_hour: IntParameter,
    pub ny_end_hour: IntParameter,
    /// Stop entering once today's realized profit reaches the target
    pub use_daily_profit_guard: BoolParameter,
    /// Daily profit target as a sum of trade profit ratios
    pub daily_profit_target: DecimalParameter,
}

impl Default for FailureToReturnParams {
    fn default() -> Self {
        Self {
            sr_lookback: IntParameter::new(20, 80, 40, ParameterSpace::Buy),
            pullback_lookback: IntParameter::new(3, 12, 6, ParameterSpace::Buy),
            impulse_atr: DecimalParameter::new(0.8, 2.0, 1.2, ParameterSpace::Buy),
            impulse_body_atr: DecimalParameter::new(0.6, 1.5, 0.9, ParameterSpace::Buy),
            pullback_atr: DecimalParameter::new(0.1, 0.8, 0.3, ParameterSpace::Buy),
            fail_atr: DecimalParameter::new(0.1, 0.8, 0.2, ParameterSpace::Buy),
            reengulf_atr: DecimalParameter::new(0.1, 0.8, 0.25, ParameterSpace::Buy),
            volume_factor: DecimalParameter::new(0.8, 2.0, 1.0, ParameterSpace::Buy),
            min_atr_ratio: DecimalParameter::new(0.0003, 0.005, 0.001, ParameterSpace::Buy),
            use_session_filter: BoolParameter::new(true, ParameterSpace::Buy),
            london_start_hour: IntParameter::new(6, 9, 7, ParameterSpace::Buy),
            london_end_hour: IntParameter::new(15, 18, 16, ParameterSpace::Buy),
            ny_start_hour: IntParameter::new(11, 14, 12, ParameterSpace::Buy),
            ny_end_hour: IntParameter::new(20, 23, 21, ParameterSpace::Buy),
            use_daily_profit_guard: BoolParameter::new(true, ParameterSpace::Buy),
            daily_profit_target: DecimalParameter::new(0.005, 0.05, 0.02, ParameterSpace::Buy),
        }
    }
}

/// Failure-to-return breakout strategy on the 1 hour interval
#[derive(Debug)]
pub struct FailureToReturnStrategy {
    params: FailureToReturnParams,
}

impl FailureToReturnStrategy {
    /// Create a new failure-to-return strategy with the given parameters
    pub fn new(params: FailureToReturnParams) -> Self {
        Self { params }
    }
}

impl Default for FailureToReturnStrategy {
    fn default() -> Self {
        Self::new(FailureToReturnParams::default())
    }
}

fn mask_column(mask: &[bool]) -> Vec<f64> {
    mask.iter().map(|&m| if m { 1.0 } else { 0.0 }).collect()
}

impl Strategy for FailureToReturnStrategy {
    fn name(&self) -> &str {
        "FailureToReturn"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::H1
    }

    fn startup_candle_count(&self) -> usize {
        200
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: -0.08,
            minimal_roi: RoiTable::new(vec![(0, 0.04), (240, 0.03), (720, 0.01)]),
            trailing_stop: true,
            trailing_stop_positive: Some(0.01),
            trailing_stop_positive_offset: 0.02,
            trailing_only_offset_is_reached: true,
            can_short: true,
            ..RiskProfile::default()
        }
    }

    fn parameters(&self) -> Vec<ParameterInfo> {
        vec![
            self.params.sr_lookback.info("sr_lookback"),
            self.params.pullback_lookback.info("pullback_lookback"),
            self.params.impulse_atr.info("impulse_atr"),
            self.params.impulse_body_atr.info("impulse_body_atr"),
            self.params.pullback_atr.info("pullback_atr"),
            self.params.fail_atr.info("fail_atr"),
            self.params.reengulf_atr.info("reengulf_atr"),
            self.params.volume_factor.info("volume_factor"),
            self.params.min_atr_ratio.info("min_atr_ratio"),
            self.params.use_session_filter.info("use_session_filter"),
            self.params.london_start_hour.info("london_start_hour"),
            self.params.london_end_hour.info("london_end_hour"),
            self.params.ny_start_hour.info("ny_start_hour"),
            self.params.ny_end_hour.info("ny_end_hour"),
            self.params.use_daily_profit_guard.info("use_daily_profit_guard"),
            self.params.daily_profit_target.info("daily_profit_target"),
        ]
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, _ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let opens = frame.opens();
        let highs = frame.highs();
        let lows = frame.lows();
        let volumes = frame.volumes();
        let len = frame.len();

        let ema_fast = calculate_ema(&closes, 50);
        let ema_slow = calculate_ema(&closes, 200);
        let atr = calculate_atr(frame.candles(), 14);
        let volume_sma = series::rolling_mean(&volumes, 20);

        let sr_lookback = self.params.sr_lookback.as_period();
        let swing_high = series::shift(&series::rolling_max(&highs, sr_lookback), 1);
        let swing_low = series::shift(&series::rolling_min(&lows, sr_lookback), 1);
        let body: Vec<f64> = (0..len).map(|i| (closes[i] - opens[i]).abs()).collect();

        let impulse_atr = self.params.impulse_atr.value;
        let impulse_body_atr = self.params.impulse_body_atr.value;
        let impulse_up: Vec<bool> = (0..len)
            .map(|i| {
                closes[i] > swing_high[i] + atr[i] * impulse_atr
                    && body[i] > atr[i] * impulse_body_atr
            })
            .collect();
        let impulse_down: Vec<bool> = (0..len)
            .map(|i| {
                closes[i] < swing_low[i] - atr[i] * impulse_atr
                    && body[i] > atr[i] * impulse_body_atr
            })
            .collect();

        // The broken level stays armed for a bounded number of candles.
        let pullback_lookback = self.params.pullback_lookback.as_period();
        let level_long_raw: Vec<f64> = (0..len)
            .map(|i| if impulse_up[i] { swing_high[i] } else { f64::NAN })
            .collect();
        let level_short_raw: Vec<f64> = (0..len)
            .map(|i| if impulse_down[i] { swing_low[i] } else { f64::NAN })
            .collect();
        let impulse_level_long = series::ffill_limit(&level_long_raw, pullback_lookback);
        let impulse_level_short = series::ffill_limit(&level_short_raw, pullback_lookback);

        let pullback_atr = self.params.pullback_atr.value;
        let fail_atr = self.params.fail_atr.value;
        let pullback_zone_long: Vec<bool> = (0..len)
            .map(|i| {
                let level = impulse_level_long[i];
                !level.is_nan()
                    && lows[i] <= level + atr[i] * pullback_atr
                    && lows[i] >= level - atr[i] * fail_atr
            })
            .collect();
        let pullback_zone_short: Vec<bool> = (0..len)
            .map(|i| {
                let level = impulse_level_short[i];
                !level.is_nan()
                    && highs[i] >= level - atr[i] * pullback_atr
                    && highs[i] <= level + atr[i] * fail_atr
            })
            .collect();
        let pullback_recent_long = series::lookback_any(&pullback_zone_long, pullback_lookback);
        let pullback_recent_short = series::lookback_any(&pullback_zone_short, pullback_lookback);

        let reengulf_atr = self.params.reengulf_atr.value;
        let reengulf_long: Vec<bool> = (0..len)
            .map(|i| {
                let level = impulse_level_long[i];
                !level.is_nan() && closes[i] > level + atr[i] * reengulf_atr
            })
            .collect();
        let reengulf_short: Vec<bool> = (0..len)
            .map(|i| {
                let level = impulse_level_short[i];
                !level.is_nan() && closes[i] < level - atr[i] * reengulf_atr
            })
            .collect();

        let atr_ratio: Vec<f64> = (0..len).map(|i| atr[i] / closes[i]).collect();

        let london =
            self.params.london_start_hour.value as u32..self.params.london_end_hour.value as u32;
        let ny = self.params.ny_start_hour.value as u32..self.params.ny_end_hour.value as u32;
        let liquid_session: Vec<bool> = frame
            .candles()
            .iter()
            .map(|candle| {
                let hour = candle.timestamp.hour();
                london.contains(&hour) || ny.contains(&hour)
            })
            .collect();

        frame.set_column("ema_fast", ema_fast)?;
        frame.set_column("ema_slow", ema_slow)?;
        frame.set_column("atr", atr)?;
        frame.set_column("atr_ratio", atr_ratio)?;
        frame.set_column("volume_sma", volume_sma)?;
        frame.set_column("swing_high", swing_high)?;
        frame.set_column("swing_low", swing_low)?;
        frame.set_column("body", body)?;
        frame.set_column("impulse_up", mask_column(&impulse_up))?;
        frame.set_column("impulse_down", mask_column(&impulse_down))?;
        frame.set_column("impulse_level_long", impulse_level_long)?;
        frame.set_column("impulse_level_short", impulse_level_short)?;
        frame.set_column("pullback_zone_long", mask_column(&pullback_zone_long))?;
        frame.set_column("pullback_zone_short", mask_column(&pullback_zone_short))?;
        frame.set_column("pullback_recent_long", mask_column(&pullback_recent_long))?;
        frame.set_column("pullback_recent_short", mask_column(&pullback_recent_short))?;
        frame.set_column("reengulf_long", mask_column(&reengulf_long))?;
        frame.set_column("reengulf_short", mask_column(&reengulf_short))?;
        frame.set_column("liquid_session", mask_column(&liquid_session))?;
        debug!("FailureToReturn levels armed for {}", frame.pair());
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let volumes = frame.volumes();
        let ema_fast = frame.column("ema_fast")?;
        let ema_slow = frame.column("ema_slow")?;
        let volume_sma = frame.column("volume_sma")?;
        let atr_ratio = frame.column("atr_ratio")?;
        let liquid_session = frame.column("liquid_session")?;
        let pullback_recent_long = frame.column("pullback_recent_long")?;
        let pullback_recent_short = frame.column("pullback_recent_short")?;
        let reengulf_long = frame.column("reengulf_long")?;
        let reengulf_short = frame.column("reengulf_short")?;

        let volume_factor = self.params.volume_factor.value;
        let min_atr_ratio = self.params.min_atr_ratio.value;
        let use_session_filter = self.params.use_session_filter.value;

        let enter_long: Vec<bool> = (0..closes.len())
            .map(|i| {
                let trend_ok = closes[i] > ema_slow[i] && ema_fast[i] > ema_slow[i];
                let volume_ok = volumes[i] > volume_sma[i] * volume_factor && volumes[i] > 0.0;
                let volatility_ok = atr_ratio[i] >= min_atr_ratio;
                let session_ok = !use_session_filter || liquid_session[i] == 1.0;
                trend_ok
                    && volume_ok
                    && volatility_ok
                    && session_ok
                    && pullback_recent_long[i] == 1.0
                    && reengulf_long[i] == 1.0
            })
            .collect();
        let enter_short: Vec<bool> = (0..closes.len())
            .map(|i| {
                let trend_ok = closes[i] < ema_slow[i] && ema_fast[i] < ema_slow[i];
                let volume_ok = volumes[i] > volume_sma[i] * volume_factor && volumes[i] > 0.0;
                let volatility_ok = atr_ratio[i] >= min_atr_ratio;
                let session_ok = !use_session_filter || liquid_session[i] == 1.0;
                trend_ok
                    && volume_ok
                    && volatility_ok
                    && session_ok
                    && pullback_recent_short[i] == 1.0
                    && reengulf_short[i] == 1.0
            })
            .collect();
        frame.mark_enter_long(&enter_long)?;
        frame.mark_enter_short(&enter_short)
    }

    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let ema_fast = frame.column("ema_fast")?;
        let ema_slow = frame.column("ema_slow")?;

        let crossed_under_fast = series::crossed_below(&closes, ema_fast);
        let crossed_over_fast = series::crossed_above(&closes, ema_fast);

        let exit_long: Vec<bool> = (0..closes.len())
            .map(|i| crossed_under_fast[i] || closes[i] < ema_slow[i])
            .collect();
        let exit_short: Vec<bool> = (0..closes.len())
            .map(|i| crossed_over_fast[i] || closes[i] > ema_slow[i])
            .collect();
        frame.mark_exit_long(&exit_long)?;
        frame.mark_exit_short(&exit_short)
    }

    fn confirm_trade_entry(
        &self,
        proposal: &EntryProposal,
        ctx: &HostContext<'_>,
        _state: &mut DailyProfitState,
    ) -> bool {
        if !self.params.use_daily_profit_guard.value {
            return true;
        }
        let history = match ctx.history() {
            Some(history) => history,
            None => return true,
        };
        match realized_profit_ratio_today(history, proposal.time) {
            Ok(ratio) if ratio >= self.params.daily_profit_target.value => {
                info!(
                    "Daily profit target reached ({:.4}), vetoing {} entry",
                    ratio, proposal.pair
                );
                false
            }
            Ok(_) => true,
            Err(err) => {
                warn!("Daily profit query failed, allowing entry: {}", err);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Candle, CandleStore, CandleTable};
    use crate::host::{ClosedTrade, HistoryError, TradeHistory};
    use crate::strategy::Side;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn hourly_frame(rows: Vec<(f64, f64, f64, f64, f64)>) -> StrategyFrame {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let candles: Vec<Candle> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (open, high, low, close, volume))| {
                Candle::new(open, high, low, close, volume, start + Duration::hours(i as i64))
            })
            .collect();
        StrategyFrame::new(CandleTable::new("BTC/USDT", Timeframe::H1, candles).unwrap())
    }

    #[test]
    fn test_metadata() {
        let strategy = FailureToReturnStrategy::default();
        assert_eq!(strategy.name(), "FailureToReturn");
        assert_eq!(strategy.timeframe(), Timeframe::H1);
        assert_eq!(strategy.startup_candle_count(), 200);
        assert!(strategy.risk().can_short);
        assert_eq!(strategy.parameters().len(), 16);
    }

    #[test]
    fn test_impulse_pullback_reengulf_sequence() {
        // Flat tape, an upward impulse through the swing high, a pullback
        // that touches the broken level, then a candle closing clear of it.
        let mut rows: Vec<(f64, f64, f64, f64, f64)> =
            (0..60).map(|_| (100.0, 101.0, 99.0, 100.0, 2000.0)).collect();
        rows.push((100.0, 121.0, 99.0, 120.0, 4000.0)); // row 60: impulse
        rows.push((104.0, 105.0, 101.0, 104.5, 4000.0)); // row 61: pullback to 101
        rows.push((104.5, 107.0, 104.0, 106.5, 4000.0)); // row 62: re-engulf
        let mut frame = hourly_frame(rows);
        let store = CandleStore::new();
        let ctx = HostContext::new(&store);

        let strategy = FailureToReturnStrategy::default();
        strategy.populate_indicators(&mut frame, &ctx).unwrap();

        assert_eq!(frame.column("impulse_up").unwrap()[60], 1.0);
        assert_eq!(frame.column("impulse_level_long").unwrap()[60], 101.0);
        // The level stays armed past the impulse candle.
        assert_eq!(frame.column("impulse_level_long").unwrap()[62], 101.0);
        assert_eq!(frame.column("pullback_zone_long").unwrap()[61], 1.0);
        assert_eq!(frame.column("pullback_recent_long").unwrap()[62], 1.0);
        assert_eq!(frame.column("reengulf_long").unwrap()[62], 1.0);
        // Nothing on the short side.
        assert_eq!(frame.column("impulse_down").unwrap()[60], 0.0);
    }

    #[test]
    fn test_armed_level_expires() {
        // Impulse, then a quiet tape: the level must disarm after the
        // pullback window passes.
        let mut rows: Vec<(f64, f64, f64, f64, f64)> =
            (0..60).map(|_| (100.0, 101.0, 99.0, 100.0, 2000.0)).collect();
        rows.push((100.0, 121.0, 99.0, 120.0, 4000.0)); // row 60: impulse
        for _ in 0..10 {
            rows.push((120.0, 120.5, 119.5, 120.0, 2000.0));
        }
        let mut frame = hourly_frame(rows);
        let store = CandleStore::new();
        let ctx = HostContext::new(&store);

        let strategy = FailureToReturnStrategy::default();
        strategy.populate_indicators(&mut frame, &ctx).unwrap();

        let level = frame.column("impulse_level_long").unwrap();
        assert_eq!(level[66], 101.0);
        assert!(level[67].is_nan());
    }

    #[test]
    fn test_session_hours_column() {
        let rows: Vec<(f64, f64, f64, f64, f64)> =
            (0..26).map(|_| (100.0, 101.0, 99.0, 100.0, 2000.0)).collect();
        let mut frame = hourly_frame(rows);
        let store = CandleStore::new();
        let ctx = HostContext::new(&store);

        let strategy = FailureToReturnStrategy::default();
        strategy.populate_indicators(&mut frame, &ctx).unwrap();

        let session = frame.column("liquid_session").unwrap();
        // Defaults: London 07..16, New York 12..21, union 07..21.
        assert_eq!(session[6], 0.0);
        assert_eq!(session[7], 1.0);
        assert_eq!(session[15], 1.0);
        assert_eq!(session[20], 1.0);
        assert_eq!(session[21], 0.0);
        // Next day wraps back to 00:00.
        assert_eq!(session[24], 0.0);
    }

    fn entry_ready_frame(session: &[f64]) -> StrategyFrame {
        let rows: Vec<(f64, f64, f64, f64, f64)> = (0..session.len())
            .map(|_| (102.0, 104.0, 101.5, 103.0, 4000.0))
            .collect();
        let mut frame = hourly_frame(rows);
        let len = session.len();
        frame.set_column("ema_fast", vec![102.0; len]).unwrap();
        frame.set_column("ema_slow", vec![100.0; len]).unwrap();
        frame.set_column("volume_sma", vec![2000.0; len]).unwrap();
        frame.set_column("atr_ratio", vec![0.01; len]).unwrap();
        frame.set_column("liquid_session", session.to_vec()).unwrap();
        frame
            .set_column("pullback_recent_long", vec![1.0; len])
            .unwrap();
        frame.set_column("reengulf_long", vec![1.0; len]).unwrap();
        frame
            .set_column("pullback_recent_short", vec![0.0; len])
            .unwrap();
        frame.set_column("reengulf_short", vec![0.0; len]).unwrap();
        frame
    }

    #[test]
    fn test_session_filter_blocks_entries() {
        let mut frame = entry_ready_frame(&[0.0, 1.0]);
        let strategy = FailureToReturnStrategy::default();
        strategy.populate_entry_trend(&mut frame).unwrap();
        assert_eq!(frame.enter_long(), &[false, true]);
        assert_eq!(frame.enter_short(), &[false, false]);
    }

    #[test]
    fn test_session_filter_can_be_disabled() {
        let mut frame = entry_ready_frame(&[0.0, 1.0]);
        let params = FailureToReturnParams {
            use_session_filter: BoolParameter::new(false, ParameterSpace::Buy),
            ..FailureToReturnParams::default()
        };
        let strategy = FailureToReturnStrategy::new(params);
        strategy.populate_entry_trend(&mut frame).unwrap();
        assert_eq!(frame.enter_long(), &[true, true]);
    }

    struct RatioHistory {
        trades: Vec<ClosedTrade>,
        fail: bool,
    }

    impl TradeHistory for RatioHistory {
        fn closed_trades(&self) -> std::result::Result<Vec<ClosedTrade>, HistoryError> {
            if self.fail {
                Err(HistoryError::Backend("db down".to_string()))
            } else {
                Ok(self.trades.clone())
            }
        }
    }

    fn ratio_trade(close: DateTime<Utc>, profit_ratio: f64) -> ClosedTrade {
        ClosedTrade {
            pair: "BTC/USDT".to_string(),
            close_time: close,
            profit_abs: profit_ratio * 1000.0,
            profit_ratio,
        }
    }

    fn proposal(time: DateTime<Utc>) -> EntryProposal {
        EntryProposal {
            pair: "BTC/USDT".to_string(),
            side: Side::Long,
            amount: 1.0,
            rate: 100.0,
            time,
            tag: None,
        }
    }

    #[test]
    fn test_gate_vetoes_at_daily_target() {
        let noon = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let history = RatioHistory {
            trades: vec![
                ratio_trade(noon - Duration::hours(3), 0.015),
                ratio_trade(noon - Duration::hours(1), 0.008),
            ],
            fail: false,
        };
        let store = CandleStore::new();
        let ctx = HostContext::new(&store).with_history(&history);

        let strategy = FailureToReturnStrategy::default();
        let mut state = DailyProfitState::new();
        // 0.023 >= the 0.02 default target
        assert!(!strategy.confirm_trade_entry(&proposal(noon), &ctx, &mut state));
    }

    #[test]
    fn test_gate_ignores_older_trades_and_failures() {
        let noon = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let strategy = FailureToReturnStrategy::default();
        let store = CandleStore::new();

        // Yesterday's winners do not count toward today's target.
        let history = RatioHistory {
            trades: vec![ratio_trade(noon - Duration::days(1), 0.5)],
            fail: false,
        };
        let ctx = HostContext::new(&store).with_history(&history);
        let mut state = DailyProfitState::new();
        assert!(strategy.confirm_trade_entry(&proposal(noon), &ctx, &mut state));

        // Backend failure fails open.
        let failing = RatioHistory {
            trades: Vec::new(),
            fail: true,
        };
        let ctx = HostContext::new(&store).with_history(&failing);
        let mut state = DailyProfitState::new();
        assert!(strategy.confirm_trade_entry(&proposal(noon), &ctx, &mut state));
    }

    #[test]
    fn test_guard_can_be_disabled() {
        let noon = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let history = RatioHistory {
            trades: vec![ratio_trade(noon - Duration::hours(1), 0.9)],
            fail: false,
        };
        let store = CandleStore::new();
        let ctx = HostContext::new(&store).with_history(&history);

        let params = FailureToReturnParams {
            use_daily_profit_guard: BoolParameter::new(false, ParameterSpace::Buy),
            ..FailureToReturnParams::default()
        };
        let strategy = FailureToReturnStrategy::new(params);
        let mut state = DailyProfitState::new();
        assert!(strategy.confirm_trade_entry(&proposal(noon), &ctx, &mut state));
    }
}
