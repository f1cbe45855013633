//! Markov strategy: a four-state regime model over EMA side and RSI zone.
//!
//! Each candle is labeled with a regime state; entries trade upward state
//! transitions under trend-strength and volatility filters, exits trade
//! downward transitions. Risk settings are parameter-derived so the host
//! optimizer can tune ROI and stoploss alongside the filters. Entries are
//! vetoed for the rest of the day once realized profit turns positive.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_adx, calculate_atr, calculate_ema, calculate_rsi, series};
use crate::strategy::{
    cached_daily_profit_positive, DailyProfitState, DecimalParameter, EntryProposal, IntParameter,
    ParameterInfo, ParameterSpace, Strategy,
};
use crate::Result;

/// Regime states, stored in the `markov_state` column.
///
/// 0 = below EMA and weak RSI, 1 = below EMA with recovering RSI,
/// 2 = above EMA with moderate RSI, 3 = above EMA and strong RSI.
/// Rows that match no condition (warm-up, price exactly on the EMA)
/// default to state 1.
const STATE_WEAK: f64 = 0.0;
const STATE_RECOVERING: f64 = 1.0;
const STATE_MODERATE: f64 = 2.0;
const STATE_STRONG: f64 = 3.0;

/// Tunable parameters for [`MarkovStrategy`]
#[derive(Debug, Clone)]
pub struct MarkovParams {
    /// Minimum ADX for any entry
    pub adx_min: DecimalParameter,
    /// Minimum ATR as a fraction of the close
    pub atr_min: DecimalParameter,
    /// RSI level that forces an exit
    pub sell_rsi_overbought: IntParameter,
    /// Optimizable stoploss
    pub stoploss_opt: DecimalParameter,
    /// ROI ladder: profit targets and the minute thresholds between them
    pub roi_p1: DecimalParameter,
    pub roi_t1: IntParameter,
    pub roi_p2: DecimalParameter,
    pub roi_t2: IntParameter,
    pub roi_p3: DecimalParameter,
    pub roi_t3: IntParameter,
    pub roi_p4: DecimalParameter,
}

impl Default for MarkovParams {
    fn default() -> Self {
        Self {
            adx_min: DecimalParameter::new(15.0, 35.0, 20.0, ParameterSpace::Buy),
            atr_min: DecimalParameter::new(0.003, 0.03, 0.01, ParameterSpace::Buy),
            sell_rsi_overbought: IntParameter::new(65, 85, 75, ParameterSpace::Sell),
            stoploss_opt: DecimalParameter::new(-0.20, -0.03, -0.05, ParameterSpace::Sell),
            roi_p1: DecimalParameter::new(0.04, 0.20, 0.10, ParameterSpace::Sell),
            roi_t1: IntParameter::new(60, 240, 240, ParameterSpace::Sell),
            roi_p2: DecimalParameter::new(0.02, 0.12, 0.05, ParameterSpace::Sell),
            roi_t2: IntParameter::new(240, 720, 720, ParameterSpace::Sell),
            roi_p3: DecimalParameter::new(0.01, 0.08, 0.02, ParameterSpace::Sell),
            roi_t3: IntParameter::new(720, 1440, 1440, ParameterSpace::Sell),
            roi_p4: DecimalParameter::new(0.005, 0.04, 0.01, ParameterSpace::Sell),
        }
    }
}

/// Regime-transition strategy on the 1 hour interval
#[derive(Debug)]
pub struct MarkovStrategy {
    params: MarkovParams,
}

impl MarkovStrategy {
    /// Create a new Markov strategy with the given parameters
    pub fn new(params: MarkovParams) -> Self {
        Self { params }
    }
}

impl Default for MarkovStrategy {
    fn default() -> Self {
        Self::new(MarkovParams::default())
    }
}

impl Strategy for MarkovStrategy {
    fn name(&self) -> &str {
        "Markov"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::H1
    }

    fn startup_candle_count(&self) -> usize {
        60
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: self.params.stoploss_opt.value,
            minimal_roi: RoiTable::new(vec![
                (0, self.params.roi_p1.value),
                (self.params.roi_t1.value as u32, self.params.roi_p2.value),
                (self.params.roi_t2.value as u32, self.params.roi_p3.value),
                (self.params.roi_t3.value as u32, self.params.roi_p4.value),
            ]),
            ..RiskProfile::default()
        }
    }

    fn parameters(&self) -> Vec<ParameterInfo> {
        vec![
            self.params.adx_min.info("adx_min"),
            self.params.atr_min.info("atr_min"),
            self.params.sell_rsi_overbought.info("sell_rsi_overbought"),
            self.params.stoploss_opt.info("stoploss_opt"),
            self.params.roi_p1.info("roi_p1"),
            self.params.roi_t1.info("roi_t1"),
            self.params.roi_p2.info("roi_p2"),
            self.params.roi_t2.info("roi_t2"),
            self.params.roi_p3.info("roi_p3"),
            self.params.roi_t3.info("roi_t3"),
            self.params.roi_p4.info("roi_p4"),
        ]
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, _ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let highs = frame.highs();
        let lows = frame.lows();
        let len = frame.len();

        let ema_slow = calculate_ema(&closes, 55);
        let rsi = calculate_rsi(&closes, 14);
        let adx = calculate_adx(&highs, &lows, &closes, 14);
        let atr = calculate_atr(frame.candles(), 14);
        let atr_percent: Vec<f64> = (0..len).map(|i| atr[i] / closes[i]).collect();

        let state: Vec<f64> = (0..len)
            .map(|i| {
                let close = closes[i];
                if close < ema_slow[i] && rsi[i] < 40.0 {
                    STATE_WEAK
                } else if close < ema_slow[i] && rsi[i] >= 40.0 {
                    STATE_RECOVERING
                } else if close > ema_slow[i] && rsi[i] < 60.0 {
                    STATE_MODERATE
                } else if close > ema_slow[i] && rsi[i] >= 60.0 {
                    STATE_STRONG
                } else {
                    STATE_RECOVERING
                }
            })
            .collect();
        let prev_state = series::shift(&state, 1);

        frame.set_column("ema_slow", ema_slow)?;
        frame.set_column("rsi", rsi)?;
        frame.set_column("adx", adx)?;
        frame.set_column("atr", atr)?;
        frame.set_column("atr_percent", atr_percent)?;
        frame.set_column("markov_state", state)?;
        frame.set_column("prev_state", prev_state)?;
        debug!("Markov regime states labeled for {}", frame.pair());
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let state = frame.column("markov_state")?;
        let prev = frame.column("prev_state")?;
        let adx = frame.column("adx")?;
        let atr_percent = frame.column("atr_percent")?;

        let adx_min = self.params.adx_min.value;
        let atr_min = self.params.atr_min.value;

        let enter: Vec<bool> = (0..frame.len())
            .map(|i| {
                let upward = (prev[i] == STATE_WEAK && state[i] == STATE_RECOVERING)
                    || (prev[i] == STATE_RECOVERING && state[i] == STATE_MODERATE)
                    || (prev[i] == STATE_MODERATE && state[i] == STATE_STRONG);
                upward && adx[i] > adx_min && atr_percent[i] > atr_min
            })
            .collect();
        frame.mark_enter_long(&enter)
    }

    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let state = frame.column("markov_state")?;
        let prev = frame.column("prev_state")?;
        let rsi = frame.column("rsi")?;

        let overbought = self.params.sell_rsi_overbought.value as f64;

        let exit: Vec<bool> = (0..frame.len())
            .map(|i| {
                (prev[i] == STATE_STRONG && state[i] == STATE_MODERATE)
                    || (prev[i] == STATE_MODERATE && state[i] == STATE_RECOVERING)
                    || state[i] == STATE_WEAK
                    || rsi[i] > overbought
            })
            .collect();
        frame.mark_exit_long(&exit)
    }

    fn confirm_trade_entry(
        &self,
        proposal: &EntryProposal,
        ctx: &HostContext<'_>,
        state: &mut DailyProfitState,
    ) -> bool {
        let history = match ctx.history() {
            Some(history) => history,
            None => return true,
        };
        if cached_daily_profit_positive(history, state, proposal.time) {
            debug!(
                "Vetoing {} entry: realized profit already positive today",
                proposal.pair
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Candle, CandleStore, CandleTable};
    use crate::host::{ClosedTrade, HistoryError, TradeHistory};
    use crate::strategy::Side;
    use chrono::{DateTime, Duration, TimeZone, Utc};

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
                    start + Duration::hours(i as i64),
                )
            })
            .collect();
        StrategyFrame::new(CandleTable::new("BTC/USDT", Timeframe::H1, candles).unwrap())
    }

    #[test]
    fn test_risk_profile_is_parameter_derived() {
        let strategy = MarkovStrategy::default();
        let risk = strategy.risk();
        assert_eq!(risk.stoploss, -0.05);
        assert_eq!(risk.minimal_roi.target_for(0), Some(0.10));
        assert_eq!(risk.minimal_roi.target_for(300), Some(0.05));
        assert_eq!(risk.minimal_roi.target_for(800), Some(0.02));
        assert_eq!(risk.minimal_roi.target_for(2000), Some(0.01));
        assert_eq!(strategy.parameters().len(), 11);
    }

    #[test]
    fn test_state_labeling_on_trend() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        // 80 flat candles, then a steady climb: the tail must be state 3.
        let candles: Vec<Candle> = (0..100)
            .map(|i| {
                let close = if i < 80 { 100.0 } else { 100.0 + (i - 79) as f64 };
                Candle::new(
                    close,
                    close + 1.5,
                    close - 1.5,
                    close,
                    2000.0,
                    start + Duration::hours(i),
                )
            })
            .collect();
        let mut frame =
            StrategyFrame::new(CandleTable::new("BTC/USDT", Timeframe::H1, candles).unwrap());
        let store = CandleStore::new();
        let ctx = HostContext::new(&store);

        let strategy = MarkovStrategy::default();
        strategy.populate_indicators(&mut frame, &ctx).unwrap();

        let state = frame.column("markov_state").unwrap();
        // Warm-up rows match no condition and take the default state.
        assert_eq!(state[0], STATE_RECOVERING);
        assert_eq!(state[99], STATE_STRONG);
        let prev = frame.column("prev_state").unwrap();
        assert!(prev[0].is_nan());
        assert_eq!(prev[99], state[98]);
    }

    #[test]
    fn test_entry_on_upward_transitions_only() {
        let mut frame = make_frame(4);
        frame
            .set_column("markov_state", vec![1.0, 2.0, 3.0, 3.0])
            .unwrap();
        frame
            .set_column("prev_state", vec![f64::NAN, 1.0, 2.0, 3.0])
            .unwrap();
        frame.set_column("adx", vec![30.0; 4]).unwrap();
        frame.set_column("atr_percent", vec![0.02; 4]).unwrap();

        let strategy = MarkovStrategy::default();
        strategy.populate_entry_trend(&mut frame).unwrap();

        // Rows 1 and 2 are upward transitions; row 3 is a hold.
        assert_eq!(frame.enter_long(), &[false, true, true, false]);
    }

    #[test]
    fn test_weak_adx_blocks_entries() {
        let mut frame = make_frame(2);
        frame.set_column("markov_state", vec![1.0, 2.0]).unwrap();
        frame
            .set_column("prev_state", vec![f64::NAN, 1.0])
            .unwrap();
        frame.set_column("adx", vec![10.0, 10.0]).unwrap();
        frame.set_column("atr_percent", vec![0.02, 0.02]).unwrap();

        let strategy = MarkovStrategy::default();
        strategy.populate_entry_trend(&mut frame).unwrap();
        assert_eq!(frame.enter_long(), &[false, false]);
    }

    #[test]
    fn test_exit_on_downward_transition_or_weak_state() {
        let mut frame = make_frame(4);
        frame
            .set_column("markov_state", vec![2.0, 1.0, 0.0, 3.0])
            .unwrap();
        frame
            .set_column("prev_state", vec![3.0, 2.0, 1.0, 2.0])
            .unwrap();
        frame
            .set_column("rsi", vec![50.0, 50.0, 50.0, 80.0])
            .unwrap();

        let strategy = MarkovStrategy::default();
        strategy.populate_exit_trend(&mut frame).unwrap();

        // 3→2, 2→1, state 0, then overbought RSI.
        assert_eq!(frame.exit_long(), &[true, true, true, true]);
    }

    struct FixedHistory {
        profit: f64,
    }

    impl TradeHistory for FixedHistory {
        fn profit_abs_since(
            &self,
            _since: DateTime<Utc>,
        ) -> std::result::Result<f64, HistoryError> {
            Ok(self.profit)
        }

        fn closed_trades(&self) -> std::result::Result<Vec<ClosedTrade>, HistoryError> {
            Ok(Vec::new())
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
    fn test_gate_vetoes_after_positive_day() {
        let store = CandleStore::new();
        let history = FixedHistory { profit: 12.5 };
        let ctx = HostContext::new(&store).with_history(&history);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let strategy = MarkovStrategy::default();
        let mut state = DailyProfitState::new();
        assert!(!strategy.confirm_trade_entry(&proposal(now), &ctx, &mut state));
    }

    #[test]
    fn test_gate_allows_when_flat_or_without_history() {
        let store = CandleStore::new();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let strategy = MarkovStrategy::default();

        let history = FixedHistory { profit: -3.0 };
        let ctx = HostContext::new(&store).with_history(&history);
        let mut state = DailyProfitState::new();
        assert!(strategy.confirm_trade_entry(&proposal(now), &ctx, &mut state));

        // No history capability at all: fail open.
        let bare_ctx = HostContext::new(&store);
        let mut state = DailyProfitState::new();
        assert!(strategy.confirm_trade_entry(&proposal(now), &bare_ctx, &mut state));
    }
}
