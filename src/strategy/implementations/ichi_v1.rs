//! IchiV1 strategy: Ichimoku Cloud entries with a volume fan, an outlier
//! pullback detector and a multi-level trailing stop.
//!
//! Two independent entry paths: an established trend well above the cloud
//! with the lagging span confirming, or a fresh close above the cloud backed
//! by the volume fan, RSI headroom, above-average volume and no bearish
//! pullback outlier. Exits require an overbought RSI on top of any bearish
//! cloud signal. The stop is managed dynamically through
//! [`Strategy::custom_stoploss`], so the static trailing stop stays off.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{RiskProfile, RoiTable};
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_atr, calculate_rsi, series};
use crate::strategy::{
    cached_daily_profit_positive, stoploss_from_open, DailyProfitState, DecimalParameter,
    EntryProposal, ParameterInfo, ParameterSpace, Strategy, TrailingStopLevels,
};
use crate::Result;

const TENKAN_PERIOD: usize = 9;
const KIJUN_PERIOD: usize = 26;
const SENKOU_B_PERIOD: usize = 52;
const CHIKOU_SHIFT: isize = 26;

/// Tunable parameters for [`IchiV1Strategy`]
#[derive(Debug, Clone)]
pub struct IchiV1Params {
    /// Minimum distance above the cloud, as a fraction of the close
    pub buy_trend_above_senkou_level: DecimalParameter,
    /// Minimum Tenkan lead over Kijun, as a fraction of Kijun
    pub buy_trend_bullish_level: DecimalParameter,
    /// Volume EMA shift for the fan, in tenths of a candle
    pub buy_fan_magnitude_shift_value: DecimalParameter,
    /// Minimum smoothed fan magnitude
    pub buy_min_fan_magnitude_gain: DecimalParameter,
    /// Trend indicator level that arms the exit
    pub sell_trend_indicator: DecimalParameter,
    /// Hard stop while profit is below the first threshold
    pub hsl: DecimalParameter,
    /// First profit threshold
    pub pf_1: DecimalParameter,
    /// Stop at the first threshold
    pub sl_1: DecimalParameter,
    /// Second profit threshold
    pub pf_2: DecimalParameter,
    /// Stop at the second threshold
    pub sl_2: DecimalParameter,
}

impl Default for IchiV1Params {
    fn default() -> Self {
        Self {
            buy_trend_above_senkou_level: DecimalParameter::new(0.0, 2.0, 0.5, ParameterSpace::Buy),
            buy_trend_bullish_level: DecimalParameter::new(0.0, 1.0, 0.3, ParameterSpace::Buy),
            buy_fan_magnitude_shift_value: DecimalParameter::new(0.1, 2.0, 0.5, ParameterSpace::Buy),
            buy_min_fan_magnitude_gain: DecimalParameter::new(0.1, 1.0, 0.3, ParameterSpace::Buy),
            sell_trend_indicator: DecimalParameter::new(-1.0, 0.0, -0.3, ParameterSpace::Sell),
            hsl: DecimalParameter::new(-0.200, -0.040, -0.08, ParameterSpace::Sell),
            pf_1: DecimalParameter::new(0.008, 0.020, 0.016, ParameterSpace::Sell),
            sl_1: DecimalParameter::new(0.008, 0.020, 0.011, ParameterSpace::Sell),
            pf_2: DecimalParameter::new(0.040, 0.100, 0.070, ParameterSpace::Sell),
            sl_2: DecimalParameter::new(0.020, 0.070, 0.030, ParameterSpace::Sell),
        }
    }
}

/// Ichimoku Cloud strategy on the 15 minute interval
#[derive(Debug)]
pub struct IchiV1Strategy {
    params: IchiV1Params,
}

impl IchiV1Strategy {
    /// Create a new IchiV1 strategy with the given parameters
    pub fn new(params: IchiV1Params) -> Self {
        Self { params }
    }

    fn trailing_levels(&self) -> TrailingStopLevels {
        TrailingStopLevels {
            hard_stop: self.params.hsl.value,
            profit_1: self.params.pf_1.value,
            stop_1: self.params.sl_1.value,
            profit_2: self.params.pf_2.value,
            stop_2: self.params.sl_2.value,
        }
    }
}

impl Default for IchiV1Strategy {
    fn default() -> Self {
        Self::new(IchiV1Params::default())
    }
}

/// Midpoint of the rolling extremes, the building block of every Ichimoku line
fn rolling_midpoint(highs: &[f64], lows: &[f64], window: usize) -> Vec<f64> {
    let max = series::rolling_max(highs, window);
    let min = series::rolling_min(lows, window);
    (0..highs.len()).map(|i| (max[i] + min[i]) / 2.0).collect()
}

impl Strategy for IchiV1Strategy {
    fn name(&self) -> &str {
        "IchiV1"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::M15
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: -0.08,
            minimal_roi: RoiTable::new(vec![(0, 0.15), (30, 0.08), (60, 0.04), (120, 0.02)]),
            ..RiskProfile::default()
        }
    }

    fn parameters(&self) -> Vec<ParameterInfo> {
        vec![
            self.params
                .buy_trend_above_senkou_level
                .info("buy_trend_above_senkou_level"),
            self.params
                .buy_trend_bullish_level
                .info("buy_trend_bullish_level"),
            self.params
                .buy_fan_magnitude_shift_value
                .info("buy_fan_magnitude_shift_value"),
            self.params
                .buy_min_fan_magnitude_gain
                .info("buy_min_fan_magnitude_gain"),
            self.params.sell_trend_indicator.info("sell_trend_indicator"),
            self.params.hsl.info("pHSL"),
            self.params.pf_1.info("pPF_1"),
            self.params.sl_1.info("pSL_1"),
            self.params.pf_2.info("pPF_2"),
            self.params.sl_2.info("pSL_2"),
        ]
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, _ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let highs = frame.highs();
        let lows = frame.lows();
        let volumes = frame.volumes();
        let len = frame.len();

        let tenkan = rolling_midpoint(&highs, &lows, TENKAN_PERIOD);
        let kijun = rolling_midpoint(&highs, &lows, KIJUN_PERIOD);
        let span_a_raw: Vec<f64> = (0..len).map(|i| (tenkan[i] + kijun[i]) / 2.0).collect();
        let span_a = series::shift(&span_a_raw, CHIKOU_SHIFT);
        let span_b = series::shift(
            &rolling_midpoint(&highs, &lows, SENKOU_B_PERIOD),
            CHIKOU_SHIFT,
        );
        // The lagging span reads future closes; rows near the end stay NaN.
        let chikou = series::shift(&closes, -CHIKOU_SHIFT);

        let trend_indicator: Vec<f64> = (0..len)
            .map(|i| {
                if closes[i] > span_a[i].max(span_b[i]) {
                    1.0
                } else if closes[i] < span_a[i].min(span_b[i]) {
                    -1.0
                } else {
                    0.0
                }
            })
            .collect();
        let trend_above_senkou: Vec<f64> = (0..len)
            .map(|i| {
                if trend_indicator[i] > 0.0 {
                    (closes[i] - span_a[i].max(span_b[i])) / closes[i]
                } else {
                    0.0
                }
            })
            .collect();
        let trend_bullish: Vec<f64> = (0..len)
            .map(|i| {
                if tenkan[i] > kijun[i] {
                    (tenkan[i] - kijun[i]) / kijun[i]
                } else {
                    0.0
                }
            })
            .collect();

        let volume_ema = series::ewm_mean(&volumes, 20);
        let fan_shift = (self.params.buy_fan_magnitude_shift_value.value * 10.0) as isize;
        let volume_ema_shifted = series::shift(&volume_ema, fan_shift);
        let volume_shift: Vec<f64> = (0..len)
            .map(|i| volumes[i] / volume_ema_shifted[i])
            .collect();
        let fan_magnitude: Vec<f64> = (0..len).map(|i| volume_shift[i] - 1.0).collect();
        let fan_magnitude_gain = series::rolling_mean(&fan_magnitude, 5);

        let rsi = calculate_rsi(&closes, 14);
        let atr = calculate_atr(frame.candles(), 14);
        let volume_sma = series::rolling_mean(&volumes, 20);

        // Percent-change outlier detector: z-score of the one-candle move.
        let pb_pct_change = series::pct_change(&closes);
        let pb_mean = series::rolling_mean(&pb_pct_change, 30);
        let pb_std = series::rolling_std(&pb_pct_change, 30);
        let pb_zscore: Vec<f64> = (0..len)
            .map(|i| (pb_pct_change[i] - pb_mean[i]) / pb_std[i])
            .collect();
        let pullback_flag: Vec<f64> = (0..len)
            .map(|i| {
                if pb_zscore[i] >= 2.0 {
                    1.0
                } else if pb_zscore[i] <= -2.0 {
                    -1.0
                } else {
                    0.0
                }
            })
            .collect();

        frame.set_column("tenkan_sen", tenkan)?;
        frame.set_column("kijun_sen", kijun)?;
        frame.set_column("senkou_span_a", span_a)?;
        frame.set_column("senkou_span_b", span_b)?;
        frame.set_column("chikou_span", chikou)?;
        frame.set_column("trend_indicator", trend_indicator)?;
        frame.set_column("trend_above_senkou", trend_above_senkou)?;
        frame.set_column("trend_bullish", trend_bullish)?;
        frame.set_column("volume_shift", volume_shift)?;
        frame.set_column("fan_magnitude", fan_magnitude)?;
        frame.set_column("fan_magnitude_gain", fan_magnitude_gain)?;
        frame.set_column("rsi", rsi)?;
        frame.set_column("atr", atr)?;
        frame.set_column("volume_sma", volume_sma)?;
        frame.set_column("pb_pct_change", pb_pct_change)?;
        frame.set_column("pb_mean", pb_mean)?;
        frame.set_column("pb_std", pb_std)?;
        frame.set_column("pb_zscore", pb_zscore)?;
        frame.set_column("pullback_flag", pullback_flag)?;
        debug!("IchiV1 cloud computed for {}", frame.pair());
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let volumes = frame.volumes();
        let trend_above_senkou = frame.column("trend_above_senkou")?;
        let trend_bullish = frame.column("trend_bullish")?;
        let chikou = frame.column("chikou_span")?;
        let span_a = frame.column("senkou_span_a")?;
        let span_b = frame.column("senkou_span_b")?;
        let tenkan = frame.column("tenkan_sen")?;
        let kijun = frame.column("kijun_sen")?;
        let fan_magnitude_gain = frame.column("fan_magnitude_gain")?;
        let rsi = frame.column("rsi")?;
        let volume_sma = frame.column("volume_sma")?;
        let pullback_flag = frame.column("pullback_flag")?;

        let cloud_top: Vec<f64> = (0..closes.len())
            .map(|i| span_a[i].max(span_b[i]))
            .collect();
        let cloud_top_prev = series::shift(&cloud_top, 1);
        let close_prev = series::shift(&closes, 1);

        let above_level = self.params.buy_trend_above_senkou_level.value;
        let bullish_level = self.params.buy_trend_bullish_level.value;
        let min_gain = self.params.buy_min_fan_magnitude_gain.value;

        // The established-trend path stands alone; only the breakout path
        // carries the fan, RSI, volume and pullback confirmations.
        let enter: Vec<bool> = (0..closes.len())
            .map(|i| {
                let established = trend_above_senkou[i] >= above_level
                    && trend_bullish[i] >= bullish_level
                    && chikou[i] > closes[i];
                let breakout = closes[i] > span_a[i]
                    && closes[i] > span_b[i]
                    && close_prev[i] <= cloud_top_prev[i]
                    && tenkan[i] > kijun[i]
                    && fan_magnitude_gain[i] >= min_gain
                    && rsi[i] < 70.0
                    && volumes[i] > volume_sma[i]
                    && pullback_flag[i] != -1.0;
                established || breakout
            })
            .collect();
        frame.mark_enter_long(&enter)
    }

    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let trend_indicator = frame.column("trend_indicator")?;
        let tenkan = frame.column("tenkan_sen")?;
        let kijun = frame.column("kijun_sen")?;
        let span_a = frame.column("senkou_span_a")?;
        let span_b = frame.column("senkou_span_b")?;
        let chikou = frame.column("chikou_span")?;
        let rsi = frame.column("rsi")?;

        let tk_cross = series::crossed_below(tenkan, kijun);
        let chikou_cross = series::crossed_below(chikou, &closes);
        let cloud_bottom: Vec<f64> = (0..closes.len())
            .map(|i| span_a[i].min(span_b[i]))
            .collect();
        let cloud_bottom_prev = series::shift(&cloud_bottom, 1);
        let close_prev = series::shift(&closes, 1);

        let sell_level = self.params.sell_trend_indicator.value;

        let exit: Vec<bool> = (0..closes.len())
            .map(|i| {
                let breakdown = closes[i] < span_a[i]
                    && closes[i] < span_b[i]
                    && close_prev[i] >= cloud_bottom_prev[i];
                let bearish = trend_indicator[i] <= sell_level
                    || tk_cross[i]
                    || breakdown
                    || chikou_cross[i];
                bearish && rsi[i] > 70.0
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
            info!(
                "Blocking entry for {}: daily profit already positive",
                proposal.pair
            );
            return false;
        }
        true
    }

    fn custom_stoploss(
        &self,
        _pair: &str,
        _current_time: DateTime<Utc>,
        _current_rate: f64,
        current_profit: f64,
    ) -> Option<f64> {
        let stop_profit = self.trailing_levels().stop_profit(current_profit);
        // A stop at or above the current profit would close the position on
        // the spot; leave the static stop in charge instead.
        if stop_profit >= current_profit {
            return None;
        }
        Some(stoploss_from_open(stop_profit, current_profit))
    }
}
