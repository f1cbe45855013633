//! RSIBollinger strategy: momentum entries near the lower Bollinger band,
//! confirmed on the 1 hour interval.
//!
//! Entries need RSI in a momentum band while price sits in the lowest part
//! of the Bollinger channel yet still above the trend EMA on both intervals.
//! Exits fire at the top of the channel, on overbought RSI, on an EMA
//! crossunder or when the 1 hour backdrop turns bearish.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{merge_informative_pair, StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_bb, calculate_ema, calculate_rsi, series};
use crate::strategy::{
    compose_startup_message, DecimalParameter, IntParameter, ParameterInfo, ParameterSpace,
    Strategy,
};
use crate::Result;

/// Tunable parameters for [`RSIBollingerStrategy`]
#[derive(Debug, Clone)]
pub struct RSIBollingerParams {
    /// Lower bound of the RSI momentum band
    pub buy_rsi_min: IntParameter,
    /// Upper bound of the RSI momentum band
    pub buy_rsi_max: IntParameter,
    /// Bollinger window
    pub buy_bb_period: IntParameter,
    /// Bollinger width in standard deviations
    pub buy_bb_std: DecimalParameter,
    /// Maximum position inside the channel (0 = lower band, 1 = upper band)
    pub buy_bb_percent: DecimalParameter,
    /// Volume must exceed its 20 candle average times this factor
    pub buy_volume_factor: DecimalParameter,
}

impl Default for RSIBollingerParams {
    fn default() -> Self {
        Self {
            buy_rsi_min: IntParameter::new(45, 60, 50, ParameterSpace::Buy),
            buy_rsi_max: IntParameter::new(65, 80, 70, ParameterSpace::Buy),
            buy_bb_period: IntParameter::new(15, 25, 20, ParameterSpace::Buy),
            buy_bb_std: DecimalParameter::new(1.5, 2.5, 2.0, ParameterSpace::Buy),
            buy_bb_percent: DecimalParameter::new(0.0, 0.3, 0.15, ParameterSpace::Buy),
            buy_volume_factor: DecimalParameter::new(1.0, 2.5, 1.5, ParameterSpace::Buy),
        }
    }
}

/// RSI plus Bollinger channel strategy with 1 hour confirmation
#[derive(Debug)]
pub struct RSIBollingerStrategy {
    params: RSIBollingerParams,
}

impl RSIBollingerStrategy {
    /// Create a new RSIBollinger strategy with the given parameters
    pub fn new(params: RSIBollingerParams) -> Self {
        Self { params }
    }
}

impl Default for RSIBollingerStrategy {
    fn default() -> Self {
        Self::new(RSIBollingerParams::default())
    }
}

impl Strategy for RSIBollingerStrategy {
    fn name(&self) -> &str {
        "RSIBollinger"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::M15
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
            self.params.buy_bb_period.info("buy_bb_period"),
            self.params.buy_bb_std.info("buy_bb_std"),
            self.params.buy_bb_percent.info("buy_bb_percent"),
            self.params.buy_volume_factor.info("buy_volume_factor"),
        ]
    }

    fn informative_timeframes(&self) -> Vec<Timeframe> {
        vec![Timeframe::H1]
    }

    fn on_start(&self, ctx: &HostContext<'_>) {
        ctx.notify(&compose_startup_message(self, ctx));
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let volumes = frame.volumes();
        let len = frame.len();

        frame.set_column("rsi", calculate_rsi(&closes, 14))?;
        let bb = calculate_bb(
            &closes,
            self.params.buy_bb_period.as_period(),
            self.params.buy_bb_std.value,
        );
        let bb_percent: Vec<f64> = (0..len)
            .map(|i| (closes[i] - bb.lower[i]) / (bb.upper[i] - bb.lower[i]))
            .collect();
        frame.set_column("bb_lowerband", bb.lower)?;
        frame.set_column("bb_middleband", bb.middle)?;
        frame.set_column("bb_upperband", bb.upper)?;
        frame.set_column("bb_percent", bb_percent)?;
        frame.set_column("ema", calculate_ema(&closes, 21))?;
        frame.set_column("volume_sma", series::rolling_mean(&volumes, 20))?;

        let informative = ctx.data().candles(frame.pair(), Timeframe::H1)?;
        let mut inf_frame = StrategyFrame::new(informative);
        let inf_closes = inf_frame.closes();
        inf_frame.set_column("rsi", calculate_rsi(&inf_closes, 14))?;
        inf_frame.set_column("ema", calculate_ema(&inf_closes, 21))?;
        merge_informative_pair(frame, &inf_frame, &["rsi", "ema"])?;

        debug!(
            "RSIBollinger indicators populated for {} with 1h confirmation",
            frame.pair()
        );
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let volumes = frame.volumes();
        let rsi = frame.column("rsi")?;
        let bb_percent = frame.column("bb_percent")?;
        let ema = frame.column("ema")?;
        let volume_sma = frame.column("volume_sma")?;
        let ema_1h = frame.column("ema_1h")?;
        let rsi_1h = frame.column("rsi_1h")?;

        let rsi_min = self.params.buy_rsi_min.value as f64;
        let rsi_max = self.params.buy_rsi_max.value as f64;
        let bb_percent_max = self.params.buy_bb_percent.value;
        let volume_factor = self.params.buy_volume_factor.value;

        let enter: Vec<bool> = (0..closes.len())
            .map(|i| {
                rsi[i] > rsi_min
                    && rsi[i] < rsi_max
                    && bb_percent[i] < bb_percent_max
                    && closes[i] > ema[i]
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
        let rsi = frame.column("rsi")?;
        let bb_percent = frame.column("bb_percent")?;
        let ema = frame.column("ema")?;
        let ema_1h = frame.column("ema_1h")?;
        let rsi_1h = frame.column("rsi_1h")?;

        let crossed_under_ema = series::crossed_below(&closes, ema);

        let exit: Vec<bool> = (0..closes.len())
            .map(|i| {
                bb_percent[i] > 0.95
                    || rsi[i] > 75.0
                    || crossed_under_ema[i]
                    || closes[i] < ema_1h[i]
                    || rsi_1h[i] < 40.0
            })
            .collect();
        frame.mark_exit_long(&exit)
    }
}
