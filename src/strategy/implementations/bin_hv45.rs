//! BinHV45 strategy: buys sharp dips through a wide Bollinger lower band.
//!
//! Entries fire when price drops below the previous lower band on a wide
//! band and a meaningful candle-to-candle move, with only a small lower
//! tail. There is no signal-based exit; positions leave through ROI or the
//! stoploss.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_bb, series};
use crate::strategy::{
    compose_startup_message, IntParameter, ParameterInfo, ParameterSpace, Strategy,
};
use crate::Result;

/// Tunable parameters for [`BinHV45Strategy`]
#[derive(Debug, Clone)]
pub struct BinHV45Params {
    /// Minimum band width, in thousandths of the close
    pub buy_bbdelta: IntParameter,
    /// Minimum candle-to-candle move, in thousandths of the close
    pub buy_closedelta: IntParameter,
    /// Maximum lower tail, in thousandths of the band width
    pub buy_tail: IntParameter,
}

impl Default for BinHV45Params {
    fn default() -> Self {
        Self {
            buy_bbdelta: IntParameter::new(1, 15, 7, ParameterSpace::Buy),
            buy_closedelta: IntParameter::new(15, 20, 17, ParameterSpace::Buy),
            buy_tail: IntParameter::new(20, 30, 25, ParameterSpace::Buy),
        }
    }
}

/// Bollinger dip-buying strategy on the 15 minute interval
#[derive(Debug)]
pub struct BinHV45Strategy {
    params: BinHV45Params,
}

impl BinHV45Strategy {
    /// Create a new BinHV45 strategy with the given parameters
    pub fn new(params: BinHV45Params) -> Self {
        Self { params }
    }
}

impl Default for BinHV45Strategy {
    fn default() -> Self {
        Self::new(BinHV45Params::default())
    }
}

impl Strategy for BinHV45Strategy {
    fn name(&self) -> &str {
        "BinHV45"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::M15
    }

    fn startup_candle_count(&self) -> usize {
        50
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: -0.05,
            minimal_roi: RoiTable::new(vec![(0, 0.0125)]),
            ..RiskProfile::default()
        }
    }

    fn parameters(&self) -> Vec<ParameterInfo> {
        vec![
            self.params.buy_bbdelta.info("buy_bbdelta"),
            self.params.buy_closedelta.info("buy_closedelta"),
            self.params.buy_tail.info("buy_tail"),
        ]
    }

    fn on_start(&self, ctx: &HostContext<'_>) {
        ctx.notify(&compose_startup_message(self, ctx));
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, _ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let opens = frame.opens();
        let lows = frame.lows();
        let len = frame.len();

        let bb = calculate_bb(&closes, 40, 2.0);
        let bbdelta: Vec<f64> = (0..len).map(|i| (bb.middle[i] - bb.lower[i]).abs()).collect();
        let pricedelta: Vec<f64> = (0..len).map(|i| (opens[i] - closes[i]).abs()).collect();
        let close_prev = series::shift(&closes, 1);
        let closedelta: Vec<f64> = (0..len).map(|i| (closes[i] - close_prev[i]).abs()).collect();
        let tail: Vec<f64> = (0..len).map(|i| (closes[i] - lows[i]).abs()).collect();

        frame.set_column("upper", bb.upper)?;
        frame.set_column("mid", bb.middle)?;
        frame.set_column("lower", bb.lower)?;
        frame.set_column("bbdelta", bbdelta)?;
        frame.set_column("pricedelta", pricedelta)?;
        frame.set_column("closedelta", closedelta)?;
        frame.set_column("tail", tail)?;
        debug!("BinHV45 indicators populated for {}", frame.pair());
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let close_prev = series::shift(&closes, 1);
        let lower_prev = series::shift(frame.column("lower")?, 1);
        let bbdelta = frame.column("bbdelta")?;
        let closedelta = frame.column("closedelta")?;
        let tail = frame.column("tail")?;

        let bbdelta_ratio = self.params.buy_bbdelta.value as f64 / 1000.0;
        let closedelta_ratio = self.params.buy_closedelta.value as f64 / 1000.0;
        let tail_ratio = self.params.buy_tail.value as f64 / 1000.0;

        let enter: Vec<bool> = (0..closes.len())
            .map(|i| {
                lower_prev[i] > 0.0
                    && bbdelta[i] > closes[i] * bbdelta_ratio
                    && closedelta[i] > closes[i] * closedelta_ratio
                    && tail[i] < bbdelta[i] * tail_ratio
                    && closes[i] < lower_prev[i]
                    && closes[i] <= close_prev[i]
            })
            .collect();
        frame.mark_enter_long(&enter)
    }

    fn populate_exit_trend(&self, _frame: &mut StrategyFrame) -> Result<()> {
        // Exits are handled entirely by ROI and the stoploss.
        Ok(())
    }
}
