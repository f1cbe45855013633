//! MandelbrotFibonacci strategy: fractal swing detection with Fibonacci
//! retracement entries in the trend direction.
//!
//! Five-candle fractals (confirmed two candles later) define the active
//! swing; entries fire when price retraces into the 0.382..0.618 pocket of
//! that swing while the EMA stack agrees with the trade direction. Short
//! predicates are populated even though shorting is disabled in the risk
//! profile, so a host that flips `can_short` on picks them up unchanged.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_ema, series};
use crate::strategy::{DecimalParameter, ParameterInfo, ParameterSpace, Strategy};
use crate::Result;

/// Tunable parameters for [`MandelbrotFibonacciStrategy`]
#[derive(Debug, Clone)]
pub struct MandelbrotFibonacciParams {
    /// Shallow retracement bound, as a fraction of the swing
    pub fib_low: DecimalParameter,
    /// Deep retracement bound, as a fraction of the swing
    pub fib_high: DecimalParameter,
    /// Volume must exceed its 20 candle average times this factor
    pub volume_factor: DecimalParameter,
}

impl Default for MandelbrotFibonacciParams {
    fn default() -> Self {
        Self {
            fib_low: DecimalParameter::new(0.35, 0.45, 0.382, ParameterSpace::Buy),
            fib_high: DecimalParameter::new(0.55, 0.7, 0.618, ParameterSpace::Buy),
            volume_factor: DecimalParameter::new(0.8, 2.0, 1.0, ParameterSpace::Buy),
        }
    }
}

/// Fractal swing plus Fibonacci retracement strategy on the 1 hour interval
#[derive(Debug)]
pub struct MandelbrotFibonacciStrategy {
    params: MandelbrotFibonacciParams,
}

impl MandelbrotFibonacciStrategy {
    /// Create a new MandelbrotFibonacci strategy with the given parameters
    pub fn new(params: MandelbrotFibonacciParams) -> Self {
        Self { params }
    }
}

impl Default for MandelbrotFibonacciStrategy {
    fn default() -> Self {
        Self::new(MandelbrotFibonacciParams::default())
    }
}

impl Strategy for MandelbrotFibonacciStrategy {
    fn name(&self) -> &str {
        "MandelbrotFibonacci"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::H1
    }

    fn startup_candle_count(&self) -> usize {
        210
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: -0.08,
            minimal_roi: RoiTable::new(vec![(0, 0.06), (360, 0.03), (720, 0.01)]),
            trailing_stop: true,
            trailing_stop_positive: Some(0.015),
            trailing_stop_positive_offset: 0.03,
            trailing_only_offset_is_reached: true,
            ..RiskProfile::default()
        }
    }

    fn parameters(&self) -> Vec<ParameterInfo> {
        vec![
            self.params.fib_low.info("fib_low"),
            self.params.fib_high.info("fib_high"),
            self.params.volume_factor.info("volume_factor"),
        ]
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, _ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        let highs = frame.highs();
        let lows = frame.lows();
        let volumes = frame.volumes();
        let len = frame.len();

        frame.set_column("ema_fast", calculate_ema(&closes, 50))?;
        frame.set_column("ema_slow", calculate_ema(&closes, 200))?;
        frame.set_column("volume_sma", series::rolling_mean(&volumes, 20))?;

        let high_prev1 = series::shift(&highs, 1);
        let high_prev2 = series::shift(&highs, 2);
        let high_next1 = series::shift(&highs, -1);
        let high_next2 = series::shift(&highs, -2);
        let fractal_high_raw: Vec<f64> = (0..len)
            .map(|i| {
                let is_fractal = highs[i] > high_prev1[i]
                    && highs[i] > high_prev2[i]
                    && highs[i] >= high_next1[i]
                    && highs[i] >= high_next2[i];
                if is_fractal {
                    highs[i]
                } else {
                    f64::NAN
                }
            })
            .collect();

        let low_prev1 = series::shift(&lows, 1);
        let low_prev2 = series::shift(&lows, 2);
        let low_next1 = series::shift(&lows, -1);
        let low_next2 = series::shift(&lows, -2);
        let fractal_low_raw: Vec<f64> = (0..len)
            .map(|i| {
                let is_fractal = lows[i] < low_prev1[i]
                    && lows[i] < low_prev2[i]
                    && lows[i] <= low_next1[i]
                    && lows[i] <= low_next2[i];
                if is_fractal {
                    lows[i]
                } else {
                    f64::NAN
                }
            })
            .collect();

        // A fractal uses two future candles, so it only becomes tradeable
        // two rows after the extreme prints.
        let fractal_high = series::shift(&fractal_high_raw, 2);
        let fractal_low = series::shift(&fractal_low_raw, 2);
        let swing_high = series::ffill(&fractal_high);
        let swing_low = series::ffill(&fractal_low);

        let swing_range: Vec<f64> = (0..len).map(|i| swing_high[i] - swing_low[i]).collect();
        let fib_low = self.params.fib_low.value;
        let fib_high = self.params.fib_high.value;
        let fib_382_long: Vec<f64> = (0..len)
            .map(|i| swing_high[i] - swing_range[i] * fib_low)
            .collect();
        let fib_618_long: Vec<f64> = (0..len)
            .map(|i| swing_high[i] - swing_range[i] * fib_high)
            .collect();
        let fib_382_short: Vec<f64> = (0..len)
            .map(|i| swing_low[i] + swing_range[i] * fib_low)
            .collect();
        let fib_618_short: Vec<f64> = (0..len)
            .map(|i| swing_low[i] + swing_range[i] * fib_high)
            .collect();

        frame.set_column("fractal_high", fractal_high)?;
        frame.set_column("fractal_low", fractal_low)?;
        frame.set_column("swing_high", swing_high)?;
        frame.set_column("swing_low", swing_low)?;
        frame.set_column("swing_range", swing_range)?;
        frame.set_column("fib_382_long", fib_382_long)?;
        frame.set_column("fib_618_long", fib_618_long)?;
        frame.set_column("fib_382_short", fib_382_short)?;
        frame.set_column("fib_618_short", fib_618_short)?;
        debug!("MandelbrotFibonacci swings mapped for {}", frame.pair());
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let closes = frame.closes();
        let opens = frame.opens();
        let volumes = frame.volumes();
        let ema_fast = frame.column("ema_fast")?;
        let ema_slow = frame.column("ema_slow")?;
        let volume_sma = frame.column("volume_sma")?;
        let swing_range = frame.column("swing_range")?;
        let fib_382_long = frame.column("fib_382_long")?;
        let fib_618_long = frame.column("fib_618_long")?;
        let fib_382_short = frame.column("fib_382_short")?;
        let fib_618_short = frame.column("fib_618_short")?;

        let volume_factor = self.params.volume_factor.value;

        let enter_long: Vec<bool> = (0..closes.len())
            .map(|i| {
                let volume_ok = volumes[i] > volume_sma[i] * volume_factor && volumes[i] > 0.0;
                swing_range[i] > 0.0
                    && ema_fast[i] > ema_slow[i]
                    && closes[i] > ema_slow[i]
                    && volume_ok
                    && closes[i] >= fib_382_long[i].min(fib_618_long[i])
                    && closes[i] <= fib_382_long[i].max(fib_618_long[i])
                    && closes[i] > ema_fast[i]
                    && closes[i] > opens[i]
            })
            .collect();
        let enter_short: Vec<bool> = (0..closes.len())
            .map(|i| {
                let volume_ok = volumes[i] > volume_sma[i] * volume_factor && volumes[i] > 0.0;
                swing_range[i] > 0.0
                    && ema_fast[i] < ema_slow[i]
                    && closes[i] < ema_slow[i]
                    && volume_ok
                    && closes[i] >= fib_382_short[i].min(fib_618_short[i])
                    && closes[i] <= fib_382_short[i].max(fib_618_short[i])
                    && closes[i] < ema_fast[i]
                    && closes[i] < opens[i]
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
}
