//! Template strategy: the minimal reference layout for new strategies.
//!
//! Trend filter with an oversold trigger: enter when the fast EMA is above
//! the slow EMA while RSI dips under 30, exit when the trend flips or RSI
//! becomes overbought.

use tracing::debug;

use crate::config::{RiskProfile, RoiTable};
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::indicators::{calculate_ema, calculate_rsi};
use crate::strategy::Strategy;
use crate::Result;

/// Minimal EMA trend / RSI dip strategy, kept intentionally small so it can
/// serve as a starting point for new implementations.
#[derive(Debug, Default)]
pub struct TemplateStrategy;

impl TemplateStrategy {
    /// Create a new template strategy
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for TemplateStrategy {
    fn name(&self) -> &str {
        "Template"
    }

    fn timeframe(&self) -> Timeframe {
        Timeframe::M5
    }

    fn startup_candle_count(&self) -> usize {
        50
    }

    fn risk(&self) -> RiskProfile {
        RiskProfile {
            stoploss: -0.10,
            minimal_roi: RoiTable::new(vec![(0, 0.04)]),
            ..RiskProfile::default()
        }
    }

    fn populate_indicators(&self, frame: &mut StrategyFrame, _ctx: &HostContext<'_>) -> Result<()> {
        let closes = frame.closes();
        frame.set_column("ema_fast", calculate_ema(&closes, 12))?;
        frame.set_column("ema_slow", calculate_ema(&closes, 26))?;
        frame.set_column("rsi", calculate_rsi(&closes, 14))?;
        debug!(
            "Template indicators populated for {} ({} candles)",
            frame.pair(),
            frame.len()
        );
        Ok(())
    }

    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let ema_fast = frame.column("ema_fast")?;
        let ema_slow = frame.column("ema_slow")?;
        let rsi = frame.column("rsi")?;

        let enter: Vec<bool> = (0..frame.len())
            .map(|i| ema_fast[i] > ema_slow[i] && rsi[i] < 30.0)
            .collect();
        frame.mark_enter_long(&enter)
    }

    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()> {
        let ema_fast = frame.column("ema_fast")?;
        let ema_slow = frame.column("ema_slow")?;
        let rsi = frame.column("rsi")?;

        let exit: Vec<bool> = (0..frame.len())
            .map(|i| ema_fast[i] < ema_slow[i] || rsi[i] > 70.0)
            .collect();
        frame.mark_exit_long(&exit)
    }
}
