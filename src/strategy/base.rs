//! Base strategy trait and host-facing value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RiskProfile;
use crate::data::{StrategyFrame, Timeframe};
use crate::host::HostContext;
use crate::strategy::{DailyProfitState, ParameterInfo};
use crate::Result;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Long / buy
    Long,
    /// Short / sell
    Short,
}

/// An entry the host proposes before opening a position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryProposal {
    /// Pair identifier
    pub pair: String,
    /// Trade direction
    pub side: Side,
    /// Proposed amount in base currency
    pub amount: f64,
    /// Proposed entry rate
    pub rate: f64,
    /// Proposal time
    pub time: DateTime<Utc>,
    /// Entry tag from the signal stage, when present
    pub tag: Option<String>,
}

/// Base trait for all trading strategies
///
/// The host drives every stage: it builds a [`StrategyFrame`] from candle
/// history, runs the indicator stage, then the entry and exit signal stages,
/// and consults the optional hooks per trade. [`Strategy::analyze`] chains
/// the three stages for convenience.
pub trait Strategy {
    /// Get strategy name
    fn name(&self) -> &str;

    /// Primary candle interval
    fn timeframe(&self) -> Timeframe;

    /// Leading candles required before signals are trustworthy
    fn startup_candle_count(&self) -> usize {
        0
    }

    /// Static risk configuration
    fn risk(&self) -> RiskProfile;

    /// Tunable parameters for host-side optimizers
    fn parameters(&self) -> Vec<ParameterInfo> {
        Vec::new()
    }

    /// Coarser intervals the indicator stage requests from the host
    fn informative_timeframes(&self) -> Vec<Timeframe> {
        Vec::new()
    }

    /// One-time hook when the host brings the strategy up
    fn on_start(&self, _ctx: &HostContext<'_>) {}

    /// Indicator stage: extend the frame with derived columns
    fn populate_indicators(&self, frame: &mut StrategyFrame, ctx: &HostContext<'_>) -> Result<()>;

    /// Entry signal stage: flag rows that open positions
    fn populate_entry_trend(&self, frame: &mut StrategyFrame) -> Result<()>;

    /// Exit signal stage: flag rows that close positions
    fn populate_exit_trend(&self, frame: &mut StrategyFrame) -> Result<()>;

    /// Trade gate: veto a proposed entry. Default accepts everything.
    fn confirm_trade_entry(
        &self,
        _proposal: &EntryProposal,
        _ctx: &HostContext<'_>,
        _state: &mut DailyProfitState,
    ) -> bool {
        true
    }

    /// Dynamic stoploss for an open position, as a non-negative fraction
    /// below the current rate. `None` leaves the static stop in place.
    fn custom_stoploss(
        &self,
        _pair: &str,
        _current_time: DateTime<Utc>,
        _current_rate: f64,
        _current_profit: f64,
    ) -> Option<f64> {
        None
    }

    /// Run indicator, entry and exit stages in order
    fn analyze(&self, frame: &mut StrategyFrame, ctx: &HostContext<'_>) -> Result<()> {
        debug!("Analyzing {} rows with {}", frame.len(), self.name());
        self.populate_indicators(frame, ctx)?;
        self.populate_entry_trend(frame)?;
        self.populate_exit_trend(frame)
    }
}

/// Compose the startup notification a strategy sends from [`Strategy::on_start`].
///
/// Host facts that are not configured fall back to display defaults.
pub fn compose_startup_message(strategy: &dyn Strategy, ctx: &HostContext<'_>) -> String {
    let info = ctx.info();
    let exchange = info.exchange.as_deref().unwrap_or("binance");
    let stake_currency = info.stake_currency.as_deref().unwrap_or("USDT");
    let stake_amount = info.stake_amount.as_deref().unwrap_or("unlimited");
    let risk = strategy.risk();
    let roi = serde_json::to_string(&risk.minimal_roi).unwrap_or_else(|_| "{}".to_string());

    format!(
        "\u{1F916} *Bot Startup - {name}*\n\n\
         *Exchange:* `{exchange}`\n\
         *Stake per trade:* `{stake_amount} {stake_currency}`\n\
         *Minimum ROI:* `{roi}`\n\
         *Stop Loss:* `{stoploss}`\n\
         *Position adjustment:* `Off`\n\
         *Timeframe:* `{timeframe}`\n\
         *Strategy:* `{name}`\n\
         *Startup candles:* `{startup}`\n\n\
         Bot started successfully and ready to trade.",
        name = strategy.name(),
        exchange = exchange,
        stake_amount = stake_amount,
        stake_currency = stake_currency,
        roi = roi,
        stoploss = risk.stoploss,
        timeframe = strategy.timeframe(),
        startup = strategy.startup_candle_count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CandleStore;
    use crate::host::HostInfo;
    use crate::strategy::implementations::TemplateStrategy;

    #[test]
    fn test_startup_message_uses_display_defaults() {
        let store = CandleStore::new();
        let ctx = HostContext::new(&store);

        let message = compose_startup_message(&TemplateStrategy::new(), &ctx);
        assert!(message.contains("*Strategy:* `Template`"));
        assert!(message.contains("*Exchange:* `binance`"));
        assert!(message.contains("`unlimited USDT`"));
        assert!(message.contains("\"0\":0.04"));
        assert!(message.contains("*Timeframe:* `5m`"));
    }

    #[test]
    fn test_startup_message_uses_host_info() {
        let store = CandleStore::new();
        let ctx = HostContext::new(&store).with_info(HostInfo {
            exchange: Some("kraken".to_string()),
            stake_currency: Some("EUR".to_string()),
            stake_amount: Some("100".to_string()),
        });

        let message = compose_startup_message(&TemplateStrategy::new(), &ctx);
        assert!(message.contains("*Exchange:* `kraken`"));
        assert!(message.contains("`100 EUR`"));
    }
}
