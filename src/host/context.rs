//! Host context resolved at strategy initialization

use tracing::warn;

use crate::host::{DataProvider, Notifier, TradeHistory};

/// Optional host facts used for message composition
#[derive(Debug, Clone, Default)]
pub struct HostInfo {
    /// Exchange name
    pub exchange: Option<String>,
    /// Stake currency
    pub stake_currency: Option<String>,
    /// Stake amount per trade, as the host displays it
    pub stake_amount: Option<String>,
}

/// Host capabilities resolved once when a strategy is initialized.
///
/// Candle data is required. Trade history and notifications are optional;
/// hooks that need an absent capability fall back to their declared default
/// instead of failing.
pub struct HostContext<'a> {
    data: &'a dyn DataProvider,
    history: Option<&'a dyn TradeHistory>,
    notifier: Option<&'a dyn Notifier>,
    info: HostInfo,
}

impl<'a> HostContext<'a> {
    /// Create a context with only the required candle capability
    pub fn new(data: &'a dyn DataProvider) -> Self {
        Self {
            data,
            history: None,
            notifier: None,
            info: HostInfo::default(),
        }
    }

    /// Attach the trade-history capability
    pub fn with_history(mut self, history: &'a dyn TradeHistory) -> Self {
        self.history = Some(history);
        self
    }

    /// Attach the notification capability
    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Attach host facts for message composition
    pub fn with_info(mut self, info: HostInfo) -> Self {
        self.info = info;
        self
    }

    /// Candle access
    pub fn data(&self) -> &dyn DataProvider {
        self.data
    }

    /// Trade history, when the host provides it
    pub fn history(&self) -> Option<&dyn TradeHistory> {
        self.history
    }

    /// Notification sink, when the host provides it
    pub fn notifier(&self) -> Option<&dyn Notifier> {
        self.notifier
    }

    /// Host facts
    pub fn info(&self) -> &HostInfo {
        &self.info
    }

    /// Send a notification if a sink is attached. Delivery failures are
    /// logged and swallowed.
    pub fn notify(&self, message: &str) {
        if let Some(notifier) = self.notifier {
            if let Err(err) = notifier.send(message) {
                warn!("Notification dropped: {}", err);
            }
        }
    }
}
