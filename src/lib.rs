//! FreqHub-Strategies: a Rust port of the FreqHub strategy suite
//!
//! This crate is the strategy plugin layer of a freqtrade-style trading bot.
//! The host application owns data feeds, order execution and persistence; this
//! crate owns the analytical pipeline using:
//! - [ta-rs](https://github.com/greyblake/ta-rs) for technical analysis
//!
//! # Features
//!
//! - **Data Model**: validated OHLCV candle tables and strategy frames with
//!   derived columns and entry/exit flags
//! - **Technical Indicators**: RSI, MACD, EMA, SMA, BB, ATR, ADX and the
//!   rolling-series helpers the strategies share
//! - **Strategy Suite**: ten interchangeable strategies behind one trait
//!   (indicators, entry/exit signals, trade gate, dynamic stoploss)
//! - **Host Seam**: explicit capability traits for candle data, trade history
//!   and notifications injected by the host
//! - **Registry**: create any strategy by name
//!
//! # Example
//!
//! ```no_run
//! use freqhub_strategies::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let registry = StrategyRegistry::new();
//!     let strategy = registry.create("Template")?;
//!     let store = CandleStore::new();
//!     let ctx = HostContext::new(&store);
//!     let table = CandleTable::new("BTC/USDT", Timeframe::M5, Vec::new())?;
//!     let mut frame = StrategyFrame::new(table);
//!     strategy.analyze(&mut frame, &ctx)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod host;
pub mod indicators;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::host::*;
    pub use crate::indicators::*;
    pub use crate::strategy::*;

    pub use crate::error::{Result, StrategyError};
}

pub use crate::error::{Result, StrategyError};
