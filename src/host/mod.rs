//! Host capability seam
//!
//! Everything the external host injects into a strategy: candle data, trade
//! history, notifications and display facts. Capabilities are resolved once
//! into a [`HostContext`] instead of being probed at call sites.

pub mod context;
pub mod history;
pub mod notify;
pub mod provider;

pub use context::*;
pub use history::*;
pub use notify::*;
pub use provider::*;
