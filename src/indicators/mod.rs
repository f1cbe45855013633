//! Technical indicators module
//!
//! Provides technical analysis indicators using the `ta` crate, plus the
//! rolling-series helpers the strategies share. The `calculate_*` functions
//! return row-aligned `Vec<f64>` with NaN during each indicator's warm-up.

pub mod adx;
pub mod atr;
pub mod bb;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod series;
pub mod sma;

pub use adx::*;
pub use atr::*;
pub use bb::*;
pub use ema::*;
pub use macd::*;
pub use rsi::*;
pub use sma::*;

/// Indicator trait for all single-input indicators
pub trait Indicator {
    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}
