//! Strategy engine module
//!
//! The strategy trait, shared machinery (parameters, stoploss math,
//! daily-profit gates, registry) and the built-in strategy suite.

pub mod base;
pub mod daily_profit;
pub mod implementations;
pub mod params;
pub mod registry;
pub mod stoploss;

pub use base::*;
pub use daily_profit::*;
pub use implementations::*;
pub use params::*;
pub use registry::*;
pub use stoploss::*;
