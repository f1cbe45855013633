//! Data management module
//!
//! Candle tables, strategy frames, informative merging and in-memory storage.

pub mod candle;
pub mod frame;
pub mod merge;
pub mod storage;
pub mod timeframe;

pub use candle::*;
pub use frame::*;
pub use merge::*;
pub use storage::*;
pub use timeframe::*;
