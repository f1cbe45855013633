//! Candle data capability

use crate::data::{CandleTable, Timeframe};
use crate::error::Result;

/// Candle access the host must provide.
///
/// Strategies use it to fetch informative (coarser-timeframe) candles; the
/// primary frame always arrives from the host directly.
pub trait DataProvider {
    /// Serve candles for a pair and timeframe
    fn candles(&self, pair: &str, timeframe: Timeframe) -> Result<CandleTable>;
}
