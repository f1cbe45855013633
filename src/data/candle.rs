//! OHLCV candle data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::Timeframe;
use crate::error::{Result, StrategyError};

/// OHLCV candle data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
    /// Open time of the interval
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    /// Check OHLCV sanity, returning a reason on failure
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (label, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} is not a positive price", label));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err("volume is negative".to_string());
        }
        if self.high < self.open.max(self.close).max(self.low) {
            return Err("high below open/close/low".to_string());
        }
        if self.low > self.open.min(self.close).min(self.high) {
            return Err("low above open/close/high".to_string());
        }
        Ok(())
    }

    /// Get typical price (HLC/3)
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Get median price (HL/2)
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Check if candle is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get body size (absolute difference between open and close)
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Get upper wick size
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// Get lower wick size
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Get total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Ordered candle history for one pair and timeframe
///
/// Construction validates every candle and enforces strictly increasing
/// timestamps, so row order is temporal order for every consumer downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleTable {
    pair: String,
    timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl CandleTable {
    /// Create a table, validating ordering and per-candle sanity
    pub fn new(pair: &str, timeframe: Timeframe, candles: Vec<Candle>) -> Result<Self> {
        for (index, candle) in candles.iter().enumerate() {
            candle
                .validate()
                .map_err(|reason| StrategyError::InvalidCandle { index, reason })?;
            if index > 0 && candle.timestamp <= candles[index - 1].timestamp {
                return Err(StrategyError::UnorderedCandles { index });
            }
        }
        Ok(Self {
            pair: pair.to_string(),
            timeframe,
            candles,
        })
    }

    /// Create an empty table
    pub fn empty(pair: &str, timeframe: Timeframe) -> Self {
        Self {
            pair: pair.to_string(),
            timeframe,
            candles: Vec::new(),
        }
    }

    /// Append a candle, validating it against the current tail
    pub fn push(&mut self, candle: Candle) -> Result<()> {
        let index = self.candles.len();
        candle
            .validate()
            .map_err(|reason| StrategyError::InvalidCandle { index, reason })?;
        if let Some(last) = self.candles.last() {
            if candle.timestamp <= last.timestamp {
                return Err(StrategyError::UnorderedCandles { index });
            }
        }
        self.candles.push(candle);
        Ok(())
    }

    /// Pair identifier (e.g., "BTC/USDT")
    pub fn pair(&self) -> &str {
        &self.pair
    }

    /// Candle interval
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Get number of candles
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if table is empty
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get candle at index
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Get last candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Get all candles
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Get open times as vector
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.candles.iter().map(|c| c.timestamp).collect()
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Get open prices as vector
    pub fn opens(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.open).collect()
    }

    /// Get high prices as vector
    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// Get low prices as vector
    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// Get volumes as vector
    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}
