//! ATR (Average True Range) indicator

use crate::data::Candle;
use ta::indicators::AverageTrueRange;
use ta::{DataItem, Next};

/// ATR indicator wrapper
///
/// Consumes whole candles rather than single values, so it sits outside the
/// scalar `Indicator` trait.
#[derive(Debug)]
pub struct ATR {
    inner: AverageTrueRange,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl ATR {
    /// Create new ATR indicator
    pub fn new(period: usize) -> Self {
        Self {
            inner: AverageTrueRange::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    /// Get ATR period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Update with a candle. Candles that fail OHLC sanity are skipped.
    pub fn update(&mut self, candle: &Candle) {
        let item = DataItem::builder()
            .open(candle.open)
            .high(candle.high)
            .low(candle.low)
            .close(candle.close)
            .volume(candle.volume)
            .build();
        if let Ok(item) = item {
            let value = self.inner.next(&item);
            self.update_count += 1;
            if self.update_count > self.period {
                self.last_value = Some(value);
            }
        }
    }

    /// Get current ATR value
    pub fn value(&self) -> Option<f64> {
        self.last_value
    }

    /// Check if indicator is ready (has enough data)
    pub fn is_ready(&self) -> bool {
        self.update_count > self.period
    }
}

/// Calculate ATR over candles; warm-up rows are NaN
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<f64> {
    let mut atr = ATR::new(period);
    let mut results = Vec::with_capacity(candles.len());

    for candle in candles {
        atr.update(candle);
        results.push(atr.value().unwrap_or(f64::NAN));
    }

    results
}
