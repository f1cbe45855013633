//! RSI (Relative Strength Index) indicator

use crate::indicators::Indicator;
use ta::indicators::RelativeStrengthIndex;
use ta::Next;

/// RSI indicator wrapper
#[derive(Debug)]
pub struct RSI {
    inner: RelativeStrengthIndex,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Self {
        Self {
            inner: RelativeStrengthIndex::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, value: f64) {
        let rsi_value = self.inner.next(value);
        self.update_count += 1;
        // RSI needs period + 1 values for the first meaningful reading
        if self.update_count > self.period {
            self.last_value = Some(rsi_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count > self.period
    }
}

/// Calculate RSI over a series; warm-up rows are NaN
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<f64> {
    let mut rsi = RSI::new(period);
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        rsi.update(value);
        results.push(rsi.value().unwrap_or(f64::NAN));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_range_and_warm_up() {
        let values: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let rsi = calculate_rsi(&values, 14);
        for value in &rsi[..14] {
            assert!(value.is_nan());
        }
        for value in &rsi[14..] {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_high_on_pure_uptrend() {
        let values: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let rsi = calculate_rsi(&values, 14);
        assert!(rsi[29] > 70.0);
    }
}
