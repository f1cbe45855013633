//! SMA (Simple Moving Average) indicator

use crate::indicators::Indicator;
use ta::indicators::SimpleMovingAverage;
use ta::Next;

/// SMA indicator wrapper
#[derive(Debug)]
pub struct SMA {
    inner: SimpleMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Self {
        Self {
            inner: SimpleMovingAverage::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    /// Get SMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Calculate SMA over a series; warm-up rows are NaN
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    let mut sma = SMA::new(period);
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        sma.update(value);
        results.push(sma.value().unwrap_or(f64::NAN));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_warm_up_and_value() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = calculate_sma(&values, 3);
        assert!(sma[0].is_nan());
        assert!(sma[1].is_nan());
        assert_eq!(sma[2], 2.0);
        assert_eq!(sma[4], 4.0);
    }
}
