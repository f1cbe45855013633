//! Bollinger Bands indicator

use crate::indicators::Indicator;
use ta::indicators::BollingerBands as TaBollingerBands;
use ta::Next;

/// Bollinger Bands indicator wrapper
#[derive(Debug)]
pub struct BollingerBands {
    inner: TaBollingerBands,
    period: usize,
    std_dev: f64,
    update_count: usize,
    last_output: Option<ta::indicators::BollingerBandsOutput>,
}

impl BollingerBands {
    /// Create new Bollinger Bands indicator
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self {
            inner: TaBollingerBands::new(period, std_dev).unwrap(),
            period,
            std_dev,
            update_count: 0,
            last_output: None,
        }
    }

    /// Get band width multiplier
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Get upper band
    pub fn upper(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.upper)
    }

    /// Get middle band (SMA)
    pub fn middle(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.average)
    }

    /// Get lower band
    pub fn lower(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.lower)
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        "BollingerBands"
    }

    fn update(&mut self, value: f64) {
        let output = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_output = Some(output);
        }
    }

    fn value(&self) -> Option<f64> {
        self.middle()
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Bollinger band series, row-aligned with the input
#[derive(Debug, Clone)]
pub struct BBSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Calculate Bollinger Bands over a series; warm-up rows are NaN
pub fn calculate_bb(values: &[f64], period: usize, std_dev: f64) -> BBSeries {
    let mut bb = BollingerBands::new(period, std_dev);
    let mut upper = Vec::with_capacity(values.len());
    let mut middle = Vec::with_capacity(values.len());
    let mut lower = Vec::with_capacity(values.len());

    for &value in values {
        bb.update(value);
        upper.push(bb.upper().unwrap_or(f64::NAN));
        middle.push(bb.middle().unwrap_or(f64::NAN));
        lower.push(bb.lower().unwrap_or(f64::NAN));
    }

    BBSeries {
        upper,
        middle,
        lower,
    }
}
