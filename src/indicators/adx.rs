//! ADX (Average Directional Index) indicator
//!
//! `ta` 0.5 ships no ADX, so this follows the classic Wilder recurrences
//! directly: +DM/-DM/TR smoothed over `period`, DX from the DI spread, ADX as
//! the Wilder-smoothed DX. The first reading lands after `2 * period - 1`
//! candles.

/// Streaming Wilder ADX
#[derive(Debug)]
pub struct ADX {
    period: usize,
    prev: Option<(f64, f64, f64)>,
    smoothed_tr: f64,
    smoothed_plus_dm: f64,
    smoothed_minus_dm: f64,
    dx_sum: f64,
    adx: Option<f64>,
    raw_count: usize,
}

impl ADX {
    /// Create new ADX indicator
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "ADX period must be positive");
        Self {
            period,
            prev: None,
            smoothed_tr: 0.0,
            smoothed_plus_dm: 0.0,
            smoothed_minus_dm: 0.0,
            dx_sum: 0.0,
            adx: None,
            raw_count: 0,
        }
    }

    /// Get ADX period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Update with one candle's high, low and close
    pub fn update(&mut self, high: f64, low: f64, close: f64) {
        let (prev_high, prev_low, prev_close) = match self.prev.replace((high, low, close)) {
            Some(prev) => prev,
            None => return,
        };

        let up_move = high - prev_high;
        let down_move = prev_low - low;
        let plus_dm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let minus_dm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };
        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());

        let period = self.period as f64;
        self.raw_count += 1;
        if self.raw_count <= self.period {
            // Wilder seeds the smoothed values with a plain sum
            self.smoothed_tr += tr;
            self.smoothed_plus_dm += plus_dm;
            self.smoothed_minus_dm += minus_dm;
            if self.raw_count < self.period {
                return;
            }
        } else {
            self.smoothed_tr += tr - self.smoothed_tr / period;
            self.smoothed_plus_dm += plus_dm - self.smoothed_plus_dm / period;
            self.smoothed_minus_dm += minus_dm - self.smoothed_minus_dm / period;
        }

        let dx = if self.smoothed_tr > 0.0 {
            let plus_di = 100.0 * self.smoothed_plus_dm / self.smoothed_tr;
            let minus_di = 100.0 * self.smoothed_minus_dm / self.smoothed_tr;
            let di_sum = plus_di + minus_di;
            if di_sum > 0.0 {
                100.0 * (plus_di - minus_di).abs() / di_sum
            } else {
                0.0
            }
        } else {
            0.0
        };

        let dx_count = self.raw_count - self.period + 1;
        if dx_count <= self.period {
            self.dx_sum += dx;
            if dx_count == self.period {
                self.adx = Some(self.dx_sum / period);
            }
        } else if let Some(adx) = self.adx {
            self.adx = Some((adx * (period - 1.0) + dx) / period);
        }
    }

    /// Get current ADX value
    pub fn value(&self) -> Option<f64> {
        self.adx
    }

    /// Check if indicator is ready (has enough data)
    pub fn is_ready(&self) -> bool {
        self.adx.is_some()
    }
}

/// Calculate ADX over high/low/close series; warm-up rows are NaN
pub fn calculate_adx(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let mut adx = ADX::new(period);
    let n = highs.len().min(lows.len()).min(closes.len());
    let mut results = Vec::with_capacity(n);

    for i in 0..n {
        adx.update(highs[i], lows[i], closes[i]);
        results.push(adx.value().unwrap_or(f64::NAN));
    }

    results
}
