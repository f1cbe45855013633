//! Rolling-series helpers shared by the strategies
//!
//! All helpers keep dataframe column semantics: outputs align row for row with
//! the input and `f64::NAN` marks cells with no defined value. Rolling windows
//! require a full window of non-NaN values; comparisons against NaN are false,
//! so warm-up rows can never produce a signal.

/// Shift a series by `periods` rows. Positive periods reference the past
/// (row i takes the value from i - periods), negative periods reference the
/// future. Vacated cells are NaN.
pub fn shift(values: &[f64], periods: isize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if periods >= 0 {
        let p = periods as usize;
        for i in p..n {
            out[i] = values[i - p];
        }
    } else {
        let p = periods.unsigned_abs();
        for i in 0..n.saturating_sub(p) {
            out[i] = values[i + p];
        }
    }
    out
}

fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    assert!(window > 0, "rolling window must be positive");
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if window > n {
        return out;
    }
    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[i] = f(slice);
    }
    out
}

/// Rolling maximum over `window` rows
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        w.iter().fold(f64::NEG_INFINITY, |acc, &v| acc.max(v))
    })
}

/// Rolling minimum over `window` rows
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        w.iter().fold(f64::INFINITY, |acc, &v| acc.min(v))
    })
}

/// Rolling arithmetic mean over `window` rows
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        w.iter().sum::<f64>() / w.len() as f64
    })
}

/// Rolling sample standard deviation over `window` rows
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let var = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (w.len() as f64 - 1.0);
        var.sqrt()
    })
}

/// Row-over-row fractional change; the first row is NaN
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] / values[i - 1] - 1.0;
    }
    out
}

/// Carry the last non-NaN value forward; leading NaN stay NaN
pub fn ffill(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut current = f64::NAN;
    for &v in values {
        if !v.is_nan() {
            current = v;
        }
        out.push(current);
    }
    out
}

/// Carry the last non-NaN value forward for at most `limit` consecutive rows
pub fn ffill_limit(values: &[f64], limit: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut current = f64::NAN;
    let mut age = 0usize;
    for &v in values {
        if !v.is_nan() {
            current = v;
            age = 0;
            out.push(v);
        } else if !current.is_nan() && age < limit {
            age += 1;
            out.push(current);
        } else {
            out.push(f64::NAN);
        }
    }
    out
}

/// Recursive exponential mean with alpha = 2 / (span + 1), seeded with the
/// first value
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span > 0, "ewm span must be positive");
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut state = f64::NAN;
    for &v in values {
        if state.is_nan() {
            state = v;
        } else if !v.is_nan() {
            state = alpha * v + (1.0 - alpha) * state;
        }
        out.push(state);
    }
    out
}

/// Single-bar upward cross: true at row i when a > b at i and a <= b at i-1
pub fn crossed_above(a: &[f64], b: &[f64]) -> Vec<bool> {
    let n = a.len().min(b.len());
    let mut out = vec![false; n];
    for i in 1..n {
        out[i] = a[i] > b[i] && a[i - 1] <= b[i - 1];
    }
    out
}

/// Single-bar downward cross: true at row i when a < b at i and a >= b at i-1
pub fn crossed_below(a: &[f64], b: &[f64]) -> Vec<bool> {
    let n = a.len().min(b.len());
    let mut out = vec![false; n];
    for i in 1..n {
        out[i] = a[i] < b[i] && a[i - 1] >= b[i - 1];
    }
    out
}

/// True at row i when any of the previous `window` rows (excluding i itself)
/// is true. Rows without a full lookback window are false.
pub fn lookback_any(mask: &[bool], window: usize) -> Vec<bool> {
    let n = mask.len();
    let mut out = vec![false; n];
    for i in window..n {
        out[i] = mask[i - window..i].iter().any(|&m| m);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_past_and_future() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let back = shift(&values, 1);
        assert!(back[0].is_nan());
        assert_eq!(back[1..], [1.0, 2.0, 3.0]);

        let fwd = shift(&values, -2);
        assert_eq!(fwd[..2], [3.0, 4.0]);
        assert!(fwd[2].is_nan());
        assert!(fwd[3].is_nan());
    }

    #[test]
    fn test_rolling_requires_full_window() {
        let values = [1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0];
        let max = rolling_max(&values, 2);
        assert!(max[0].is_nan());
        assert_eq!(max[1], 2.0);
        assert!(max[2].is_nan()); // window touches the NaN
        assert!(max[3].is_nan());
        assert_eq!(max[4], 5.0);
        assert_eq!(max[5], 6.0);
    }

    #[test]
    fn test_rolling_std_is_sample_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = rolling_std(&values, 8);
        assert!((std[7] - 2.138089935).abs() < 1e-6);
    }

    #[test]
    fn test_ffill_limit() {
        let values = [f64::NAN, 1.0, f64::NAN, f64::NAN, f64::NAN, 2.0];
        let filled = ffill_limit(&values, 2);
        assert!(filled[0].is_nan());
        assert_eq!(filled[1], 1.0);
        assert_eq!(filled[2], 1.0);
        assert_eq!(filled[3], 1.0);
        assert!(filled[4].is_nan());
        assert_eq!(filled[5], 2.0);
    }

    #[test]
    fn test_crossed_above_fires_once() {
        let a = [1.0, 1.0, 3.0, 3.0];
        let b = [2.0, 2.0, 2.0, 2.0];
        assert_eq!(crossed_above(&a, &b), vec![false, false, true, false]);
        assert_eq!(crossed_below(&b, &a), vec![false, false, true, false]);
    }

    #[test]
    fn test_crossed_above_nan_never_fires() {
        let a = [f64::NAN, 3.0, 3.0];
        let b = [2.0, 2.0, 2.0];
        assert_eq!(crossed_above(&a, &b), vec![false, false, false]);
    }

    #[test]
    fn test_lookback_any_excludes_current_row() {
        let mask = [false, true, false, false, false, false];
        assert_eq!(
            lookback_any(&mask, 3),
            vec![false, false, false, true, true, false]
        );
    }

    #[test]
    fn test_ewm_mean_seed_and_recursion() {
        let values = [10.0, 20.0];
        let ewm = ewm_mean(&values, 3); // alpha = 0.5
        assert_eq!(ewm[0], 10.0);
        assert_eq!(ewm[1], 15.0);
    }
}
