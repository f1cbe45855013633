//! Informative (multi-timeframe) merging

use tracing::debug;

use crate::data::StrategyFrame;
use crate::error::{Result, StrategyError};

/// Align derived columns of a coarser-timeframe frame onto a finer one.
///
/// An informative row becomes visible on the first primary row whose open time
/// is at or past the informative candle's close, i.e. the merge key is
/// `informative open + informative minutes - primary minutes`, and each
/// primary row takes the latest visible informative value (forward-fill).
/// Copied columns keep their name with a `_{timeframe}` suffix; primary rows
/// before the first closed informative candle stay NaN.
pub fn merge_informative_pair(
    primary: &mut StrategyFrame,
    informative: &StrategyFrame,
    columns: &[&str],
) -> Result<()> {
    let inf_tf = informative.timeframe();
    let pri_tf = primary.timeframe();
    if inf_tf.minutes() < pri_tf.minutes() {
        return Err(StrategyError::TimeframeMismatch {
            primary: pri_tf,
            informative: inf_tf,
        });
    }

    let offset = inf_tf.duration() - pri_tf.duration();
    let merge_keys: Vec<_> = informative
        .table()
        .timestamps()
        .into_iter()
        .map(|t| t + offset)
        .collect();
    let primary_times = primary.table().timestamps();

    for name in columns {
        let source = informative.column(name)?;
        let mut merged = vec![f64::NAN; primary_times.len()];
        let mut next = 0usize;
        let mut current = f64::NAN;
        for (i, t) in primary_times.iter().enumerate() {
            while next < merge_keys.len() && merge_keys[next] <= *t {
                current = source[next];
                next += 1;
            }
            merged[i] = current;
        }
        let target = format!("{}_{}", name, inf_tf);
        debug!(
            "Merged informative column {} ({} rows) into {}",
            name,
            source.len(),
            target
        );
        primary.set_column(&target, merged)?;
    }

    Ok(())
}
