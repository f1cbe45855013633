//! Strategy frame: candles plus derived columns and signal flags

use std::collections::HashMap;

use crate::data::{Candle, CandleTable, Timeframe};
use crate::error::{Result, StrategyError};

/// A candle table extended with named derived columns and signal flags.
///
/// Derived columns are `f64` vectors aligned to the candle rows; `f64::NAN`
/// marks warm-up or otherwise undefined cells, and any comparison against NaN
/// evaluates false in the signal stage. The four flag columns always cover
/// every row and start out all-false, so signals are total over the frame.
#[derive(Debug, Clone)]
pub struct StrategyFrame {
    table: CandleTable,
    columns: HashMap<String, Vec<f64>>,
    enter_long: Vec<bool>,
    enter_short: Vec<bool>,
    exit_long: Vec<bool>,
    exit_short: Vec<bool>,
}

impl StrategyFrame {
    /// Create a frame over a candle table with no derived columns and
    /// all-false flags
    pub fn new(table: CandleTable) -> Self {
        let rows = table.len();
        Self {
            table,
            columns: HashMap::new(),
            enter_long: vec![false; rows],
            enter_short: vec![false; rows],
            exit_long: vec![false; rows],
            exit_short: vec![false; rows],
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if frame has no rows
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Underlying candle table
    pub fn table(&self) -> &CandleTable {
        &self.table
    }

    /// Pair identifier
    pub fn pair(&self) -> &str {
        self.table.pair()
    }

    /// Candle interval
    pub fn timeframe(&self) -> Timeframe {
        self.table.timeframe()
    }

    /// Candle rows
    pub fn candles(&self) -> &[Candle] {
        self.table.candles()
    }

    /// Open prices
    pub fn opens(&self) -> Vec<f64> {
        self.table.opens()
    }

    /// High prices
    pub fn highs(&self) -> Vec<f64> {
        self.table.highs()
    }

    /// Low prices
    pub fn lows(&self) -> Vec<f64> {
        self.table.lows()
    }

    /// Close prices
    pub fn closes(&self) -> Vec<f64> {
        self.table.closes()
    }

    /// Volumes
    pub fn volumes(&self) -> Vec<f64> {
        self.table.volumes()
    }

    /// Store a derived column, replacing any previous column of that name
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.len() {
            return Err(StrategyError::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                actual: values.len(),
            });
        }
        self.columns.insert(name.to_string(), values);
        Ok(())
    }

    /// Read a derived column
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| StrategyError::MissingColumn(name.to_string()))
    }

    /// Check whether a derived column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Names of all derived columns
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Flag long entries where `mask` is true. Marks accumulate: rows flagged
    /// by an earlier call stay flagged.
    pub fn mark_enter_long(&mut self, mask: &[bool]) -> Result<()> {
        Self::apply_mask(&mut self.enter_long, mask, self.table.len(), "enter_long")
    }

    /// Flag short entries where `mask` is true
    pub fn mark_enter_short(&mut self, mask: &[bool]) -> Result<()> {
        Self::apply_mask(&mut self.enter_short, mask, self.table.len(), "enter_short")
    }

    /// Flag long exits where `mask` is true
    pub fn mark_exit_long(&mut self, mask: &[bool]) -> Result<()> {
        Self::apply_mask(&mut self.exit_long, mask, self.table.len(), "exit_long")
    }

    /// Flag short exits where `mask` is true
    pub fn mark_exit_short(&mut self, mask: &[bool]) -> Result<()> {
        Self::apply_mask(&mut self.exit_short, mask, self.table.len(), "exit_short")
    }

    /// Long entry flags
    pub fn enter_long(&self) -> &[bool] {
        &self.enter_long
    }

    /// Short entry flags
    pub fn enter_short(&self) -> &[bool] {
        &self.enter_short
    }

    /// Long exit flags
    pub fn exit_long(&self) -> &[bool] {
        &self.exit_long
    }

    /// Short exit flags
    pub fn exit_short(&self) -> &[bool] {
        &self.exit_short
    }

    fn apply_mask(flags: &mut [bool], mask: &[bool], rows: usize, name: &str) -> Result<()> {
        if mask.len() != rows {
            return Err(StrategyError::LengthMismatch {
                column: name.to_string(),
                expected: rows,
                actual: mask.len(),
            });
        }
        for (flag, set) in flags.iter_mut().zip(mask) {
            *flag |= set;
        }
        Ok(())
    }
}
