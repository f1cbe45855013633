//! In-memory candle storage

use std::collections::HashMap;

use crate::data::{CandleTable, Timeframe};
use crate::error::{Result, StrategyError};
use crate::host::DataProvider;

/// In-memory candle tables keyed by pair and timeframe.
///
/// Serves as the reference [`DataProvider`] for tests and the demo host.
#[derive(Debug, Default)]
pub struct CandleStore {
    tables: HashMap<(String, Timeframe), CandleTable>,
}

impl CandleStore {
    /// Create new storage
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Store a table under its own pair and timeframe
    pub fn insert(&mut self, table: CandleTable) {
        let key = (table.pair().to_string(), table.timeframe());
        self.tables.insert(key, table);
    }

    /// Get a stored table
    pub fn get(&self, pair: &str, timeframe: Timeframe) -> Option<&CandleTable> {
        self.tables.get(&(pair.to_string(), timeframe))
    }

    /// Get total number of stored candles
    pub fn len(&self) -> usize {
        self.tables.values().map(CandleTable::len).sum()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Clear all data
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

impl DataProvider for CandleStore {
    fn candles(&self, pair: &str, timeframe: Timeframe) -> Result<CandleTable> {
        self.get(pair, timeframe)
            .cloned()
            .ok_or_else(|| StrategyError::MissingInformative {
                pair: pair.to_string(),
                timeframe,
            })
    }
}
