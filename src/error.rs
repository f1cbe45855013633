//! Error types for the strategy pipeline
//!
//! Failures of required inputs (missing columns, malformed candle tables,
//! unavailable informative data) halt a pipeline run and surface as
//! [`StrategyError`]. Failures of optional host capabilities (trade history,
//! notifications) are separate types owned by the `host` module and are
//! handled at the hook boundary instead of propagating.

use thiserror::Error;

use crate::data::Timeframe;

/// Errors raised by candle validation, frame access and the strategy stages.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// A predicate or indicator referenced a derived column that was never
    /// populated.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// The host could not serve candles for a requested informative pair and
    /// timeframe.
    #[error("missing informative data for {pair} at {timeframe}")]
    MissingInformative { pair: String, timeframe: Timeframe },

    /// A column write did not match the frame's row count.
    #[error("column '{column}' has {actual} rows, frame has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Candle timestamps were not strictly increasing.
    #[error("candle at index {index} is out of order")]
    UnorderedCandles { index: usize },

    /// A candle violated OHLCV sanity (negative volume, high below low, ...).
    #[error("invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: String },

    /// An informative merge was requested against a finer timeframe.
    #[error("informative timeframe {informative} is finer than primary {primary}")]
    TimeframeMismatch {
        primary: Timeframe,
        informative: Timeframe,
    },

    /// The registry has no strategy under the requested name.
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StrategyError>;
