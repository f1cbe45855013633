//! Tunable strategy parameters
//!
//! Each parameter carries its inclusive range, its working value (the default
//! unless the host constructed the strategy otherwise) and the hyperopt space
//! it belongs to. Parameters never change during a pipeline run.

use serde::{Deserialize, Serialize};

/// Hyperopt space a parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSpace {
    /// Entry-side parameter
    Buy,
    /// Exit-side parameter
    Sell,
}

/// Integer parameter with an inclusive range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntParameter {
    pub low: i64,
    pub high: i64,
    pub value: i64,
    pub space: ParameterSpace,
}

impl IntParameter {
    /// Create a parameter; `default` becomes the working value
    pub fn new(low: i64, high: i64, default: i64, space: ParameterSpace) -> Self {
        assert!(
            low <= default && default <= high,
            "parameter default out of range"
        );
        Self {
            low,
            high,
            value: default,
            space,
        }
    }

    /// Working value as usize, for indicator periods
    pub fn as_period(&self) -> usize {
        self.value.max(0) as usize
    }

    /// Describe this parameter under `name`
    pub fn info(&self, name: &str) -> ParameterInfo {
        ParameterInfo {
            name: name.to_string(),
            space: self.space,
            kind: ParameterKind::Int {
                low: self.low,
                high: self.high,
                value: self.value,
            },
        }
    }
}

/// Floating-point parameter with an inclusive range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecimalParameter {
    pub low: f64,
    pub high: f64,
    pub value: f64,
    pub space: ParameterSpace,
}

impl DecimalParameter {
    /// Create a parameter; `default` becomes the working value
    pub fn new(low: f64, high: f64, default: f64, space: ParameterSpace) -> Self {
        assert!(
            low <= default && default <= high,
            "parameter default out of range"
        );
        Self {
            low,
            high,
            value: default,
            space,
        }
    }

    /// Describe this parameter under `name`
    pub fn info(&self, name: &str) -> ParameterInfo {
        ParameterInfo {
            name: name.to_string(),
            space: self.space,
            kind: ParameterKind::Decimal {
                low: self.low,
                high: self.high,
                value: self.value,
            },
        }
    }
}

/// Boolean parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoolParameter {
    pub value: bool,
    pub space: ParameterSpace,
}

impl BoolParameter {
    /// Create a parameter; `default` becomes the working value
    pub fn new(default: bool, space: ParameterSpace) -> Self {
        Self {
            value: default,
            space,
        }
    }

    /// Describe this parameter under `name`
    pub fn info(&self, name: &str) -> ParameterInfo {
        ParameterInfo {
            name: name.to_string(),
            space: self.space,
            kind: ParameterKind::Bool { value: self.value },
        }
    }
}

/// Description of one tunable parameter for host-side optimizers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name as published to the host
    pub name: String,
    /// Hyperopt space
    pub space: ParameterSpace,
    /// Range and working value
    pub kind: ParameterKind,
}

/// Range and working value per parameter type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    Int { low: i64, high: i64, value: i64 },
    Decimal { low: f64, high: f64, value: f64 },
    Bool { value: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_carries_default() {
        let p = IntParameter::new(1, 15, 7, ParameterSpace::Buy);
        assert_eq!(p.value, 7);
        assert_eq!(p.as_period(), 7);

        let info = p.info("buy_bbdelta");
        assert_eq!(info.name, "buy_bbdelta");
        assert_eq!(info.space, ParameterSpace::Buy);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_default_must_be_in_range() {
        DecimalParameter::new(0.0, 1.0, 2.0, ParameterSpace::Sell);
    }
}
