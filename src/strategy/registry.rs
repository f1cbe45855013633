//! Strategy registry

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, StrategyError};
use crate::strategy::implementations::{
    BinHV45Strategy, EMACrossoverStrategy, FailureToReturnStrategy, IchiV1Strategy,
    MandelbrotFibonacciStrategy, MarkovStrategy, MessageTestStrategy, RSIBollingerStrategy,
    RSIEMA50Strategy, TemplateStrategy,
};
use crate::strategy::Strategy;

/// Factory closure producing a boxed strategy with default parameters
pub type StrategyFactory = Box<dyn Fn() -> Box<dyn Strategy> + Send + Sync>;

/// Name-indexed strategy factories
pub struct StrategyRegistry {
    factories: HashMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    /// Create a registry preloaded with the built-in strategies
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register("BinHV45", || Box::new(BinHV45Strategy::default()));
        registry.register("EMACrossover", || Box::new(EMACrossoverStrategy::default()));
        registry.register("FailureToReturn", || {
            Box::new(FailureToReturnStrategy::default())
        });
        registry.register("IchiV1", || Box::new(IchiV1Strategy::default()));
        registry.register("MandelbrotFibonacci", || {
            Box::new(MandelbrotFibonacciStrategy::default())
        });
        registry.register("Markov", || Box::new(MarkovStrategy::default()));
        registry.register("MessageTest", || Box::new(MessageTestStrategy::default()));
        registry.register("RSIBollinger", || Box::new(RSIBollingerStrategy::default()));
        registry.register("RSIEMA50", || Box::new(RSIEMA50Strategy::default()));
        registry.register("Template", || Box::new(TemplateStrategy::default()));

        registry
    }

    /// Register a strategy factory under a name
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Strategy> + Send + Sync + 'static,
    {
        debug!("Registering strategy: {}", name);
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Create a strategy by name
    pub fn create(&self, name: &str) -> Result<Box<dyn Strategy>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(StrategyError::UnknownStrategy(name.to_string())),
        }
    }

    /// Names of all registered strategies, sorted
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
