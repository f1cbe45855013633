//! Configuration module

pub mod risk;
pub mod roi;

pub use risk::*;
pub use roi::*;
