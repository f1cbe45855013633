//! Built-in strategy implementations

pub mod bin_hv45;
pub mod ema_crossover;
pub mod failure_to_return;
pub mod ichi_v1;
pub mod mandelbrot_fibonacci;
pub mod markov;
pub mod message_test;
pub mod rsi_bollinger;
pub mod rsi_ema50;
pub mod template;

pub use bin_hv45::*;
pub use ema_crossover::*;
pub use failure_to_return::*;
pub use ichi_v1::*;
pub use mandelbrot_fibonacci::*;
pub use markov::*;
pub use message_test::*;
pub use rsi_bollinger::*;
pub use rsi_ema50::*;
pub use template::*;
