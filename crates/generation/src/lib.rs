#![warn(clippy::pedantic)]

pub mod chain;
pub mod gemini;

pub use chain::GeneratorChain;
pub use gemini::HttpGenerator;
