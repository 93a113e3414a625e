//! Random puzzle generation with a witness expression for every target

mod config;
pub mod constants;
mod core;
mod errors;
mod puzzle;

pub use config::{GeneratorConfig, TargetRange};
pub use core::PuzzleGenerator;
pub use errors::GeneratorError;
pub use puzzle::Puzzle;
