//! Solver: drives the combination generator and tree builder against a
//! target, collecting a bounded number of distinct solutions

mod cache;
mod config;
pub mod constants;
mod core;
mod errors;
mod solution;

pub use cache::{CacheKey, SolutionCache};
pub use config::SolverConfig;
pub use core::Solver;
pub use errors::SolverError;
pub use solution::{Solution, SolutionSet};

#[cfg(test)]
mod tests;
