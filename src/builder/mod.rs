//! Builds every distinct expression tree over an ordered grouping of leaves

pub mod constants;
mod core;

pub use core::{Candidate, ExpressionBuilder};
pub(crate) use core::is_redundant;

#[cfg(test)]
mod tests;
