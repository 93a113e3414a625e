//! Operand combination generator: which operands, in which groupings, an
//! expression search should consider

pub mod constants;
mod core;
mod feasibility;
mod grouping;

pub use core::CombinationGenerator;
pub use feasibility::{can_reach, concatenation_bound, magnitude_bound};
pub use grouping::{Grouping, Orderings};

#[cfg(test)]
mod tests;
