//! Checking player submissions and untrusted external solutions

pub mod constants;
mod errors;
mod external;
mod submission;

pub use errors::{ExternalError, SubmissionError};
pub use external::{
    ExternalPuzzle, HintSource, extract_block, parse_puzzle_block, parse_solution_block,
    puzzle_from_response, validate_candidates,
};
pub use submission::{SubmissionRules, Verdict, validate_submission};

#[cfg(test)]
mod tests;
