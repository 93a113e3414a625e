use thiserror::Error;

use crate::generator::GeneratorError;
use crate::profiles::ProfileError;
use crate::solver::SolverError;
use crate::validation::SubmissionError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
    #[error("Puzzle generation failed: {0}")]
    Generator(#[from] GeneratorError),
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
    #[error("Submission rejected: {0}")]
    Submission(#[from] SubmissionError),
}
