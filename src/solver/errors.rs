use thiserror::Error;

use crate::utils::UtilsError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),
    #[error("At least one solution must be requested")]
    NoSolutionsRequested,
    #[error("Invalid input: {0}")]
    Input(#[from] UtilsError),
}
