use std::time::Duration;

use crate::expression::OperatorSet;
use crate::solver::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_SOLUTIONS, DEFAULT_TIME_BUDGET_MS, DEFAULT_TOLERANCE,
};
use crate::solver::errors::SolverError;

/// Runtime configuration for [`Solver`](crate::solver::Solver)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Operators used by [`Solver::solve`](crate::solver::Solver::solve)
    pub operators: OperatorSet,
    pub tolerance: f64,
    pub max_solutions: usize,
    /// Wall-clock budget for one uncached search
    pub time_budget: Duration,
    pub must_use_all: bool,
    /// Number of solved puzzles remembered; zero disables the cache
    pub cache_capacity: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            operators: OperatorSet::basic(),
            tolerance: DEFAULT_TOLERANCE,
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            time_budget: Duration::from_millis(DEFAULT_TIME_BUDGET_MS),
            must_use_all: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn with_operators(mut self, operators: OperatorSet) -> Self {
        self.operators = operators;
        self
    }

    #[must_use]
    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    #[must_use]
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    #[must_use]
    pub fn must_use_all(mut self, must_use_all: bool) -> Self {
        self.must_use_all = must_use_all;
        self
    }

    /// # Errors
    ///
    /// Returns an error for a non-positive tolerance or when no solutions
    /// are requested.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidTolerance(self.tolerance));
        }
        if self.max_solutions == 0 {
            return Err(SolverError::NoSolutionsRequested);
        }
        Ok(())
    }
}
