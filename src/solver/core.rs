use log::{debug, info, warn};
use std::collections::HashSet;
use std::time::Instant;

use crate::builder::ExpressionBuilder;
use crate::combinations::{CombinationGenerator, can_reach};
use crate::expression::{OperatorSet, within_tolerance};
use crate::generator::Puzzle;
use crate::solver::cache::{CacheKey, SolutionCache};
use crate::solver::config::SolverConfig;
use crate::solver::errors::SolverError;
use crate::solver::solution::{Solution, SolutionSet};
use crate::utils::MAX_OPERANDS;

/// Finds expressions over a multiset of operands that reach a target
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    cache: SolutionCache,
}

impl Solver {
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self {
            cache: SolutionCache::new(config.cache_capacity),
            config,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &SolutionCache {
        &self.cache
    }

    /// Solve with the configured operator set and must-use-all flag
    pub fn solve(&self, operands: &[i64], target: f64) -> SolutionSet {
        self.solve_with(
            operands,
            target,
            self.config.operators,
            self.config.must_use_all,
        )
    }

    /// Solve a generated puzzle under its own rules
    pub fn solve_puzzle(&self, puzzle: &Puzzle) -> SolutionSet {
        self.solve_with(
            &puzzle.operands,
            puzzle.target as f64,
            puzzle.operators,
            puzzle.must_use_all,
        )
    }

    /// Up to `max_solutions` distinct expressions equal to `target`.
    ///
    /// Unsolvable or malformed input gives an empty set rather than an error.
    pub fn solve_with(
        &self,
        operands: &[i64],
        target: f64,
        operators: OperatorSet,
        must_use_all: bool,
    ) -> SolutionSet {
        if operands.is_empty() || !target.is_finite() {
            debug!("Nothing to solve for {:?} -> {}", operands, target);
            return SolutionSet::default();
        }
        if operands.len() > MAX_OPERANDS {
            warn!(
                "Refusing to solve {} operands (limit {})",
                operands.len(),
                MAX_OPERANDS
            );
            return SolutionSet::default();
        }
        if !can_reach(operands.iter().copied(), target, operators) {
            info!("Target {} is out of reach of {:?}", target, operands);
            return SolutionSet::default();
        }

        let key = CacheKey::new(operands, target, operators, must_use_all);
        if let Some(hit) = self.cache.get(&key) {
            debug!("Cache hit for {:?} -> {}", operands, target);
            return hit;
        }

        let result = self.search(operands, target, operators, must_use_all);
        if result.timed_out {
            warn!(
                "Time budget of {:?} exhausted with {} solutions",
                self.config.time_budget,
                result.len()
            );
        } else {
            self.cache.insert(key, result.clone());
        }
        result
    }

    fn search(
        &self,
        operands: &[i64],
        target: f64,
        operators: OperatorSet,
        must_use_all: bool,
    ) -> SolutionSet {
        info!(
            "Searching for {} using {:?} with operators {}",
            target, operands, operators
        );

        let deadline = Instant::now() + self.config.time_budget;
        let mut groupings = CombinationGenerator::new(operators)
            .require_all(must_use_all)
            .combinations(operands, target);
        // fewer terms first
        groupings.sort_by_key(|grouping| grouping.len());

        let builder = ExpressionBuilder::new(operators).with_deadline(deadline);
        let mut found = SolutionSet::default();
        let mut seen = HashSet::new();

        for grouping in &groupings {
            for ordering in grouping.orderings() {
                if Instant::now() >= deadline {
                    found.timed_out = true;
                    return found;
                }

                let candidates = builder.expressions_for(&ordering);
                // the builder stops at the deadline, so this ordering may be partial
                let cut_short = builder.expired();

                for candidate in candidates {
                    if !within_tolerance(candidate.value, target, self.config.tolerance) {
                        continue;
                    }
                    let solution = Solution::new(candidate.expression, candidate.value);
                    if !seen.insert(solution.text.clone()) {
                        continue;
                    }
                    debug!("Found solution: {}", solution.text);
                    found.solutions.push(solution);
                    if found.len() >= self.config.max_solutions {
                        info!("Collected {} solutions", found.len());
                        found.timed_out = cut_short;
                        return found;
                    }
                }
                if cut_short {
                    found.timed_out = true;
                    return found;
                }
            }
        }

        info!("Search finished with {} solutions", found.len());
        found
    }
}

impl Default for Solver {
    fn default() -> Self {
        let config = SolverConfig::default();
        Self {
            cache: SolutionCache::new(config.cache_capacity),
            config,
        }
    }
}
