use log::{debug, info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::game::errors::GameError;
use crate::game::round::{HintOrigin, Hints, PuzzleRound};
use crate::generator::{Puzzle, PuzzleGenerator};
use crate::profiles::{DifficultyProfile, difficulty_profiles, find_profile};
use crate::solver::{Solver, SolverConfig};
use crate::validation::{
    HintSource, SubmissionError, SubmissionRules, Verdict, parse_solution_block,
    validate_candidates,
};

/// The game-facing operations: new puzzles, hints, submission checks and the
/// profile catalogue
pub struct Engine<R = StdRng> {
    generator: PuzzleGenerator<R>,
    solver: Solver,
}

impl Engine<StdRng> {
    pub fn new() -> Self {
        Self::with_parts(PuzzleGenerator::new(), Solver::default())
    }

    /// An engine whose puzzles are reproducible
    pub fn seeded(seed: u64) -> Self {
        Self::with_parts(PuzzleGenerator::seeded(seed), Solver::default())
    }
}

impl Default for Engine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_parts(generator: PuzzleGenerator<R>, solver: Solver) -> Self {
        Self { generator, solver }
    }

    /// # Errors
    ///
    /// Returns an error if the solver configuration is invalid.
    pub fn with_solver_config(
        generator: PuzzleGenerator<R>,
        config: SolverConfig,
    ) -> Result<Self, GameError> {
        Ok(Self::with_parts(generator, Solver::new(config)?))
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// A new puzzle for the named built-in profile
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown profile name.
    pub fn request_new_puzzle(&mut self, profile_id: &str) -> Result<PuzzleRound, GameError> {
        let profile = find_profile(profile_id)?;
        self.request_new_puzzle_with(&profile)
    }

    /// A new puzzle for any profile, such as a custom or session-adjusted
    /// one. The operand count is drawn from the profile's range.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot produce puzzles at all.
    pub fn request_new_puzzle_with(
        &mut self,
        profile: &DifficultyProfile,
    ) -> Result<PuzzleRound, GameError> {
        profile.validate()?;
        let operand_count = self
            .generator
            .rng_mut()
            .gen_range(profile.min_operands..=profile.max_operands);
        let config = profile.generator_config(operand_count);
        let puzzle = self.generator.generate_or_fallback(&config)?;

        info!(
            "New {} puzzle: {:?} -> {}",
            profile.id, puzzle.operands, puzzle.target
        );
        Ok(PuzzleRound {
            puzzle,
            profile: profile.id,
            time_limit_secs: profile.time_limit_secs,
            base_score: profile.base_score,
        })
    }

    /// Solutions under the solver's default rules
    pub fn request_hints(&self, operands: &[i64], target: i64) -> Hints {
        self.solver.solve(operands, target as f64).into()
    }

    /// Solutions under the puzzle's own operators and must-use-all rule
    pub fn request_hints_for(&self, puzzle: &Puzzle) -> Hints {
        self.solver.solve_puzzle(puzzle).into()
    }

    /// Ask an external source first and keep only candidates that validate;
    /// any failure, or nothing valid, falls back to the solver
    pub fn request_hints_from(
        &self,
        source: &dyn HintSource,
        operands: &[i64],
        target: i64,
    ) -> Hints {
        let config = self.solver.config();
        let rules = SubmissionRules {
            operators: config.operators,
            must_use_all: config.must_use_all,
            tolerance: config.tolerance,
        };

        let external = source
            .request_solutions(operands, target)
            .and_then(|text| parse_solution_block(&text));

        match external {
            Ok(candidates) => {
                let solutions = validate_candidates(
                    &candidates,
                    operands,
                    target as f64,
                    &rules,
                    config.max_solutions,
                );
                if !solutions.is_empty() {
                    debug!("Using {} external hints", solutions.len());
                    return Hints {
                        solutions,
                        timed_out: false,
                        origin: HintOrigin::External,
                    };
                }
                warn!("No external hint survived validation, using the solver");
            }
            Err(e) => warn!("External hints unavailable ({}), using the solver", e),
        }
        self.request_hints(operands, target)
    }

    /// # Errors
    ///
    /// Returns the reason a submission breaks the rules; a well-formed
    /// submission with the wrong value is a [`Verdict`] with `valid: false`.
    pub fn validate_submission(
        &self,
        text: &str,
        operands: &[i64],
        target: i64,
        rules: &SubmissionRules,
    ) -> Result<Verdict, SubmissionError> {
        crate::validation::validate_submission(text, operands, target as f64, rules)
    }

    pub fn list_difficulty_profiles(&self) -> Vec<DifficultyProfile> {
        difficulty_profiles()
    }
}
