//! Numble - puzzle generation and solving for "reach the target" number games
//!
//! Given a handful of operands and a target, the library finds arithmetic
//! expressions that reach the target, generates new puzzles with a witness
//! expression, and checks player submissions against the operand rules.

pub mod builder;
pub mod combinations;
pub mod expression;
pub mod game;
pub mod generator;
pub mod parser;
pub mod profiles;
pub mod solver;
pub mod utils;
pub mod validation;

// Re-export the main public API
pub use expression::{Expression, ExpressionError, Operator, OperatorSet};
pub use game::{Engine, GameError, Hints, PuzzleRound};
pub use generator::{GeneratorConfig, GeneratorError, Puzzle, PuzzleGenerator, TargetRange};
pub use parser::{EvaluationError, ParseError, evaluate};
pub use profiles::{DifficultyProfile, ProfileId, SessionStats};
pub use solver::{Solution, SolutionSet, Solver, SolverConfig, SolverError};
pub use utils::{UtilsError, parse_operands};
pub use validation::{HintSource, SubmissionError, SubmissionRules, Verdict, validate_submission};

/// Find up to three expressions over `operands` that evaluate to `target`
///
/// This is a convenience function that parses the operand list and solves it
/// with a default solver (`+ - * /`, operands used at most once each).
///
/// # Arguments
///
/// * `operands` - A digit string such as `"1234"` or a list such as `"25, 3, 7"`
/// * `target` - The value to reach
///
/// # Errors
///
/// This function will return an error if:
/// * The operand list is empty or malformed
/// * There are more operands than the solver supports
/// * The target is not finite
///
/// # Examples
///
/// ```
/// use numble::solve;
///
/// match solve("1234", 10.0) {
///     Ok(solutions) if !solutions.is_empty() => println!("Found: {}", solutions.texts()[0]),
///     Ok(_) => println!("No solution found"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn solve(operands: &str, target: f64) -> Result<SolutionSet, SolverError> {
    let operands = parse_operands(operands)?;
    utils::validate_operands(&operands)?;
    utils::validate_target(target)?;

    let solver = Solver::default();
    Ok(solver.solve(&operands, target))
}
