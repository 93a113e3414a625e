use log::{debug, warn};
use std::collections::HashSet;

use crate::generator::Puzzle;
use crate::solver::Solution;
use crate::validation::constants::{
    MIN_SEPARATOR_DASHES, NUMBER_END, NUMBER_START, SOLUTION_END, SOLUTION_START, TARGET_END,
    TARGET_START,
};
use crate::validation::errors::ExternalError;
use crate::validation::submission::{SubmissionRules, check_submission};

/// A generative text service that proposes solutions.
///
/// Its output is untrusted: candidates are only ever used after passing
/// submission validation.
pub trait HintSource {
    /// Raw response text for reaching `target` with `operands`
    ///
    /// # Errors
    ///
    /// Returns an error when the service cannot be reached or refuses.
    fn request_solutions(&self, operands: &[i64], target: i64) -> Result<String, ExternalError>;
}

/// Operands, target and proposed solutions parsed from a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPuzzle {
    pub operands: Vec<i64>,
    pub target: i64,
    pub candidates: Vec<String>,
}

/// The text between `start` and the following `end` marker
pub fn extract_block<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let (_, after) = text.split_once(start)?;
    let (inner, _) = after.split_once(end)?;
    Some(inner)
}

/// Candidate expressions of the `SOLUTION_START` block, one per non-empty line
///
/// # Errors
///
/// Returns an error if the block is missing.
pub fn parse_solution_block(text: &str) -> Result<Vec<String>, ExternalError> {
    let block = extract_block(text, SOLUTION_START, SOLUTION_END)
        .ok_or(ExternalError::MissingBlock(SOLUTION_START))?;
    Ok(block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.contains(NUMBER_START) && !line.contains(TARGET_START))
        .map(str::to_string)
        .collect())
}

/// Parse the first puzzle of a response made of number, target and solution
/// blocks
///
/// # Errors
///
/// Returns an error if a block is missing, the target is not an integer, or
/// the number or solution block is empty.
pub fn parse_puzzle_block(text: &str) -> Result<ExternalPuzzle, ExternalError> {
    let first = first_section(text);

    let numbers = extract_block(first, NUMBER_START, NUMBER_END)
        .ok_or(ExternalError::MissingBlock(NUMBER_START))?;
    let operands: Vec<i64> = numbers
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect();
    if operands.is_empty() {
        return Err(ExternalError::Malformed("no numbers".to_string()));
    }

    let target_text = extract_block(first, TARGET_START, TARGET_END)
        .ok_or(ExternalError::MissingBlock(TARGET_START))?
        .trim();
    let target = target_text
        .parse()
        .map_err(|_| ExternalError::Malformed(format!("target {:?}", target_text)))?;

    let candidates = parse_solution_block(first)?;
    if candidates.is_empty() {
        return Err(ExternalError::Malformed("no solutions".to_string()));
    }

    Ok(ExternalPuzzle {
        operands,
        target,
        candidates,
    })
}

/// Everything before the first separator line of dashes
fn first_section(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.len() >= MIN_SEPARATOR_DASHES && trimmed.chars().all(|c| c == '-') {
            return &text[..offset];
        }
        offset += line.len();
    }
    text
}

/// Candidates that pass submission validation, deduplicated by their
/// canonical form, at most `limit` of them
pub fn validate_candidates(
    candidates: &[String],
    operands: &[i64],
    target: f64,
    rules: &SubmissionRules,
    limit: usize,
) -> Vec<Solution> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for candidate in candidates {
        if out.len() >= limit {
            break;
        }
        match check_submission(candidate, operands, target, rules) {
            Ok((expression, verdict)) if verdict.valid => {
                let solution = Solution::new(expression, verdict.value);
                if seen.insert(solution.text.clone()) {
                    out.push(solution);
                }
            }
            Ok((_, verdict)) => {
                debug!("Discarding {:?}: evaluates to {}", candidate, verdict.value);
            }
            Err(e) => debug!("Discarding {:?}: {}", candidate, e),
        }
    }
    out
}

/// Turn a puzzle response into a [`Puzzle`] whose witness is the first
/// candidate that validates, plus every validated candidate
///
/// # Errors
///
/// Returns an error if the response cannot be parsed or no candidate is a
/// valid solution under `rules`.
pub fn puzzle_from_response(
    text: &str,
    rules: &SubmissionRules,
    limit: usize,
) -> Result<(Puzzle, Vec<Solution>), ExternalError> {
    let parsed = parse_puzzle_block(text)?;
    let solutions = validate_candidates(
        &parsed.candidates,
        &parsed.operands,
        parsed.target as f64,
        rules,
        limit,
    );
    let Some(witness) = solutions.first().map(|s| s.text.clone()) else {
        warn!(
            "Rejected external puzzle {:?} -> {}: no valid solution",
            parsed.operands, parsed.target
        );
        return Err(ExternalError::NoValidCandidates);
    };

    let puzzle = Puzzle {
        operands: parsed.operands,
        target: parsed.target,
        operators: rules.operators,
        must_use_all: rules.must_use_all,
        witness,
    };
    Ok((puzzle, solutions))
}
