use log::debug;
use serde::{Deserialize, Serialize};

use crate::expression::{Expression, Leaf, OperatorSet, within_tolerance};
use crate::generator::Puzzle;
use crate::parser::parse_expression;
use crate::solver::constants::DEFAULT_TOLERANCE;
use crate::validation::errors::SubmissionError;

/// The rules a submission is checked against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRules {
    pub operators: OperatorSet,
    pub must_use_all: bool,
    pub tolerance: f64,
}

impl Default for SubmissionRules {
    fn default() -> Self {
        Self {
            operators: OperatorSet::basic(),
            must_use_all: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SubmissionRules {
    pub fn for_puzzle(puzzle: &Puzzle) -> Self {
        Self {
            operators: puzzle.operators,
            must_use_all: puzzle.must_use_all,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    /// True when the value is within tolerance of the target
    pub valid: bool,
    pub value: f64,
}

/// Check a player's expression against the puzzle operands and target.
///
/// A well-formed expression that respects the operand rules always yields a
/// [`Verdict`]; it is `valid` only when the value matches the target.
///
/// # Errors
///
/// Returns an error if the text does not parse under `rules.operators`, fails
/// to evaluate, uses a number that is not available, uses one more often
/// than it is available, or leaves numbers unused under `must_use_all`.
pub fn validate_submission(
    text: &str,
    operands: &[i64],
    target: f64,
    rules: &SubmissionRules,
) -> Result<Verdict, SubmissionError> {
    check_submission(text, operands, target, rules).map(|(_, verdict)| verdict)
}

/// Like [`validate_submission`], also returning the parsed expression with
/// its leaves attached to the operand instances they consume
pub(crate) fn check_submission(
    text: &str,
    operands: &[i64],
    target: f64,
    rules: &SubmissionRules,
) -> Result<(Expression, Verdict), SubmissionError> {
    let mut expression = parse_expression(text, rules.operators)?;
    let value = expression.evaluate()?;

    let mut literals = Vec::new();
    collect_literals(&expression, false, &mut literals);
    let concatenation = rules.operators.allows_concatenation();
    let assignment = assign_operands(&literals, operands, concatenation)?;

    let used: usize = assignment.iter().map(|spelling| spelling.sources.len()).sum();
    if rules.must_use_all && used < operands.len() {
        return Err(SubmissionError::NotAllOperandsUsed {
            used,
            available: operands.len(),
        });
    }
    attach_sources(&mut expression, &mut assignment.into_iter());

    let valid = within_tolerance(value, target, rules.tolerance);
    debug!("Submission {:?} = {} (valid: {})", text, value, valid);
    Ok((expression, Verdict { valid, value }))
}

/// A number as written, and whether a minus sign applies to it directly
#[derive(Debug, Clone, Copy)]
struct Literal {
    value: i64,
    negated: bool,
}

/// Operand instances standing for one literal, and the value they spell
#[derive(Debug, Clone)]
struct Spelling {
    sources: Vec<usize>,
    value: i64,
}

fn collect_literals(expression: &Expression, negated: bool, out: &mut Vec<Literal>) {
    match expression {
        Expression::Number(leaf) => out.push(Literal {
            value: leaf.value,
            negated,
        }),
        Expression::Add(l, r)
        | Expression::Sub(l, r)
        | Expression::Mul(l, r)
        | Expression::Div(l, r)
        | Expression::Pow(l, r) => {
            collect_literals(l, false, out);
            collect_literals(r, false, out);
        }
        Expression::Neg(e) => collect_literals(e, true, out),
        Expression::Sqrt(e) | Expression::Cbrt(e) | Expression::Factorial(e) => {
            collect_literals(e, false, out)
        }
    }
}

/// Match every literal, in written order, to operand instances.
///
/// A literal takes one instance of the same value, or with concatenation
/// enabled, a run of instances whose digits spell it. A literal right after
/// a minus sign may also take a negative instance. Returns the spelling
/// chosen for each literal.
fn assign_operands(
    literals: &[Literal],
    operands: &[i64],
    concatenation: bool,
) -> Result<Vec<Spelling>, SubmissionError> {
    let fresh = vec![false; operands.len()];
    for &literal in literals {
        let mut used = fresh.clone();
        if spellings(literal, operands, &mut used, concatenation).is_empty() {
            return Err(SubmissionError::UnknownOperand(literal.value));
        }
    }

    let mut used = fresh;
    let mut assignment = Vec::with_capacity(literals.len());
    if assign_from(literals, operands, &mut used, concatenation, &mut assignment) {
        return Ok(assignment);
    }

    // report the first literal a greedy pass cannot place
    let mut used = vec![false; operands.len()];
    let culprit = literals.iter().copied().find(|&literal| {
        match spellings(literal, operands, &mut used, concatenation).first() {
            Some(spelling) => {
                spelling.sources.iter().for_each(|&i| used[i] = true);
                false
            }
            None => true,
        }
    });
    Err(SubmissionError::OperandReused(
        culprit
            .or(literals.last().copied())
            .map(|literal| literal.value)
            .unwrap_or_default(),
    ))
}

fn assign_from(
    literals: &[Literal],
    operands: &[i64],
    used: &mut [bool],
    concatenation: bool,
    assignment: &mut Vec<Spelling>,
) -> bool {
    let Some((&literal, rest)) = literals.split_first() else {
        return true;
    };
    for spelling in spellings(literal, operands, used, concatenation) {
        spelling.sources.iter().for_each(|&i| used[i] = true);
        assignment.push(spelling);
        if assign_from(rest, operands, used, concatenation, assignment) {
            return true;
        }
        if let Some(spelling) = assignment.pop() {
            spelling.sources.iter().for_each(|&i| used[i] = false);
        }
    }
    false
}

/// Every way of forming `literal` from unused instances: a negative instance
/// when the literal is negated, a single instance, then concatenations of two
/// or more instances
fn spellings(
    literal: Literal,
    operands: &[i64],
    used: &mut [bool],
    concatenation: bool,
) -> Vec<Spelling> {
    let mut out = Vec::new();
    if literal.negated
        && literal.value != 0
        && let Some(index) = first_unused(-literal.value, operands, used)
    {
        out.push(Spelling {
            sources: vec![index],
            value: -literal.value,
        });
    }
    if let Some(index) = first_unused(literal.value, operands, used) {
        out.push(Spelling {
            sources: vec![index],
            value: literal.value,
        });
    }
    if concatenation && literal.value >= 0 {
        let mut pieces = Vec::new();
        let mut runs = Vec::new();
        spell_digits(&literal.value.to_string(), operands, used, &mut pieces, &mut runs);
        out.extend(runs.into_iter().map(|sources| Spelling {
            sources,
            value: literal.value,
        }));
    }
    out
}

fn first_unused(value: i64, operands: &[i64], used: &[bool]) -> Option<usize> {
    operands
        .iter()
        .zip(used)
        .position(|(&operand, &taken)| operand == value && !taken)
}

fn spell_digits(
    digits: &str,
    operands: &[i64],
    used: &mut [bool],
    pieces: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if digits.is_empty() {
        if pieces.len() >= 2 {
            out.push(pieces.clone());
        }
        return;
    }
    for split in 1..=digits.len() {
        let (head, tail) = digits.split_at(split);
        // a piece keeps its own decimal form, so "05" is never an operand
        if head.len() > 1 && head.starts_with('0') {
            break;
        }
        let Ok(value) = head.parse::<i64>() else {
            break;
        };
        let Some(index) = first_unused(value, operands, used) else {
            continue;
        };
        used[index] = true;
        pieces.push(index);
        spell_digits(tail, operands, used, pieces, out);
        pieces.pop();
        used[index] = false;
    }
}

/// Record the chosen instances on each leaf. A negated literal that took a
/// negative instance becomes that negative literal.
fn attach_sources(expression: &mut Expression, assignment: &mut impl Iterator<Item = Spelling>) {
    if let Expression::Neg(inner) = expression
        && let Expression::Number(leaf) = inner.as_mut()
    {
        let Some(spelling) = assignment.next() else {
            return;
        };
        if spelling.value == leaf.value {
            leaf.sources = spelling.sources;
        } else {
            *expression = Expression::Number(Leaf {
                value: spelling.value,
                sources: spelling.sources,
            });
        }
        return;
    }

    match expression {
        Expression::Number(leaf) => {
            if let Some(spelling) = assignment.next() {
                leaf.sources = spelling.sources;
            }
        }
        Expression::Add(l, r)
        | Expression::Sub(l, r)
        | Expression::Mul(l, r)
        | Expression::Div(l, r)
        | Expression::Pow(l, r) => {
            attach_sources(l, assignment);
            attach_sources(r, assignment);
        }
        Expression::Neg(e)
        | Expression::Sqrt(e)
        | Expression::Cbrt(e)
        | Expression::Factorial(e) => attach_sources(e, assignment),
    }
}
