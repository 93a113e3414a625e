use log::debug;
use serde::{Deserialize, Serialize};

use crate::builder::is_redundant;
use crate::expression::{Expression, Leaf, Operator, OperatorSet, apply_binary};
use crate::generator::config::GeneratorConfig;
use crate::generator::constants::MAX_GENERATED_EXPONENT;
use crate::parser::{ParseError, parse_expression};

/// One round's operands, target and the expression the target was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub operands: Vec<i64>,
    pub target: i64,
    pub operators: OperatorSet,
    pub must_use_all: bool,
    pub witness: String,
}

impl Puzzle {
    /// Parse the witness back into an expression tree
    ///
    /// # Errors
    ///
    /// Returns an error if the witness text is not a valid expression over
    /// the puzzle's operators.
    pub fn witness_expression(&self) -> Result<Expression, ParseError> {
        parse_expression(&self.witness, self.operators)
    }

    /// A deterministic puzzle for `config`, used once random generation
    /// gives up.
    ///
    /// The operands are the smallest allowed values, then the largest. The
    /// witness is the first left-to-right chain of enabled binary operators
    /// whose value is an acceptable target; without `must_use_all`, shorter
    /// chains over a prefix are tried as well. Returns `None` when no chain
    /// lands inside the target range.
    pub fn fallback(config: &GeneratorConfig) -> Option<Self> {
        let count = config.operand_count;
        if count < 2 || config.validate().is_err() {
            return None;
        }
        let operators: Vec<Operator> = config.operators.binary().collect();
        let lengths: Vec<usize> = if config.must_use_all {
            vec![count]
        } else {
            (2..=count).rev().collect()
        };

        for operands in fallback_operands(config) {
            for &length in &lengths {
                let chain = Chain {
                    config,
                    operands: &operands,
                    operators: &operators,
                    length,
                };
                if let Some((witness, target)) = chain.first_acceptable() {
                    debug!("Fallback puzzle {:?} -> {} = {}", operands, witness, target);
                    return Some(Self {
                        operands,
                        target,
                        operators: config.operators,
                        must_use_all: config.must_use_all,
                        witness: witness.to_string(),
                    });
                }
            }
        }
        None
    }
}

/// `1..=n` (or `0..n` when the range is that small) and the top `n` values
fn fallback_operands(config: &GeneratorConfig) -> Vec<Vec<i64>> {
    let count = config.operand_count as i64;
    let max = config.max_digit_value;
    let low: Vec<i64> = if max >= count {
        (1..=count).collect()
    } else {
        (0..count).collect()
    };
    let high: Vec<i64> = (0..count).map(|offset| max - offset).collect();

    let mut candidates = vec![low];
    if !candidates.contains(&high) {
        candidates.push(high);
    }
    candidates
}

/// Depth-first search over `o1 op o2 op o3 ...` evaluated left to right
struct Chain<'a> {
    config: &'a GeneratorConfig,
    operands: &'a [i64],
    operators: &'a [Operator],
    length: usize,
}

impl Chain<'_> {
    fn first_acceptable(&self) -> Option<(Expression, i64)> {
        let first = *self.operands.first()?;
        self.extend(Expression::Number(Leaf::new(first, 0)), first as f64, 1)
    }

    fn extend(&self, expression: Expression, value: f64, next: usize) -> Option<(Expression, i64)> {
        if next >= self.length {
            return self
                .config
                .accepted_target(value, self.operands)
                .map(|target| (expression, target));
        }
        let operand = *self.operands.get(next)?;
        let right = operand as f64;

        for &op in self.operators {
            if is_redundant(op, value, right)
                || (op == Operator::Pow && right > MAX_GENERATED_EXPONENT)
            {
                continue;
            }
            let Ok(combined) = apply_binary(op, value, right) else {
                continue;
            };
            let Some(extended) = Expression::binary(
                op,
                expression.clone(),
                Expression::Number(Leaf::new(operand, next)),
            ) else {
                continue;
            };
            if let Some(found) = self.extend(extended, combined, next + 1) {
                return Some(found);
            }
        }
        None
    }
}
