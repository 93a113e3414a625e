use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng};

use crate::expression::{
    Expression, Leaf, Operator, OperatorSet, apply_binary, apply_unary, is_integer,
};
use crate::generator::config::GeneratorConfig;
use crate::generator::constants::{
    CONCAT_PROBABILITY, MAX_GENERATED_EXPONENT, MAX_GENERATED_FACTORIAL, UNARY_PROBABILITY,
};
use crate::generator::errors::GeneratorError;
use crate::generator::puzzle::Puzzle;
use crate::utils::concat_digits;

/// Draws random operands and a random witness expression until the witness
/// lands on an acceptable target
pub struct PuzzleGenerator<R = StdRng> {
    rng: R,
}

impl PuzzleGenerator<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A generator that always produces the same sequence of puzzles
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for PuzzleGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PuzzleGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a puzzle by rejection sampling.
    ///
    /// An attempt is accepted when the witness value is a finite integer
    /// inside the target range that differs from every drawn operand.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration, or
    /// [`GeneratorError::Exhausted`] after `max_attempts` rejected attempts.
    pub fn generate(&mut self, config: &GeneratorConfig) -> Result<Puzzle, GeneratorError> {
        config.validate()?;

        for attempt in 1..=config.max_attempts {
            let operands = self.draw_operands(config);
            let used = if config.must_use_all {
                operands.len()
            } else {
                self.rng.gen_range(1..=operands.len())
            };
            let leaves: Vec<Leaf> = operands
                .iter()
                .take(used)
                .enumerate()
                .map(|(index, &value)| Leaf::new(value, index))
                .collect();

            let mut sorted = operands.clone();
            sorted.sort_unstable();

            let Some((witness, value)) = self.build(&leaves, config.operators, &sorted) else {
                continue;
            };
            let Some(target) = config.accepted_target(value, &operands) else {
                continue;
            };

            info!(
                "Generated puzzle {:?} -> {} after {} attempts",
                operands, target, attempt
            );
            return Ok(Puzzle {
                operands,
                target,
                operators: config.operators,
                must_use_all: config.must_use_all,
                witness: witness.to_string(),
            });
        }

        warn!(
            "No acceptable puzzle after {} attempts",
            config.max_attempts
        );
        Err(GeneratorError::Exhausted {
            attempts: config.max_attempts,
        })
    }

    /// Like [`generate`](Self::generate), but running out of attempts yields
    /// [`Puzzle::fallback`] instead of an error
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration, or
    /// [`GeneratorError::Exhausted`] when not even the fallback search finds
    /// a target inside the range.
    pub fn generate_or_fallback(
        &mut self,
        config: &GeneratorConfig,
    ) -> Result<Puzzle, GeneratorError> {
        match self.generate(config) {
            Err(GeneratorError::Exhausted { attempts }) => {
                warn!("Gave up after {} attempts, using fallback puzzle", attempts);
                Puzzle::fallback(config).ok_or(GeneratorError::Exhausted { attempts })
            }
            other => other,
        }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Distinct values from `0..=max_digit_value`, in random order
    fn draw_operands(&mut self, config: &GeneratorConfig) -> Vec<i64> {
        let values = usize::try_from(config.max_digit_value.saturating_add(1)).unwrap_or(0);
        let mut operands: Vec<i64> = index::sample(&mut self.rng, values, config.operand_count)
            .into_iter()
            .map(|value| value as i64)
            .collect();
        operands.shuffle(&mut self.rng);
        operands
    }

    /// Build one random expression over `leaves` in their given order
    fn build(
        &mut self,
        leaves: &[Leaf],
        operators: OperatorSet,
        sorted: &[i64],
    ) -> Option<(Expression, f64)> {
        let node = match leaves {
            [] => return None,
            [leaf] => (Expression::Number(leaf.clone()), leaf.value as f64),
            _ => match self.try_concatenate(leaves, operators, sorted) {
                Some(leaf) => {
                    let value = leaf.value as f64;
                    (Expression::Number(leaf), value)
                }
                None => self.build_binary(leaves, operators, sorted)?,
            },
        };
        Some(self.maybe_wrap(node, operators))
    }

    fn build_binary(
        &mut self,
        leaves: &[Leaf],
        operators: OperatorSet,
        sorted: &[i64],
    ) -> Option<(Expression, f64)> {
        let split = self.rng.gen_range(1..leaves.len());
        let (left, left_value) = self.build(&leaves[..split], operators, sorted)?;
        let (right, right_value) = self.build(&leaves[split..], operators, sorted)?;

        let valid: Vec<(Operator, f64)> = operators
            .binary()
            .filter(|&op| op != Operator::Pow || right_value <= MAX_GENERATED_EXPONENT)
            .filter_map(|op| {
                apply_binary(op, left_value, right_value)
                    .ok()
                    .map(|value| (op, value))
            })
            .collect();

        let &(op, value) = valid.choose(&mut self.rng)?;
        Some((Expression::binary(op, left, right)?, value))
    }

    /// Two neighbouring operands may become one leaf, when they are also
    /// neighbours in ascending order among all drawn operands
    fn try_concatenate(
        &mut self,
        leaves: &[Leaf],
        operators: OperatorSet,
        sorted: &[i64],
    ) -> Option<Leaf> {
        let [first, second] = leaves else {
            return None;
        };
        if !operators.allows_concatenation() || first.value == 0 {
            return None;
        }
        let pair = [first.value, second.value];
        if !sorted.windows(2).any(|window| window == pair) {
            return None;
        }
        if !self.rng.gen_bool(CONCAT_PROBABILITY) {
            return None;
        }
        let value = concat_digits(&[first.value, second.value]).ok()?;
        debug!("Concatenated {} and {} into {}", first.value, second.value, value);
        Some(Leaf {
            value,
            sources: first.sources.iter().chain(&second.sources).copied().collect(),
        })
    }

    fn maybe_wrap(&mut self, node: (Expression, f64), operators: OperatorSet) -> (Expression, f64) {
        let (expression, value) = node;
        if expression.is_unary_function() || !self.rng.gen_bool(UNARY_PROBABILITY) {
            return (expression, value);
        }

        let options: Vec<Operator> = operators
            .unary()
            .filter(|&op| match op {
                Operator::Sqrt => value >= 0.0,
                Operator::Factorial => {
                    is_integer(value) && (0.0..=MAX_GENERATED_FACTORIAL).contains(&value)
                }
                _ => true,
            })
            .collect();
        let Some(&op) = options.choose(&mut self.rng) else {
            return (expression, value);
        };

        match apply_unary(op, value) {
            Ok(wrapped_value) => match Expression::unary(op, expression.clone()) {
                Some(wrapped) => (wrapped, wrapped_value),
                None => (expression, value),
            },
            Err(_) => (expression, value),
        }
    }
}
