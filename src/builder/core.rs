use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

use crate::builder::constants::{
    MAX_CANDIDATES_PER_SPAN, MAX_SEARCH_EXPONENT, MAX_WRAPPED_FACTORIAL, PAIRS_PER_BATCH,
};
use crate::expression::{
    Expression, Leaf, Operator, OperatorSet, apply_binary, apply_unary, is_integer,
};

/// An expression together with its already computed value
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub expression: Expression,
    pub value: f64,
}

impl Candidate {
    fn leaf(leaf: &Leaf) -> Self {
        Self {
            expression: Expression::Number(leaf.clone()),
            value: leaf.value as f64,
        }
    }
}

/// Enumerates binary expression trees over a fixed left-to-right leaf order
#[derive(Debug, Clone)]
pub struct ExpressionBuilder {
    operators: OperatorSet,
    max_per_span: usize,
    deadline: Option<Instant>,
}

impl ExpressionBuilder {
    pub fn new(operators: OperatorSet) -> Self {
        Self {
            operators,
            max_per_span: MAX_CANDIDATES_PER_SPAN,
            deadline: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, max_per_span: usize) -> Self {
        self.max_per_span = max_per_span;
        self
    }

    /// Stop combining once `deadline` has passed; spans built so far are kept
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// True once the deadline has passed. Output built after that point may
    /// be missing candidates.
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Every distinct expression over `leaves`, in their given order.
    ///
    /// Candidates are built bottom-up over contiguous spans: each span is
    /// split at every point and the two sides are combined with every enabled
    /// binary operator. Within a span, candidates with the same display text
    /// are kept once.
    pub fn expressions_for(&self, leaves: &[Leaf]) -> Vec<Candidate> {
        let n = leaves.len();
        if n == 0 {
            return Vec::new();
        }

        // table[start][end] holds the candidates for leaves[start..=end]
        let mut table: Vec<Vec<Vec<Candidate>>> = vec![vec![Vec::new(); n]; n];
        for (i, leaf) in leaves.iter().enumerate() {
            let mut span = SpanCollector::new(self.max_per_span);
            self.collect(&mut span, Candidate::leaf(leaf));
            table[i][i] = span.out;
        }

        for len in 2..=n {
            for start in 0..=(n - len) {
                let end = start + len - 1;
                let mut span = SpanCollector::new(self.max_per_span);

                'splits: for split in start..end {
                    let left = &table[start][split];
                    let right = &table[split + 1][end];
                    let batch_size = (PAIRS_PER_BATCH / right.len().max(1)).max(1);

                    for batch in left.chunks(batch_size) {
                        if self.expired() {
                            debug!("Deadline passed while building span {}..={}", start, end);
                            break 'splits;
                        }
                        let combined: Vec<Candidate> = batch
                            .par_iter()
                            .flat_map_iter(|l| right.iter().flat_map(move |r| self.combine(l, r)))
                            .collect();
                        for candidate in combined {
                            if !self.collect(&mut span, candidate) {
                                warn!(
                                    "Candidate limit reached ({}), skipping further expressions",
                                    self.max_per_span
                                );
                                break 'splits;
                            }
                        }
                    }
                }

                table[start][end] = span.out;
            }
        }

        let result = std::mem::take(&mut table[0][n - 1]);
        debug!("Built {} candidates over {} leaves", result.len(), n);
        result
    }

    fn combine(&self, left: &Candidate, right: &Candidate) -> Vec<Candidate> {
        let mut out = Vec::new();
        for op in self.operators.binary() {
            if is_redundant(op, left.value, right.value) {
                continue;
            }
            let Ok(value) = apply_binary(op, left.value, right.value) else {
                continue;
            };
            if let Some(expression) =
                Expression::binary(op, left.expression.clone(), right.expression.clone())
            {
                out.push(Candidate { expression, value });
            }
        }
        out
    }

    /// Add `candidate` and its unary wrappers to `span`; false once the span
    /// is full
    fn collect(&self, span: &mut SpanCollector, candidate: Candidate) -> bool {
        let wrapped = self.wrap_unary(&candidate);
        std::iter::once(candidate)
            .chain(wrapped)
            .all(|item| span.push(item))
    }

    fn wrap_unary(&self, candidate: &Candidate) -> Vec<Candidate> {
        if candidate.expression.is_unary_function() {
            return Vec::new();
        }
        self.operators
            .unary()
            .filter(|&op| worth_wrapping(op, candidate.value))
            .filter_map(|op| {
                let value = apply_unary(op, candidate.value).ok()?;
                let expression = Expression::unary(op, candidate.expression.clone())?;
                Some(Candidate { expression, value })
            })
            .collect()
    }
}

/// Candidates of one span, unique by display text
struct SpanCollector {
    seen: HashSet<String>,
    out: Vec<Candidate>,
    limit: usize,
}

impl SpanCollector {
    fn new(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            out: Vec::new(),
            limit,
        }
    }

    fn push(&mut self, candidate: Candidate) -> bool {
        if self.out.len() >= self.limit {
            return false;
        }
        if self.seen.insert(candidate.expression.to_string()) {
            self.out.push(candidate);
        }
        true
    }
}

/// Applications that only restate one of their sides
pub(crate) fn is_redundant(op: Operator, left: f64, right: f64) -> bool {
    match op {
        Operator::Add => left == 0.0 || right == 0.0,
        Operator::Mul => left == 1.0 || right == 1.0,
        Operator::Div => right == 0.0 || right == 1.0,
        Operator::Pow => right == 1.0 || right.abs() > MAX_SEARCH_EXPONENT,
        _ => false,
    }
}

fn worth_wrapping(op: Operator, value: f64) -> bool {
    if !is_integer(value) {
        return false;
    }
    match op {
        Operator::Sqrt => {
            let root = value.sqrt().round();
            value > 1.0 && root * root == value
        }
        Operator::Cbrt => {
            let root = value.cbrt().round();
            value > 1.0 && root * root * root == value
        }
        Operator::Factorial => value == 0.0 || (3.0..=MAX_WRAPPED_FACTORIAL).contains(&value),
        _ => false,
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::{is_redundant, worth_wrapping};
    use crate::expression::Operator;

    #[test]
    fn test_is_redundant() {
        assert!(is_redundant(Operator::Add, 0.0, 5.0));
        assert!(is_redundant(Operator::Mul, 5.0, 1.0));
        assert!(is_redundant(Operator::Div, 5.0, 0.0));
        assert!(is_redundant(Operator::Pow, 5.0, 11.0));
        assert!(!is_redundant(Operator::Sub, 5.0, 0.0));
        assert!(!is_redundant(Operator::Pow, 2.0, 10.0));
    }

    #[test]
    fn test_worth_wrapping() {
        assert!(worth_wrapping(Operator::Sqrt, 9.0));
        assert!(!worth_wrapping(Operator::Sqrt, 1.0));
        assert!(!worth_wrapping(Operator::Sqrt, 8.0));
        assert!(worth_wrapping(Operator::Cbrt, 27.0));
        assert!(!worth_wrapping(Operator::Cbrt, -8.0));
        assert!(worth_wrapping(Operator::Factorial, 0.0));
        assert!(!worth_wrapping(Operator::Factorial, 2.0));
        assert!(worth_wrapping(Operator::Factorial, 10.0));
        assert!(!worth_wrapping(Operator::Factorial, 11.0));
        assert!(!worth_wrapping(Operator::Factorial, 3.5));
    }
}
