use log::{debug, info, warn};
use std::collections::HashSet;

use crate::combinations::constants::MAX_GROUPINGS;
use crate::combinations::feasibility::can_reach;
use crate::combinations::grouping::{Grouping, sorted_values};
use crate::expression::{Leaf, OperatorSet};
use crate::utils::{concat_digits, digit_count};

/// Enumerates the operand groupings an expression search should try
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    operators: OperatorSet,
    require_all: bool,
    max_groupings: usize,
}

impl CombinationGenerator {
    pub fn new(operators: OperatorSet) -> Self {
        Self {
            operators,
            require_all: false,
            max_groupings: MAX_GROUPINGS,
        }
    }

    /// Only emit groupings that consume every operand instance
    #[must_use]
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, max_groupings: usize) -> Self {
        self.max_groupings = max_groupings;
        self
    }

    /// Enumerate groupings of `operands` that might evaluate to `target`.
    ///
    /// Operands are sorted by value first; when concatenation is enabled, runs
    /// of neighbours in that order may merge into one multi-digit leaf. Each
    /// multiset of leaves is emitted at most once, and branches whose
    /// remaining material cannot reach `target` are cut.
    pub fn combinations(&self, operands: &[i64], target: f64) -> Vec<Grouping> {
        let mut instances: Vec<Leaf> = operands
            .iter()
            .enumerate()
            .map(|(index, &value)| Leaf::new(value, index))
            .collect();
        instances.sort_by_key(|leaf| leaf.value);

        let target_digits = if target.is_finite() {
            digit_count(target.abs().round() as i64)
        } else {
            0
        };

        let mut search = Search {
            generator: self,
            target,
            max_digits: target_digits + 1,
            visited: HashSet::new(),
            emitted: HashSet::new(),
            out: Vec::new(),
            exhausted: false,
        };

        let mut current = Vec::with_capacity(instances.len());
        search.visit(&mut current, &instances);

        info!(
            "Enumerated {} groupings of {:?} for target {}",
            search.out.len(),
            operands,
            target
        );
        search.out
    }
}

struct Search<'a> {
    generator: &'a CombinationGenerator,
    target: f64,
    max_digits: usize,
    visited: HashSet<(Vec<i64>, Vec<i64>)>,
    emitted: HashSet<Vec<i64>>,
    out: Vec<Grouping>,
    exhausted: bool,
}

impl Search<'_> {
    fn visit(&mut self, current: &mut Vec<Leaf>, remaining: &[Leaf]) {
        if self.exhausted {
            return;
        }

        let state = (sorted_values(current), sorted_values(remaining));
        if !self.visited.insert(state) {
            return;
        }

        let operators = self.generator.operators;
        let everything = current.iter().chain(remaining).map(|leaf| leaf.value);
        if !can_reach(everything, self.target, operators) {
            debug!("Pruned branch {:?} + {:?}", current, remaining);
            return;
        }

        let complete = !self.generator.require_all || remaining.is_empty();
        if !current.is_empty()
            && complete
            && can_reach(current.iter().map(|leaf| leaf.value), self.target, operators)
            && self.emitted.insert(sorted_values(current))
        {
            self.out.push(Grouping::new(current.clone()));
            if self.out.len() >= self.generator.max_groupings {
                warn!(
                    "Grouping limit reached ({}), skipping further groupings",
                    self.generator.max_groupings
                );
                self.exhausted = true;
                return;
            }
        }

        for i in 0..remaining.len() {
            if i > 0 && remaining[i].value == remaining[i - 1].value {
                continue;
            }

            let mut rest = remaining.to_vec();
            let leaf = rest.remove(i);
            current.push(leaf);
            self.visit(current, &rest);
            current.pop();

            if operators.allows_concatenation() {
                self.visit_concatenations(current, remaining, i);
            }
        }
    }

    /// Try merging the run `remaining[start..end]` for every `end` past the
    /// next neighbour, stopping at the first run that cannot be merged
    fn visit_concatenations(&mut self, current: &mut Vec<Leaf>, remaining: &[Leaf], start: usize) {
        for end in (start + 2)..=remaining.len() {
            let run = &remaining[start..end];
            let values: Vec<i64> = run.iter().map(|leaf| leaf.value).collect();
            let value = match concat_digits(&values) {
                Ok(value) if digit_count(value) <= self.max_digits => value,
                _ => break,
            };

            let merged = Leaf {
                value,
                sources: run.iter().flat_map(|leaf| leaf.sources.iter().copied()).collect(),
            };
            let rest: Vec<Leaf> = remaining[..start]
                .iter()
                .chain(&remaining[end..])
                .cloned()
                .collect();

            current.push(merged);
            self.visit(current, &rest);
            current.pop();
        }
    }
}
