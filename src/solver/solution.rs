use serde::Serialize;

use crate::expression::Expression;

/// One expression reaching the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    #[serde(skip)]
    pub expression: Expression,
    pub text: String,
    pub value: f64,
}

impl Solution {
    pub fn new(expression: Expression, value: f64) -> Self {
        Self {
            text: expression.to_string(),
            expression,
            value,
        }
    }
}

/// Distinct solutions in discovery order.
///
/// `timed_out` is set when the time budget ran out before the search
/// finished; the solutions found up to then are still reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolutionSet {
    pub solutions: Vec<Solution>,
    pub timed_out: bool,
}

impl SolutionSet {
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.solutions.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.solutions.iter().any(|s| s.text == text)
    }
}

impl IntoIterator for SolutionSet {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}
