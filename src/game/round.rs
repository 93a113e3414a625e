use serde::Serialize;

use crate::generator::Puzzle;
use crate::profiles::ProfileId;
use crate::solver::{Solution, SolutionSet};

/// A freshly generated puzzle with the profile's clock and reward
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleRound {
    pub puzzle: Puzzle,
    pub profile: ProfileId,
    pub time_limit_secs: u32,
    pub base_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintOrigin {
    Solver,
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hints {
    pub solutions: Vec<Solution>,
    /// The solver ran out of time; there may be solutions it did not reach
    pub timed_out: bool,
    pub origin: HintOrigin,
}

impl Hints {
    pub fn texts(&self) -> Vec<&str> {
        self.solutions.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<SolutionSet> for Hints {
    fn from(set: SolutionSet) -> Self {
        Self {
            solutions: set.solutions,
            timed_out: set.timed_out,
            origin: HintOrigin::Solver,
        }
    }
}
