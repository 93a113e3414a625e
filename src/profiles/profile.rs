use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::expression::OperatorSet;
use crate::generator::{GeneratorConfig, TargetRange};
use crate::profiles::constants::{
    HIGH_WIN_RATE, LOW_WIN_RATE, MAX_ADJUSTED_TARGET, MAX_TIME_LIMIT_SECS,
    MIN_ADJUSTED_TARGET, MIN_GAMES_FOR_ADJUSTMENT, MIN_TIME_LIMIT_SECS, TARGET_GROWTH,
    TARGET_SHRINK, TIME_GROWTH, TIME_SHRINK,
};
use crate::profiles::errors::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileId {
    Newton,
    Euler,
    Gauss,
    Fibonacci,
    Custom,
}

impl ProfileId {
    pub const ALL: [ProfileId; 5] = [
        ProfileId::Newton,
        ProfileId::Euler,
        ProfileId::Gauss,
        ProfileId::Fibonacci,
        ProfileId::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileId::Newton => "NEWTON",
            ProfileId::Euler => "EULER",
            ProfileId::Gauss => "GAUSS",
            ProfileId::Fibonacci => "FIBONACCI",
            ProfileId::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProfileId {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProfileId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ProfileError::UnknownProfile(wanted.to_string()))
    }
}

/// Games played and won in the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub games_played: u32,
    pub games_won: u32,
}

impl SessionStats {
    pub fn new(games_played: u32, games_won: u32) -> Self {
        Self {
            games_played,
            games_won: games_won.min(games_played),
        }
    }

    pub fn record(&mut self, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played)
        }
    }
}

/// A difficulty tier: which operators are allowed, how many operands are
/// drawn, and what the player gets for solving it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub id: ProfileId,
    pub name: String,
    pub scientist: String,
    pub description: String,
    pub operators: OperatorSet,
    pub min_operands: usize,
    pub max_operands: usize,
    pub target_range: TargetRange,
    pub time_limit_secs: u32,
    pub base_score: u32,
    pub must_use_all: bool,
}

impl DifficultyProfile {
    /// # Errors
    ///
    /// Returns an error if the operand range is empty or starts at zero.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.min_operands == 0 || self.min_operands > self.max_operands {
            return Err(ProfileError::InvalidOperandRange {
                min: self.min_operands,
                max: self.max_operands,
            });
        }
        Ok(())
    }

    pub fn generator_config(&self, operand_count: usize) -> GeneratorConfig {
        GeneratorConfig {
            operand_count,
            operators: self.operators,
            target_range: self.target_range,
            must_use_all: self.must_use_all,
            ..GeneratorConfig::default()
        }
    }

    /// The profile tuned to how the session is going: after a few games a
    /// high win rate raises the target ceiling and shortens the clock, a low
    /// one does the opposite
    #[must_use]
    pub fn adjusted_for(&self, stats: &SessionStats) -> Self {
        let mut adjusted = self.clone();
        if stats.games_played < MIN_GAMES_FOR_ADJUSTMENT {
            return adjusted;
        }

        let win_rate = stats.win_rate();
        let max = self.target_range.max as f64;
        let time = f64::from(self.time_limit_secs);

        if win_rate > HIGH_WIN_RATE {
            adjusted.target_range.max = ((max * TARGET_GROWTH).round() as i64)
                .min(MAX_ADJUSTED_TARGET);
            adjusted.time_limit_secs =
                ((time * TIME_SHRINK).round() as u32).max(MIN_TIME_LIMIT_SECS);
        } else if win_rate < LOW_WIN_RATE {
            adjusted.target_range.max = ((max * TARGET_SHRINK).round() as i64)
                .max(MIN_ADJUSTED_TARGET)
                .max(self.target_range.min);
            adjusted.time_limit_secs =
                ((time * TIME_GROWTH).round() as u32).min(MAX_TIME_LIMIT_SECS);
        }

        debug!(
            "Adjusted {} for win rate {:.2}: targets {}..={}, {} s",
            self.id,
            win_rate,
            adjusted.target_range.min,
            adjusted.target_range.max,
            adjusted.time_limit_secs
        );
        adjusted
    }
}
