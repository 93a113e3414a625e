use crate::expression::{Operator, OperatorSet};
use crate::generator::TargetRange;
use crate::profiles::errors::ProfileError;
use crate::profiles::profile::{DifficultyProfile, ProfileId};

#[allow(clippy::too_many_arguments)]
fn profile(
    id: ProfileId,
    name: &str,
    scientist: &str,
    description: &str,
    operators: OperatorSet,
    operands: (usize, usize),
    targets: (i64, i64),
    time_limit_secs: u32,
    base_score: u32,
    must_use_all: bool,
) -> DifficultyProfile {
    DifficultyProfile {
        id,
        name: name.to_string(),
        scientist: scientist.to_string(),
        description: description.to_string(),
        operators,
        min_operands: operands.0,
        max_operands: operands.1,
        target_range: TargetRange::new(targets.0, targets.1),
        time_limit_secs,
        base_score,
        must_use_all,
    }
}

/// Every built-in difficulty profile, easiest first
pub fn difficulty_profiles() -> Vec<DifficultyProfile> {
    let euler = OperatorSet::basic()
        .with(Operator::Pow)
        .with(Operator::Sqrt);

    vec![
        profile(
            ProfileId::Newton,
            "Newton's Basics",
            "Isaac Newton",
            "Simple arithmetic operations",
            OperatorSet::basic(),
            (3, 4),
            (10, 50),
            120,
            100,
            false,
        ),
        profile(
            ProfileId::Euler,
            "Euler's Expressions",
            "Leonhard Euler",
            "Powers and roots join the party",
            euler,
            (3, 5),
            (20, 100),
            150,
            150,
            false,
        ),
        profile(
            ProfileId::Gauss,
            "Gauss's Challenge",
            "Carl Friedrich Gauss",
            "Factorials and complex combinations",
            OperatorSet::scientific(),
            (4, 5),
            (50, 200),
            180,
            200,
            false,
        ),
        profile(
            ProfileId::Fibonacci,
            "Fibonacci's Quest",
            "Leonardo Fibonacci",
            "Use all numbers in elegant sequences",
            OperatorSet::scientific(),
            (4, 6),
            (100, 400),
            240,
            300,
            true,
        ),
        profile(
            ProfileId::Custom,
            "Custom Challenge",
            "Your Rules",
            "Create your own difficulty",
            OperatorSet::scientific(),
            (3, 6),
            (10, 500),
            180,
            100,
            false,
        ),
    ]
}

pub fn profile_by_id(id: ProfileId) -> Option<DifficultyProfile> {
    difficulty_profiles().into_iter().find(|p| p.id == id)
}

/// Look a profile up by its case-insensitive name, such as `"newton"`
///
/// # Errors
///
/// Returns an error if no profile has that name.
pub fn find_profile(name: &str) -> Result<DifficultyProfile, ProfileError> {
    let id: ProfileId = name.parse()?;
    profile_by_id(id).ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))
}
