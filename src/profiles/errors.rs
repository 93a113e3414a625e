use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Unknown difficulty profile: {0}")]
    UnknownProfile(String),
    #[error("Invalid operand range {min}..={max}")]
    InvalidOperandRange { min: usize, max: usize },
}
