//! Built-in difficulty profiles and per-session difficulty adjustment

mod catalog;
pub mod constants;
mod errors;
mod profile;

pub use catalog::{difficulty_profiles, find_profile, profile_by_id};
pub use errors::ProfileError;
pub use profile::{DifficultyProfile, ProfileId, SessionStats};
