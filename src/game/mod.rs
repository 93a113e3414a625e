//! Game facade wiring generation, hints, submissions and profiles together

mod engine;
mod errors;
mod round;

pub use engine::Engine;
pub use errors::GameError;
pub use round::{HintOrigin, Hints, PuzzleRound};
