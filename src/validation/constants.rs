// Markers delimiting the blocks of an external hint service response
pub const NUMBER_START: &str = "NUMBER_START";
pub const NUMBER_END: &str = "NUMBER_END";
pub const TARGET_START: &str = "TARGET_START";
pub const TARGET_END: &str = "TARGET_END";
pub const SOLUTION_START: &str = "SOLUTION_START";
pub const SOLUTION_END: &str = "SOLUTION_END";
/// A line of at least this many dashes separates puzzles in one response
pub const MIN_SEPARATOR_DASHES: usize = 3;
