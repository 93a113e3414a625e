// Configuration constants for expression tree building
pub const MAX_SEARCH_EXPONENT: f64 = 10.0;
pub const MAX_CANDIDATES_PER_SPAN: usize = 20_000;
/// Largest value the builder wraps in a factorial
pub const MAX_WRAPPED_FACTORIAL: f64 = 10.0;
/// Left x right pairs combined per parallel batch
pub const PAIRS_PER_BATCH: usize = 4096;
