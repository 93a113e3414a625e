// Configuration constants for the solver
pub const DEFAULT_TOLERANCE: f64 = 1e-3;
pub const DEFAULT_MAX_SOLUTIONS: usize = 3;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 2000;
pub const DEFAULT_CACHE_CAPACITY: usize = 256;
