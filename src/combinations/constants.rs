// Configuration constants for grouping enumeration
pub const MAX_GROUPINGS: usize = 50_000;
/// Slack added to the feasibility bound to absorb floating point noise
pub const BOUND_SLACK: f64 = 1e-9;
