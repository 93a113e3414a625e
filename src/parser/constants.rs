// Limits on submitted expression text
pub const MAX_TOKENS: usize = 1024;
/// Deepest allowed nesting of parentheses, signs and exponents
pub const MAX_NESTING_DEPTH: usize = 256;
