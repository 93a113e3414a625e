// Session difficulty adjustment
pub const MIN_GAMES_FOR_ADJUSTMENT: u32 = 3;
pub const HIGH_WIN_RATE: f64 = 0.8;
pub const LOW_WIN_RATE: f64 = 0.3;

pub const TARGET_GROWTH: f64 = 1.2;
pub const TARGET_SHRINK: f64 = 0.8;
pub const MAX_ADJUSTED_TARGET: i64 = 500;
pub const MIN_ADJUSTED_TARGET: i64 = 20;

pub const TIME_SHRINK: f64 = 0.9;
pub const TIME_GROWTH: f64 = 1.1;
pub const MIN_TIME_LIMIT_SECS: u32 = 60;
pub const MAX_TIME_LIMIT_SECS: u32 = 300;
