//! Ledger constants.
//!
//! Fixed-point precision, fee denominators and the bounds enforced on
//! administrative parameters.

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Maximum unstake timelock (15 days)
pub const MAX_UNSTAKE_TIME_LOCK: i64 = 15 * SECONDS_PER_DAY;

/// Maximum early-exit fee (2% = 200 basis points)
pub const MAX_UNSTAKE_FEE_BPS: u16 = 200;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Fixed-point scale applied to the reward-per-token index
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18
