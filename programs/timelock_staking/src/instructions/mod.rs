//! Instruction handlers for the staking ledger.
//!
//! Each module extends `StakingLedger` with one group of operations.

pub mod admin;
pub mod claim_rewards;
pub mod initialize;
pub mod stake;
pub mod unstake;
