//! State structures for the staking ledger.
//!
//! Pool-wide accrual state and the per-participant records it settles against.

pub mod participant;
pub mod stake_pool;

pub use participant::*;
pub use stake_pool::*;
