//! # Timelock Staking Ledger
//!
//! A continuous-accrual reward ledger for a single-token staking pool.
//! A pool-wide reward rate is turned into per-participant entitlement through
//! a cumulative reward-per-token index, so every operation is O(1) no matter
//! how many participants the pool holds.
//!
//! ## Features
//! - Rewards emitted at a fixed rate over an emission window, shared pro rata
//! - Two-step withdrawal: `initiate_unstake` freezes accrual, `complete_unstake`
//!   pays out after a timelock of up to 15 days
//! - Early-exit fee of up to 2% on principal, retained by the pool
//! - Claim rewards without unstaking
//! - Admin controls for fee, timelock, emission, pausing and authority
//! - Fail-atomic operations with checked math
//!
//! ## Host Capabilities
//! The ledger never moves tokens or reads time itself. It is generic over an
//! [`AssetLedger`] that transfers the staked asset and a [`TimeSource`].
//! The [`simulation`] module provides in-memory versions of both.

pub mod accrual;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod interfaces;
pub mod ledger;
pub mod simulation;
pub mod state;

pub use error::StakingError;
pub use events::StakingEvent;
pub use interfaces::{AssetLedger, TimeSource};
pub use ledger::StakingLedger;
pub use state::{Participant, ParticipantStatus, PoolConfig, StakePool};
