//! Initialize instruction handler.
//!
//! Creates and configures a new staking pool.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::events::PoolInitialized;
use crate::interfaces::{AssetLedger, TimeSource};
use crate::ledger::StakingLedger;
use crate::state::{PoolConfig, StakePool};

impl<A: AssetLedger, T: TimeSource> StakingLedger<A, T> {
    /// Initialize a new staking pool.
    ///
    /// The first emission window opens at the current time and runs for
    /// `config.emission_duration` seconds.
    ///
    /// # Arguments
    /// * `authority` - Key allowed to run administrative operations
    /// * `config` - Reward rate, emission window and unstake parameters
    /// * `asset_ledger` - Moves the staked asset in and out of the pool
    /// * `clock` - Time source for accrual and timelocks
    ///
    /// # Errors
    /// Returns an error if:
    /// - Fee exceeds 200 basis points
    /// - Timelock is negative or longer than 15 days
    /// - Emission duration is negative
    /// - `reward_rate * emission_duration` does not fit in a u64
    pub fn initialize(
        authority: Pubkey,
        config: PoolConfig,
        asset_ledger: A,
        clock: T,
    ) -> Result<Self> {
        let now = clock.unix_timestamp()?;

        // === INPUT VALIDATION ===
        let pool = StakePool::new(authority, &config, now)?;

        msg!("Staking pool initialized");
        msg!("Authority: {}", authority);
        msg!(
            "Reward rate: {}/s until {}",
            pool.reward_rate,
            pool.emission_end
        );
        msg!(
            "Unstake timelock: {}s, fee: {}bp",
            pool.unstake_time_lock,
            pool.unstake_fee_bps
        );

        let event = PoolInitialized {
            authority,
            reward_rate: pool.reward_rate,
            emission_end: pool.emission_end,
            unstake_time_lock: pool.unstake_time_lock,
            unstake_fee_bps: pool.unstake_fee_bps,
        };

        let mut ledger = Self {
            pool: StakePool::default(),
            participants: BTreeMap::new(),
            asset_ledger,
            clock,
            events: Vec::new(),
        };
        ledger.commit(pool, None, vec![event.into()]);

        Ok(ledger)
    }
}
