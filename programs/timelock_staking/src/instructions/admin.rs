//! Admin instruction handlers.
//!
//! Handles authority-only operations for the staking pool.
//!
//! ## Security Guarantees
//! - All admin functions require caller == pool.authority
//! - Parameter bounds checking before any state change
//! - Emission changes settle pending accrual at the old rate first

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::events::{AuthorityTransferred, EmissionUpdated, PauseToggled, UnstakeParamsUpdated};
use crate::interfaces::{AssetLedger, TimeSource};
use crate::ledger::StakingLedger;
use crate::state::{validate_emission, validate_fee_bps, validate_time_lock};

impl<A: AssetLedger, T: TimeSource> StakingLedger<A, T> {
    fn ensure_authority(&self, authority: &Pubkey) -> Result<()> {
        require_keys_eq!(*authority, self.pool.authority, StakingError::Unauthorized);
        Ok(())
    }

    /// Set the early-exit fee charged on completed unstakes.
    ///
    /// # Security
    /// - Only pool.authority can call this
    /// - Fee capped at MAX_UNSTAKE_FEE_BPS (2%)
    /// - Applies to every unstake completed afterwards, including pending ones
    ///
    /// # Arguments
    /// * `authority` - Caller, must be the pool authority
    /// * `fee_bps` - New fee in basis points
    pub fn set_unstake_fee_percent(&mut self, authority: &Pubkey, fee_bps: u16) -> Result<()> {
        self.ensure_authority(authority)?;

        // === INPUT VALIDATION ===
        validate_fee_bps(fee_bps)?;

        let mut pool = self.pool.clone();
        msg!("Unstake fee updated: {}bp -> {}bp", pool.unstake_fee_bps, fee_bps);
        pool.unstake_fee_bps = fee_bps;

        let event = UnstakeParamsUpdated {
            unstake_time_lock: pool.unstake_time_lock,
            unstake_fee_bps: pool.unstake_fee_bps,
        };
        self.commit(pool, None, vec![event.into()]);

        Ok(())
    }

    /// Set the delay between initiating and completing an unstake.
    ///
    /// # Security
    /// - Only pool.authority can call this
    /// - Timelock bounded to [0, MAX_UNSTAKE_TIME_LOCK] (15 days)
    ///
    /// # Arguments
    /// * `authority` - Caller, must be the pool authority
    /// * `seconds` - New timelock in seconds
    pub fn set_unstake_time_lock(&mut self, authority: &Pubkey, seconds: i64) -> Result<()> {
        self.ensure_authority(authority)?;

        // === INPUT VALIDATION ===
        validate_time_lock(seconds)?;

        let mut pool = self.pool.clone();
        msg!("Unstake timelock updated: {}s -> {}s", pool.unstake_time_lock, seconds);
        pool.unstake_time_lock = seconds;

        let event = UnstakeParamsUpdated {
            unstake_time_lock: pool.unstake_time_lock,
            unstake_fee_bps: pool.unstake_fee_bps,
        };
        self.commit(pool, None, vec![event.into()]);

        Ok(())
    }

    /// Reset the reward rate and open a new emission window from now.
    ///
    /// # Security
    /// - Only pool.authority can call this
    /// - `reward_rate * duration` must fit in a u64
    /// - Accrual up to now is settled at the old rate before the rate changes
    /// - `last_update_time` restarts at now, so a gap after an expired window
    ///   never accrues at the new rate
    ///
    /// # Arguments
    /// * `authority` - Caller, must be the pool authority
    /// * `reward_rate` - Reward units emitted per second
    /// * `duration` - Length of the new window in seconds
    pub fn set_emission_details(
        &mut self,
        authority: &Pubkey,
        reward_rate: u64,
        duration: i64,
    ) -> Result<()> {
        self.ensure_authority(authority)?;
        let now = self.now()?;

        // === INPUT VALIDATION ===
        validate_emission(reward_rate, duration)?;
        let emission_end = now
            .checked_add(duration)
            .ok_or(StakingError::MathOverflow)?;

        // === SETTLEMENT ===
        let mut pool = self.staged_pool(now)?;

        msg!(
            "Emission updated: {}/s until {} -> {}/s until {}",
            pool.reward_rate,
            pool.emission_end,
            reward_rate,
            emission_end
        );

        pool.reward_rate = reward_rate;
        pool.emission_start = now;
        pool.emission_end = emission_end;
        pool.last_update_time = now;

        let event = EmissionUpdated {
            reward_rate,
            emission_start: now,
            emission_end,
        };
        self.commit(pool, None, vec![event.into()]);

        Ok(())
    }

    /// Set the paused state of the pool.
    ///
    /// # Security
    /// - Only pool.authority can call this
    /// - When paused, new stakes are blocked
    /// - Unstaking and claiming remain available (user funds not locked)
    pub fn set_paused(&mut self, authority: &Pubkey, paused: bool) -> Result<()> {
        self.ensure_authority(authority)?;

        let mut pool = self.pool.clone();
        msg!(
            "Staking {} (was {})",
            if paused { "PAUSED" } else { "RESUMED" },
            if pool.paused { "paused" } else { "active" }
        );
        pool.paused = paused;

        self.commit(pool, None, vec![PauseToggled { paused }.into()]);

        Ok(())
    }

    /// Transfer admin authority to a new key.
    ///
    /// # Security
    /// - Only current authority can call this
    /// - New authority must be non-default
    pub fn transfer_authority(&mut self, authority: &Pubkey, new_authority: Pubkey) -> Result<()> {
        self.ensure_authority(authority)?;
        require!(
            new_authority != Pubkey::default(),
            StakingError::Unauthorized
        );

        let mut pool = self.pool.clone();
        let old_authority = pool.authority;
        pool.authority = new_authority;

        msg!("Authority transferred: {} -> {}", old_authority, new_authority);

        let event = AuthorityTransferred {
            old_authority,
            new_authority,
        };
        self.commit(pool, None, vec![event.into()]);

        Ok(())
    }
}
