//! Stake instruction handler.
//!
//! Handles staking tokens into the pool.

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::events::Staked;
use crate::interfaces::{AssetLedger, TimeSource};
use crate::ledger::StakingLedger;

impl<A: AssetLedger, T: TimeSource> StakingLedger<A, T> {
    /// Stake tokens into the pool.
    ///
    /// Settles the participant's rewards before the principal changes, so the
    /// new amount only earns from now on. Creates the participant record on
    /// first stake.
    ///
    /// # Arguments
    /// * `owner` - Participant staking the tokens
    /// * `amount` - Amount of tokens to stake
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Staking is paused
    /// - The participant has a pending unstake
    /// - The asset transfer is rejected
    pub fn stake(&mut self, owner: &Pubkey, amount: u64) -> Result<()> {
        let now = self.now()?;

        // === INPUT VALIDATION ===
        require!(amount > 0, StakingError::InvalidAmount);
        require!(!self.pool.paused, StakingError::StakingPaused);

        let is_new = !self.participants.contains_key(owner);
        if let Some(existing) = self.participant(owner) {
            existing.ensure_can_stake()?;
        }

        // === SETTLEMENT ===
        let (mut pool, mut participant) = self.staged_position(owner, now)?;

        participant.amount_staked = participant
            .amount_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        if is_new {
            pool.staker_count = pool.staker_count.saturating_add(1);
        }

        // === TOKEN TRANSFER ===
        self.pull(owner, amount)?;

        msg!("Staked {} tokens", amount);
        msg!("Total staked by user: {}", participant.amount_staked);
        msg!("Total staked in pool: {}", pool.total_staked);

        let event = Staked {
            owner: *owner,
            amount,
            total_staked_by_owner: participant.amount_staked,
        };
        self.commit(pool, Some((*owner, Some(participant))), vec![event.into()]);

        Ok(())
    }
}
