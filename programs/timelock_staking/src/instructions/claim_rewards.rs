//! Claim rewards instruction handler.
//!
//! Handles claiming accumulated rewards without unstaking.

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::events::RewardPaid;
use crate::interfaces::{AssetLedger, TimeSource};
use crate::ledger::StakingLedger;

impl<A: AssetLedger, T: TimeSource> StakingLedger<A, T> {
    /// Claim accumulated rewards.
    ///
    /// Settles first. With nothing owed this only commits the settlement and
    /// succeeds. Available while staked and while unstaking; in the latter case
    /// only rewards frozen at initiation are owed.
    ///
    /// # Arguments
    /// * `owner` - Participant claiming
    ///
    /// # Errors
    /// Returns an error if the asset transfer is rejected.
    pub fn claim_rewards(&mut self, owner: &Pubkey) -> Result<()> {
        let now = self.now()?;

        if !self.participants.contains_key(owner) {
            let pool = self.staged_pool(now)?;
            msg!("No stake found for {}", owner);
            self.commit(pool, None, Vec::new());
            return Ok(());
        }

        // === SETTLEMENT ===
        let (mut pool, mut participant) = self.staged_position(owner, now)?;

        let amount = participant.rewards;
        if amount == 0 {
            msg!("No rewards available to claim");
            self.commit(pool, Some((*owner, Some(participant))), Vec::new());
            return Ok(());
        }

        participant.rewards = 0;
        pool.total_rewards_paid = pool
            .total_rewards_paid
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        // === TOKEN TRANSFER ===
        self.pay(owner, amount)?;

        msg!("Claimed {} reward tokens", amount);
        msg!("Total distributed from pool: {}", pool.total_rewards_paid);

        let event = RewardPaid {
            owner: *owner,
            amount,
        };
        self.commit(pool, Some((*owner, Some(participant))), vec![event.into()]);

        Ok(())
    }
}
