//! Unstake instruction handlers.
//!
//! Withdrawal is two-step: `initiate_unstake` freezes accrual and starts the
//! timelock, `complete_unstake` pays out principal (net of the early-exit fee)
//! together with any unpaid reward and closes the record.

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::events::{RewardPaid, StakingEvent, UnstakeInitiated, Unstaked};
use crate::interfaces::{AssetLedger, TimeSource};
use crate::ledger::StakingLedger;

impl<A: AssetLedger, T: TimeSource> StakingLedger<A, T> {
    /// Start the unstake timelock.
    ///
    /// Rewards are settled up to now and nothing further accrues on this
    /// principal, even though it stays in the pool until completion.
    ///
    /// # Arguments
    /// * `owner` - Participant unstaking
    ///
    /// # Errors
    /// Returns an error if the participant has nothing staked or has already
    /// initiated an unstake.
    pub fn initiate_unstake(&mut self, owner: &Pubkey) -> Result<()> {
        let now = self.now()?;

        let existing = self.participant(owner).ok_or(StakingError::InvalidState)?;
        existing.ensure_can_initiate_unstake()?;

        // === SETTLEMENT ===
        let (pool, mut participant) = self.staged_position(owner, now)?;
        participant.unstake_init_time = Some(now);

        let unlock_time = participant
            .unlock_time(pool.unstake_time_lock)?
            .ok_or(StakingError::InvalidState)?;

        msg!("Unstake initiated for {} tokens", participant.amount_staked);
        msg!("Unlocks at: {}", unlock_time);
        msg!("Pending rewards: {}", participant.rewards);

        let event = UnstakeInitiated {
            owner: *owner,
            amount: participant.amount_staked,
            unlock_time,
        };
        self.commit(pool, Some((*owner, Some(participant))), vec![event.into()]);

        Ok(())
    }

    /// Complete a pending unstake once the timelock has elapsed.
    ///
    /// Pays `principal - fee + rewards` in a single transfer. The fee stays in
    /// the pool's holdings and is only tracked in `total_fees_retained`.
    ///
    /// # Arguments
    /// * `owner` - Participant completing the unstake
    ///
    /// # Errors
    /// Returns an error if:
    /// - No unstake was initiated
    /// - The timelock has not elapsed
    /// - The asset transfer is rejected
    pub fn complete_unstake(&mut self, owner: &Pubkey) -> Result<()> {
        let now = self.now()?;

        let existing = self.participant(owner).ok_or(StakingError::InvalidState)?;
        existing.ensure_can_complete_unstake(self.pool.unstake_time_lock, now)?;

        // === SETTLEMENT ===
        let (mut pool, participant) = self.staged_position(owner, now)?;

        let principal = participant.amount_staked;
        let rewards = participant.rewards;
        let fee = pool.unstake_fee(principal)?;
        let principal_after_fee = principal
            .checked_sub(fee)
            .ok_or(StakingError::MathOverflow)?;
        let payout = principal_after_fee
            .checked_add(rewards)
            .ok_or(StakingError::MathOverflow)?;

        pool.total_staked = pool
            .total_staked
            .checked_sub(principal)
            .ok_or(StakingError::MathOverflow)?;
        pool.staker_count = pool.staker_count.saturating_sub(1);
        pool.total_fees_retained = pool
            .total_fees_retained
            .checked_add(fee)
            .ok_or(StakingError::MathOverflow)?;
        pool.total_rewards_paid = pool
            .total_rewards_paid
            .checked_add(rewards)
            .ok_or(StakingError::MathOverflow)?;

        // === TOKEN TRANSFER ===
        self.pay(owner, payout)?;

        msg!("Unstaked {} tokens (fee {})", principal_after_fee, fee);
        msg!("Rewards paid with principal: {}", rewards);
        msg!("Remaining staked in pool: {}", pool.total_staked);

        let mut events: Vec<StakingEvent> = vec![Unstaked {
            owner: *owner,
            amount: principal_after_fee,
            fee,
        }
        .into()];
        if rewards > 0 {
            events.push(
                RewardPaid {
                    owner: *owner,
                    amount: rewards,
                }
                .into(),
            );
        }
        self.commit(pool, Some((*owner, None)), events);

        Ok(())
    }
}
