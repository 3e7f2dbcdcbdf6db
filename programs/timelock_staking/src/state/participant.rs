use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Lifecycle of a participant's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticipantStatus {
    /// No record, or nothing staked.
    Unstaked,
    /// Principal is staked and earning.
    Staked,
    /// Unstake initiated; accrual is frozen until the record is closed.
    Unstaking,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Participant {
    pub owner: Pubkey,

    pub amount_staked: u64,
    pub reward_debt: u128,
    pub rewards: u64,

    pub unstake_init_time: Option<i64>,
    pub staked_at: i64,
}

impl Participant {
    pub fn new(owner: Pubkey, now: i64) -> Self {
        Self {
            owner,
            staked_at: now,
            ..Self::default()
        }
    }

    pub fn status(&self) -> ParticipantStatus {
        match (self.amount_staked, self.unstake_init_time) {
            (0, _) => ParticipantStatus::Unstaked,
            (_, None) => ParticipantStatus::Staked,
            (_, Some(_)) => ParticipantStatus::Unstaking,
        }
    }

    pub fn is_unstaking(&self) -> bool {
        self.unstake_init_time.is_some()
    }

    /// Instant at which a pending unstake may be completed.
    pub fn unlock_time(&self, time_lock: i64) -> Result<Option<i64>> {
        self.unstake_init_time
            .map(|init| {
                init.checked_add(time_lock)
                    .ok_or_else(|| error!(StakingError::MathOverflow))
            })
            .transpose()
    }

    /// Seconds left before `complete_unstake` is allowed. Zero when no unstake
    /// is pending or the timelock has already elapsed.
    pub fn remaining_unstake_time(&self, time_lock: i64, now: i64) -> Result<i64> {
        Ok(match self.unlock_time(time_lock)? {
            Some(unlock) => unlock.saturating_sub(now).max(0),
            None => 0,
        })
    }

    pub fn ensure_can_stake(&self) -> Result<()> {
        require!(!self.is_unstaking(), StakingError::InvalidState);
        Ok(())
    }

    pub fn ensure_can_initiate_unstake(&self) -> Result<()> {
        require!(
            self.status() == ParticipantStatus::Staked,
            StakingError::InvalidState
        );
        Ok(())
    }

    pub fn ensure_can_complete_unstake(&self, time_lock: i64, now: i64) -> Result<()> {
        require!(
            self.status() == ParticipantStatus::Unstaking,
            StakingError::InvalidState
        );
        let unlock = self.unlock_time(time_lock)?.ok_or(StakingError::InvalidState)?;
        require!(now >= unlock, StakingError::InvalidState);
        Ok(())
    }
}
