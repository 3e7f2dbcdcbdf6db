//! The staking ledger: pool state, participant records and the capabilities
//! they settle against.
//!
//! Every mutating handler follows the same shape:
//! 1. read the clock and validate inputs;
//! 2. stage copies of the pool and the participant;
//! 3. settle rewards on the staged copies (`accrual::update_rewards`);
//! 4. apply the operation's mutation to the staged copies;
//! 5. perform at most one asset transfer;
//! 6. commit the staged state and journal the events.
//!
//! A failure at any step returns before step 6, leaving the ledger untouched.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::accrual;
use crate::error::StakingError;
use crate::events::StakingEvent;
use crate::interfaces::{AssetLedger, TimeSource};
use crate::state::{Participant, ParticipantStatus, StakePool};

pub struct StakingLedger<A, T> {
    pub(crate) pool: StakePool,
    pub(crate) participants: BTreeMap<Pubkey, Participant>,
    pub(crate) asset_ledger: A,
    pub(crate) clock: T,
    pub(crate) events: Vec<StakingEvent>,
}

impl<A: AssetLedger, T: TimeSource> StakingLedger<A, T> {
    // ========== Queries ==========

    pub fn pool(&self) -> &StakePool {
        &self.pool
    }

    pub fn participant(&self, owner: &Pubkey) -> Option<&Participant> {
        self.participants.get(owner)
    }

    pub fn participants(&self) -> &BTreeMap<Pubkey, Participant> {
        &self.participants
    }

    pub fn status(&self, owner: &Pubkey) -> ParticipantStatus {
        self.participant(owner)
            .map(Participant::status)
            .unwrap_or(ParticipantStatus::Unstaked)
    }

    pub fn asset_ledger(&self) -> &A {
        &self.asset_ledger
    }

    pub fn asset_ledger_mut(&mut self) -> &mut A {
        &mut self.asset_ledger
    }

    /// `min(now, emission_end)`.
    pub fn last_applicable_time(&self) -> Result<i64> {
        let now = self.now()?;
        Ok(accrual::last_time_reward_applicable(self.pool.emission_end, now))
    }

    /// Current reward-per-token index, projected to now without settling.
    pub fn reward_per_token(&self) -> Result<u128> {
        accrual::reward_per_token(&self.pool, self.now()?)
    }

    /// Unpaid reward `owner` could claim right now. Zero for unknown owners.
    pub fn earned(&self, owner: &Pubkey) -> Result<u64> {
        match self.participant(owner) {
            Some(participant) => accrual::earned(participant, self.reward_per_token()?),
            None => Ok(0),
        }
    }

    /// Seconds until `owner` may complete their unstake; zero if they are not
    /// unstaking or the timelock has elapsed.
    pub fn remaining_unstake_time(&self, owner: &Pubkey) -> Result<i64> {
        let now = self.now()?;
        match self.participant(owner) {
            Some(participant) => {
                participant.remaining_unstake_time(self.pool.unstake_time_lock, now)
            }
            None => Ok(0),
        }
    }

    /// Takes every event committed since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<StakingEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== Internal helpers ==========

    pub(crate) fn now(&self) -> Result<i64> {
        self.clock.unix_timestamp()
    }

    /// Settled copy of the pool alone, for operations that touch no participant.
    pub(crate) fn staged_pool(&self, now: i64) -> Result<StakePool> {
        let mut pool = self.pool.clone();
        accrual::update_rewards(&mut pool, None, now)?;
        Ok(pool)
    }

    /// Settled copies of the pool and `owner`'s record. A fresh record is
    /// staged when `owner` has none yet.
    pub(crate) fn staged_position(
        &self,
        owner: &Pubkey,
        now: i64,
    ) -> Result<(StakePool, Participant)> {
        let mut pool = self.pool.clone();
        let mut participant = self
            .participants
            .get(owner)
            .cloned()
            .unwrap_or_else(|| Participant::new(*owner, now));
        accrual::update_rewards(&mut pool, Some(&mut participant), now)?;
        Ok((pool, participant))
    }

    pub(crate) fn pull(&mut self, payer: &Pubkey, amount: u64) -> Result<()> {
        self.asset_ledger.transfer_in(payer, amount).map_err(|err| {
            msg!("Transfer of {} from {} rejected: {}", amount, payer, err);
            error!(StakingError::TransferFailed)
        })
    }

    pub(crate) fn pay(&mut self, payee: &Pubkey, amount: u64) -> Result<()> {
        self.asset_ledger.transfer_out(payee, amount).map_err(|err| {
            msg!("Transfer of {} to {} rejected: {}", amount, payee, err);
            error!(StakingError::TransferFailed)
        })
    }

    /// Publishes staged state. `None` closes the participant's record.
    pub(crate) fn commit(
        &mut self,
        pool: StakePool,
        position: Option<(Pubkey, Option<Participant>)>,
        events: Vec<StakingEvent>,
    ) {
        self.pool = pool;
        match position {
            Some((owner, Some(participant))) => {
                self.participants.insert(owner, participant);
            }
            Some((owner, None)) => {
                self.participants.remove(&owner);
            }
            None => {}
        }
        for event in events {
            event.emit();
            self.events.push(event);
        }
    }
}
