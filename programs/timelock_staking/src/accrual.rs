//! Reward accrual math.
//!
//! The pool keeps a single cumulative index, `reward_per_token_stored`, that
//! grows by `reward_rate * elapsed / total_staked` (scaled by
//! [`REWARD_PRECISION`]). A participant's entitlement is their principal times
//! the growth of that index since their last settlement, so no operation ever
//! walks the participant set.

use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;
use crate::state::{Participant, StakePool};

/// Latest instant at which the pool is still earning: `min(now, emission_end)`.
pub fn last_time_reward_applicable(emission_end: i64, now: i64) -> i64 {
    std::cmp::min(now, emission_end)
}

/// Projects the reward-per-token index up to `now` without mutating the pool.
///
/// An empty pool stalls the index: there is nobody to attribute emission to.
///
/// # Errors
/// - `InvalidTimestamp` if the applicable time is behind `last_update_time`
/// - `MathOverflow` if the scaled increment does not fit
pub fn reward_per_token(pool: &StakePool, now: i64) -> Result<u128> {
    if pool.total_staked == 0 {
        return Ok(pool.reward_per_token_stored);
    }

    let applicable = last_time_reward_applicable(pool.emission_end, now);
    let elapsed = applicable
        .checked_sub(pool.last_update_time)
        .filter(|elapsed| *elapsed >= 0)
        .ok_or(StakingError::InvalidTimestamp)?;

    let increment = (elapsed as u128)
        .checked_mul(pool.reward_rate as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(REWARD_PRECISION)
        .ok_or(StakingError::MathOverflow)?
        .checked_div(pool.total_staked as u128)
        .ok_or(StakingError::MathOverflow)?;

    pool.reward_per_token_stored
        .checked_add(increment)
        .ok_or_else(|| error!(StakingError::MathOverflow))
}

/// Total unpaid entitlement of `participant` against the given index value.
///
/// Accrual for an unstaking participant is cut off at `unstake_init_time`.
/// Initiation always settles the participant at that instant, so their
/// `reward_debt` already equals the index at the cutoff and only the settled
/// `rewards` remain.
pub fn earned(participant: &Participant, reward_per_token: u128) -> Result<u64> {
    if participant.is_unstaking() {
        return Ok(participant.rewards);
    }

    let delta = reward_per_token
        .checked_sub(participant.reward_debt)
        .ok_or(StakingError::MathOverflow)?;

    let accrued = (participant.amount_staked as u128)
        .checked_mul(delta)
        .ok_or(StakingError::MathOverflow)?
        / REWARD_PRECISION;

    let total = accrued
        .checked_add(participant.rewards as u128)
        .ok_or(StakingError::MathOverflow)?;

    u64::try_from(total).map_err(|_| error!(StakingError::MathOverflow))
}

/// Settles pool-wide accrual up to `now` and, if given, the participant's
/// entitlement against the new index.
///
/// Runs first in every mutating operation, against staged copies of the
/// pool and participant, so principal changes never reach back into rewards
/// that were already earned.
pub fn update_rewards(
    pool: &mut StakePool,
    participant: Option<&mut Participant>,
    now: i64,
) -> Result<()> {
    let applicable = last_time_reward_applicable(pool.emission_end, now);
    require!(
        applicable >= pool.last_update_time,
        StakingError::InvalidTimestamp
    );

    pool.reward_per_token_stored = reward_per_token(pool, now)?;
    pool.last_update_time = applicable;

    if let Some(p) = participant {
        p.rewards = earned(p, pool.reward_per_token_stored)?;
        p.reward_debt = pool.reward_per_token_stored;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(total_staked: u64, reward_rate: u64, end: i64) -> StakePool {
        StakePool {
            total_staked,
            reward_rate,
            emission_end: end,
            ..StakePool::default()
        }
    }

    fn holder(amount: u64) -> Participant {
        Participant {
            amount_staked: amount,
            ..Participant::default()
        }
    }

    #[test]
    fn applicable_time_is_capped_by_emission_end() {
        assert_eq!(last_time_reward_applicable(100, 50), 50);
        assert_eq!(last_time_reward_applicable(100, 100), 100);
        assert_eq!(last_time_reward_applicable(100, 5_000), 100);
    }

    #[test]
    fn empty_pool_does_not_advance_index() {
        let mut p = pool(0, 10, 1_000);
        p.reward_per_token_stored = 42;
        assert_eq!(reward_per_token(&p, 900).unwrap(), 42);
    }

    #[test]
    fn index_grows_by_rate_over_total() {
        let p = pool(100, 10, 1_000);
        // 100s * 10/s spread over 100 staked units = 10 per unit
        assert_eq!(reward_per_token(&p, 100).unwrap(), 10 * REWARD_PRECISION);
        // capped at emission end
        assert_eq!(reward_per_token(&p, 10_000).unwrap(), 100 * REWARD_PRECISION);
    }

    #[test]
    fn index_rejects_clock_regression() {
        let mut p = pool(100, 10, 1_000);
        p.last_update_time = 500;
        assert_eq!(
            reward_per_token(&p, 400).unwrap_err(),
            StakingError::InvalidTimestamp.into()
        );
    }

    #[test]
    fn earned_scales_principal_by_index_delta() {
        let mut alice = holder(100);
        alice.reward_debt = 2 * REWARD_PRECISION;
        alice.rewards = 7;
        assert_eq!(earned(&alice, 12 * REWARD_PRECISION).unwrap(), 1_007);
    }

    #[test]
    fn earned_is_frozen_while_unstaking() {
        let mut alice = holder(100);
        alice.rewards = 500;
        alice.reward_debt = REWARD_PRECISION;
        alice.unstake_init_time = Some(100);
        assert_eq!(earned(&alice, 50 * REWARD_PRECISION).unwrap(), 500);
    }

    #[test]
    fn earned_is_idempotent() {
        let alice = holder(333);
        let index = reward_per_token(&pool(1_000, 7, 10_000), 123).unwrap();
        assert_eq!(earned(&alice, index).unwrap(), earned(&alice, index).unwrap());
    }

    #[test]
    fn update_rewards_bakes_index_and_participant() {
        let mut p = pool(100, 10, 1_000);
        let mut alice = holder(100);

        update_rewards(&mut p, Some(&mut alice), 100).unwrap();
        assert_eq!(p.reward_per_token_stored, 10 * REWARD_PRECISION);
        assert_eq!(p.last_update_time, 100);
        assert_eq!(alice.rewards, 1_000);
        assert_eq!(alice.reward_debt, p.reward_per_token_stored);

        // a second settlement at the same instant changes nothing
        let (before_pool, before_alice) = (p.clone(), alice.clone());
        update_rewards(&mut p, Some(&mut alice), 100).unwrap();
        assert_eq!(p, before_pool);
        assert_eq!(alice, before_alice);
    }

    #[test]
    fn update_rewards_stops_at_emission_end() {
        let mut p = pool(100, 10, 1_000);
        update_rewards(&mut p, None, 4_000).unwrap();
        assert_eq!(p.last_update_time, 1_000);
        assert_eq!(p.reward_per_token_stored, 100 * REWARD_PRECISION);

        update_rewards(&mut p, None, 9_000).unwrap();
        assert_eq!(p.reward_per_token_stored, 100 * REWARD_PRECISION);
    }

    #[test]
    fn rounding_never_overpays() {
        // 3 holders sharing 10/s for 1s: each is owed 3.33.., floored to 3
        let p = pool(3, 10, 100);
        let index = reward_per_token(&p, 1).unwrap();
        let one = holder(1);
        assert_eq!(earned(&one, index).unwrap(), 3);
    }
}
