use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;

/// Parameters supplied when the pool is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Reward units emitted per second across the whole pool.
    pub reward_rate: u64,
    /// Length of the first emission window, starting at initialization.
    pub emission_duration: i64,
    /// Seconds between initiating and completing an unstake.
    pub unstake_time_lock: i64,
    /// Early-exit fee charged on principal (basis points).
    pub unstake_fee_bps: u16,
}

impl PoolConfig {
    pub fn validate(&self) -> Result<()> {
        validate_emission(self.reward_rate, self.emission_duration)?;
        validate_time_lock(self.unstake_time_lock)?;
        validate_fee_bps(self.unstake_fee_bps)
    }
}

/// A window's total emission, `reward_rate * duration`, must fit in a `u64`.
/// That bounds every index increment well inside `u128` at [`REWARD_PRECISION`].
pub fn validate_emission(reward_rate: u64, duration: i64) -> Result<()> {
    require!(duration >= 0, StakingError::ParameterOutOfRange);
    require!(
        reward_rate.checked_mul(duration as u64).is_some(),
        StakingError::ParameterOutOfRange
    );
    Ok(())
}

pub fn validate_time_lock(seconds: i64) -> Result<()> {
    require!(
        (0..=MAX_UNSTAKE_TIME_LOCK).contains(&seconds),
        StakingError::ParameterOutOfRange
    );
    Ok(())
}

pub fn validate_fee_bps(bps: u16) -> Result<()> {
    require!(bps <= MAX_UNSTAKE_FEE_BPS, StakingError::ParameterOutOfRange);
    Ok(())
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StakePool {
    pub authority: Pubkey,

    pub total_staked: u64,
    pub reward_rate: u64,
    pub reward_per_token_stored: u128,
    pub last_update_time: i64,

    pub emission_start: i64,
    pub emission_end: i64,

    pub unstake_time_lock: i64,
    pub unstake_fee_bps: u16,

    pub paused: bool,

    pub staker_count: u64,
    pub total_rewards_paid: u64,
    pub total_fees_retained: u64,

    pub created_at: i64,
}

impl StakePool {
    pub fn new(authority: Pubkey, config: &PoolConfig, now: i64) -> Result<Self> {
        config.validate()?;

        let emission_end = now
            .checked_add(config.emission_duration)
            .ok_or(StakingError::MathOverflow)?;

        Ok(Self {
            authority,
            reward_rate: config.reward_rate,
            last_update_time: now,
            emission_start: now,
            emission_end,
            unstake_time_lock: config.unstake_time_lock,
            unstake_fee_bps: config.unstake_fee_bps,
            created_at: now,
            ..Self::default()
        })
    }

    /// Early-exit fee owed on `principal` at the current fee setting.
    pub fn unstake_fee(&self, principal: u64) -> Result<u64> {
        let fee = (principal as u128)
            .checked_mul(self.unstake_fee_bps as u128)
            .ok_or(StakingError::MathOverflow)?
            / BASIS_POINTS_DENOMINATOR as u128;

        u64::try_from(fee).map_err(|_| error!(StakingError::MathOverflow))
    }
}
