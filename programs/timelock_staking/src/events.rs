use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: emitted for off-chain indexers and journaled by the ledger
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the pool is created.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolInitialized {
    pub authority: Pubkey,
    pub reward_rate: u64,
    pub emission_end: i64,
    pub unstake_time_lock: i64,
    pub unstake_fee_bps: u16,
}

/// Principal moved into the pool.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Staked {
    pub owner: Pubkey,
    pub amount: u64,
    /// Participant's principal after this stake.
    pub total_staked_by_owner: u64,
}

/// Accrual frozen; principal withdrawable once `unlock_time` is reached.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnstakeInitiated {
    pub owner: Pubkey,
    pub amount: u64,
    pub unlock_time: i64,
}

/// Principal returned to the participant, net of the early-exit fee.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unstaked {
    pub owner: Pubkey,
    /// Principal paid out after the fee.
    pub amount: u64,
    /// Fee retained by the pool.
    pub fee: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardPaid {
    pub owner: Pubkey,
    pub amount: u64,
}

/// Emission rate or window changed by the authority.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmissionUpdated {
    pub reward_rate: u64,
    pub emission_start: i64,
    pub emission_end: i64,
}

/// Fee or timelock changed by the authority.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnstakeParamsUpdated {
    pub unstake_time_lock: i64,
    pub unstake_fee_bps: u16,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PauseToggled {
    pub paused: bool,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

/// Journal entry for every event the ledger commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StakingEvent {
    PoolInitialized(PoolInitialized),
    Staked(Staked),
    UnstakeInitiated(UnstakeInitiated),
    Unstaked(Unstaked),
    RewardPaid(RewardPaid),
    EmissionUpdated(EmissionUpdated),
    UnstakeParamsUpdated(UnstakeParamsUpdated),
    PauseToggled(PauseToggled),
    AuthorityTransferred(AuthorityTransferred),
}

impl StakingEvent {
    /// Logs the event as Anchor program data so indexers can decode it.
    pub fn emit(&self) {
        match self {
            StakingEvent::PoolInitialized(e) => emit!(e.clone()),
            StakingEvent::Staked(e) => emit!(e.clone()),
            StakingEvent::UnstakeInitiated(e) => emit!(e.clone()),
            StakingEvent::Unstaked(e) => emit!(e.clone()),
            StakingEvent::RewardPaid(e) => emit!(e.clone()),
            StakingEvent::EmissionUpdated(e) => emit!(e.clone()),
            StakingEvent::UnstakeParamsUpdated(e) => emit!(e.clone()),
            StakingEvent::PauseToggled(e) => emit!(e.clone()),
            StakingEvent::AuthorityTransferred(e) => emit!(e.clone()),
        }
    }
}

macro_rules! impl_from_event {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for StakingEvent {
                fn from(event: $variant) -> Self {
                    StakingEvent::$variant(event)
                }
            }
        )*
    };
}

impl_from_event!(
    PoolInitialized,
    Staked,
    UnstakeInitiated,
    Unstaked,
    RewardPaid,
    EmissionUpdated,
    UnstakeParamsUpdated,
    PauseToggled,
    AuthorityTransferred,
);
