use anchor_lang::prelude::Pubkey;
use proptest::prelude::*;

use timelock_staking::simulation::{InMemoryAssetLedger, ManualClock};
use timelock_staking::{PoolConfig, StakingLedger};

type Ledger = StakingLedger<InMemoryAssetLedger, ManualClock>;

const ACTORS: usize = 3;
const REWARD_RATE: u64 = 5;
const EMISSION_DURATION: i64 = 8_000;

#[derive(Clone, Debug)]
enum Op {
    Stake(usize, u64),
    InitiateUnstake(usize),
    CompleteUnstake(usize),
    Claim(usize),
    Advance(i64),
    RejectNextTransfer,
}

fn op() -> impl Strategy<Value = Op> {
    let actor = 0..ACTORS;
    prop_oneof![
        4 => (actor.clone(), 0u64..500).prop_map(|(a, amount)| Op::Stake(a, amount)),
        2 => actor.clone().prop_map(Op::InitiateUnstake),
        2 => actor.clone().prop_map(Op::CompleteUnstake),
        2 => actor.prop_map(Op::Claim),
        3 => (0i64..400).prop_map(Op::Advance),
        1 => Just(Op::RejectNextTransfer),
    ]
}

fn setup(fee_bps: u16, time_lock: i64) -> (Ledger, ManualClock, Vec<Pubkey>) {
    let clock = ManualClock::new(0);
    let mut assets = InMemoryAssetLedger::new();
    assets.fund_vault(1_000_000);

    let actors: Vec<Pubkey> = (0..ACTORS).map(|_| Pubkey::new_unique()).collect();
    for actor in &actors {
        assets.mint_to(actor, 100_000);
    }

    let config = PoolConfig {
        reward_rate: REWARD_RATE,
        emission_duration: EMISSION_DURATION,
        unstake_time_lock: time_lock,
        unstake_fee_bps: fee_bps,
    };
    let ledger = Ledger::initialize(Pubkey::new_unique(), config, assets, clock.clone()).unwrap();
    (ledger, clock, actors)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn ledger_invariants_hold(
        ops in prop::collection::vec(op(), 1..80),
        fee_bps in 0u16..=200,
        time_lock in 0i64..300,
    ) {
        let (mut ledger, clock, actors) = setup(fee_bps, time_lock);
        let mut last_index = ledger.pool().reward_per_token_stored;
        let mut last_update = ledger.pool().last_update_time;

        for op in ops {
            let pool_before = ledger.pool().clone();
            let records_before = ledger.participants().clone();
            ledger.drain_events();

            let result = match op {
                Op::Stake(a, amount) => ledger.stake(&actors[a], amount),
                Op::InitiateUnstake(a) => ledger.initiate_unstake(&actors[a]),
                Op::CompleteUnstake(a) => ledger.complete_unstake(&actors[a]),
                Op::Claim(a) => ledger.claim_rewards(&actors[a]),
                Op::Advance(seconds) => {
                    clock.advance(seconds);
                    Ok(())
                }
                Op::RejectNextTransfer => {
                    ledger.asset_ledger_mut().reject_next_transfer();
                    Ok(())
                }
            };

            // rejected calls leave no trace
            if result.is_err() {
                prop_assert_eq!(ledger.pool(), &pool_before);
                prop_assert_eq!(ledger.participants(), &records_before);
                prop_assert!(ledger.drain_events().is_empty());
            }

            let pool = ledger.pool();
            let staked: u64 = ledger.participants().values().map(|p| p.amount_staked).sum();
            prop_assert_eq!(pool.total_staked, staked);
            prop_assert_eq!(pool.staker_count, ledger.participants().len() as u64);
            prop_assert!(ledger.participants().values().all(|p| p.amount_staked > 0));

            prop_assert!(pool.reward_per_token_stored >= last_index);
            prop_assert!(pool.last_update_time >= last_update);
            last_index = pool.reward_per_token_stored;
            last_update = pool.last_update_time;

            // principal is always backed by the vault
            prop_assert!(ledger.asset_ledger().vault_balance() >= pool.total_staked);

            // never promise more than was emitted
            let outstanding: u64 = actors
                .iter()
                .map(|a| ledger.earned(a).unwrap())
                .sum();
            let emitted = REWARD_RATE * ledger.last_applicable_time().unwrap() as u64;
            prop_assert!(outstanding + pool.total_rewards_paid <= emitted);

            let again: u64 = actors
                .iter()
                .map(|a| ledger.earned(a).unwrap())
                .sum();
            prop_assert_eq!(outstanding, again);
        }
    }
}
