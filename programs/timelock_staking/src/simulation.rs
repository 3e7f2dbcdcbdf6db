//! In-memory collaborators for driving the ledger off-chain.
//!
//! Used by the test suites and handy for simulating pool economics without a
//! token program or a validator clock.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anchor_lang::prelude::*;

use crate::interfaces::{AssetLedger, TimeSource};

/// Token balances keyed by owner, plus the pool's own vault.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAssetLedger {
    balances: BTreeMap<Pubkey, u64>,
    vault: u64,
    reject_next: bool,
}

impl InMemoryAssetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `owner` out of thin air.
    pub fn mint_to(&mut self, owner: &Pubkey, amount: u64) {
        let balance = self.balances.entry(*owner).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Credits the pool vault directly, e.g. to pre-fund rewards.
    pub fn fund_vault(&mut self, amount: u64) {
        self.vault = self.vault.saturating_add(amount);
    }

    pub fn balance_of(&self, owner: &Pubkey) -> u64 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    pub fn vault_balance(&self) -> u64 {
        self.vault
    }

    /// Makes the next transfer, in either direction, fail.
    pub fn reject_next_transfer(&mut self) {
        self.reject_next = true;
    }

    fn take_rejection(&mut self) -> Result<()> {
        if std::mem::take(&mut self.reject_next) {
            return Err(ProgramError::Custom(0).into());
        }
        Ok(())
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn transfer_in(&mut self, payer: &Pubkey, amount: u64) -> Result<()> {
        self.take_rejection()?;

        let balance = self.balances.entry(*payer).or_default();
        let remaining = balance
            .checked_sub(amount)
            .ok_or(ProgramError::InsufficientFunds)?;
        let vault = self
            .vault
            .checked_add(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;

        *balance = remaining;
        self.vault = vault;
        Ok(())
    }

    fn transfer_out(&mut self, payee: &Pubkey, amount: u64) -> Result<()> {
        self.take_rejection()?;

        let vault = self
            .vault
            .checked_sub(amount)
            .ok_or(ProgramError::InsufficientFunds)?;
        let balance = self.balances.entry(*payee).or_default();
        let credited = balance
            .checked_add(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;

        *balance = credited;
        self.vault = vault;
        Ok(())
    }
}

/// Settable clock. Clones share the same instant, so a test can keep a
/// handle after moving one into the ledger.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get().saturating_add(seconds));
    }

    pub fn now(&self) -> i64 {
        self.now.get()
    }
}

impl TimeSource for ManualClock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(self.now.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfers_move_between_owner_and_vault() {
        let alice = Pubkey::new_unique();
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint_to(&alice, 100);

        ledger.transfer_in(&alice, 60).unwrap();
        assert_eq!(ledger.balance_of(&alice), 40);
        assert_eq!(ledger.vault_balance(), 60);

        ledger.transfer_out(&alice, 10).unwrap();
        assert_eq!(ledger.balance_of(&alice), 50);
        assert_eq!(ledger.vault_balance(), 50);
    }

    #[test]
    fn failed_transfer_moves_nothing() {
        let alice = Pubkey::new_unique();
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint_to(&alice, 5);

        assert!(ledger.transfer_in(&alice, 6).is_err());
        assert!(ledger.transfer_out(&alice, 1).is_err());
        assert_eq!(ledger.balance_of(&alice), 5);
        assert_eq!(ledger.vault_balance(), 0);

        ledger.reject_next_transfer();
        assert!(ledger.transfer_in(&alice, 1).is_err());
        assert!(ledger.transfer_in(&alice, 1).is_ok());
    }

    #[test]
    fn clock_clones_share_time() {
        let clock = ManualClock::new(10);
        let handle = clock.clone();
        handle.advance(5);
        assert_eq!(clock.unix_timestamp().unwrap(), 15);
        handle.set(100);
        assert_eq!(clock.now(), 100);
    }

    #[test]
    fn funding_helpers_saturate() {
        let alice = Pubkey::new_unique();
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint_to(&alice, u64::MAX);
        ledger.mint_to(&alice, 1);
        ledger.fund_vault(u64::MAX);
        ledger.fund_vault(1);
        assert_eq!(ledger.balance_of(&alice), u64::MAX);
        assert_eq!(ledger.vault_balance(), u64::MAX);

        let clock = ManualClock::new(i64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now(), i64::MAX);
    }
}
