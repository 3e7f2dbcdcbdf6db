//! Capabilities the ledger consumes from its host.

use anchor_lang::prelude::*;

/// Moves the staked asset between participants and the pool's holdings.
///
/// Implementations must either move the full amount or return an error
/// without any partial movement.
pub trait AssetLedger {
    /// Pull `amount` from `payer` into the pool.
    fn transfer_in(&mut self, payer: &Pubkey, amount: u64) -> Result<()>;

    /// Pay `amount` out of the pool to `payee`.
    fn transfer_out(&mut self, payee: &Pubkey, amount: u64) -> Result<()>;
}

/// Monotonic source of unix timestamps.
pub trait TimeSource {
    fn unix_timestamp(&self) -> Result<i64>;
}

/// A `Clock` sysvar snapshot, as read on-chain with `Clock::get()?`.
impl TimeSource for Clock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(self.unix_timestamp)
    }
}
