//! Error types for the timelock staking ledger.
//!
//! Every failure is a synchronous rejection of the requested operation; the
//! ledger discards all staged changes before returning one of these.
//!
//! ## Error Code Layout
//! - 6000-6002: Input validation errors
//! - 6003-6004: State/time errors
//! - 6005: Math errors
//! - 6006: Authorization errors
//! - 6007: Asset movement errors

use anchor_lang::prelude::*;

/// Custom error codes for the staking ledger.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors ==========

    /// [6000] Cannot stake a zero amount.
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    /// [6001] Fee above 200 bp, timelock outside [0, 15 days] or negative duration.
    #[msg("Parameter is outside its allowed range")]
    ParameterOutOfRange,

    /// [6002] New stakes are paused by the pool authority.
    #[msg("Staking is currently paused")]
    StakingPaused,

    // ========== State/Time Errors ==========

    /// [6003] Operation is not allowed in the participant's current state.
    #[msg("Operation not allowed in the current stake state")]
    InvalidState,

    /// [6004] The clock reported a time before the last settlement.
    #[msg("Invalid timestamp detected")]
    InvalidTimestamp,

    // ========== Math Errors ==========

    /// [6005] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Authorization Errors ==========

    /// [6006] Caller is not the pool authority.
    #[msg("Unauthorized: caller is not the pool authority")]
    Unauthorized,

    // ========== Asset Movement Errors ==========

    /// [6007] The asset ledger rejected the transfer.
    #[msg("Asset transfer was rejected")]
    TransferFailed,
}
