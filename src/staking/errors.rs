//! Error definitions for the staked vault
use odra::prelude::*;

/// Custom errors for the staked vault contract
#[odra::odra_error]
pub enum VaultError {
    /// Direct withdraw/redeem while a cooldown is configured, or cooldown while it is not
    OperationNotAllowed = 400,

    /// Rewards cycle must end after the current block time
    CycleEndInPast = 401,

    /// Current rewards cycle has not reached its end
    PreviousCycleNotFinished = 402,

    /// Rewards cycle exceeds the maximum duration
    CycleTooLong = 403,

    /// Vault balance does not back the requested rewards
    NotEnoughRewardFunds = 404,

    /// No surplus to withdraw
    NoSurplus = 405,

    /// Cooldown period not completed
    CooldownNotElapsed = 406,

    /// Parameter already has the requested value
    SameValue = 407,

    /// Cooldown duration above the allowed maximum
    CooldownDurationTooLong = 408,

    /// The vault asset and the vault shares cannot be rescued
    CannotRescueAsset = 409,

    /// Contract is paused
    ContractPaused = 410,

    /// Contract is not paused
    ContractNotPaused = 411,

    /// Zero amount, or an amount that converts to zero
    ZeroAmount = 412,

    /// Assets requested exceed what the owner's shares back
    ExcessiveWithdrawAmount = 413,

    /// Shares requested exceed the owner's balance
    ExcessiveRedeemAmount = 414,

    /// Asset address missing from storage
    AssetNotSet = 415,
}
