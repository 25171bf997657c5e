//! Standard CEP-4626 vault events

use odra::prelude::*;
use odra::casper_types::U256;

/// Emitted by `deposit` and `mint`
#[odra::event]
pub struct Deposit {
    /// Caller that supplied the assets
    pub sender: Address,
    /// Receiver of the minted shares
    pub owner: Address,
    /// Assets pulled into the vault
    pub assets: U256,
    /// Shares minted
    pub shares: U256,
}

/// Emitted by `withdraw` and `redeem`
#[odra::event]
pub struct Withdraw {
    /// Caller of the exit
    pub sender: Address,
    /// Receiver of the assets
    pub receiver: Address,
    /// Owner whose shares were burned
    pub owner: Address,
    /// Assets paid out
    pub assets: U256,
    /// Shares burned
    pub shares: U256,
}
