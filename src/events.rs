//! Event definitions shared by the ledger, role table and pausable contracts
use odra::prelude::*;
use odra::casper_types::U256;
use crate::access::Role;

/// Event emitted when tokens (or vault shares) are transferred, minted or burned
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Amount approved
    pub value: U256,
}

/// Event emitted when a role is granted
#[odra::event]
pub struct RoleGranted {
    /// Granted role
    pub role: Role,
    /// Account receiving the role
    pub account: Address,
    /// Admin that granted it
    pub sender: Address,
}

/// Event emitted when a role is revoked or renounced
#[odra::event]
pub struct RoleRevoked {
    /// Revoked role
    pub role: Role,
    /// Account losing the role
    pub account: Address,
    /// Caller that revoked it
    pub sender: Address,
}

/// Event emitted when a contract is paused
#[odra::event]
pub struct Paused {
    /// Paused by
    pub account: Address,
}

/// Event emitted when a contract is unpaused
#[odra::event]
pub struct Unpaused {
    /// Unpaused by
    pub account: Address,
}

/// Event emitted when stray tokens are sent out of a contract
#[odra::event]
pub struct TokensRescued {
    /// Rescued token contract
    pub token: Address,
    /// Recipient
    pub to: Address,
    /// Amount rescued
    pub amount: U256,
}
