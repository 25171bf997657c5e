//! Event definitions for the staked vault
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when vested rewards are folded into total assets
#[odra::event]
pub struct RewardsDistributed {
    /// Amount added to total assets
    pub rewards: U256,
    /// Amount withheld by the yield cap and moved to surplus
    pub surplus_rewards: U256,
    /// Amount released from the unvested pool
    pub uncapped_rewards: U256,
    /// Total assets after the distribution
    pub total_assets: U256,
    /// Timestamp of distribution (seconds)
    pub timestamp: u64,
}

/// Event emitted when a rewards cycle starts
#[odra::event]
pub struct RewardsCycleCreated {
    /// Rewards to vest over the cycle
    pub amount: U256,
    /// Cycle end (seconds)
    pub end_timestamp: u64,
    /// Yield cap, scaled by 1e12; 0 disables it
    pub bps_yield_cap_per_second: u64,
    /// Created by
    pub created_by: Address,
}

/// Event emitted when capped surplus leaves the vault
#[odra::event]
pub struct SurplusWithdrawn {
    /// Receiver of the surplus
    pub receiver: Address,
    /// Amount withdrawn
    pub amount: U256,
}

/// Event emitted when shares are burned into a cooldown
#[odra::event]
pub struct CooldownStarted {
    /// Owner of the burned shares
    pub owner: Address,
    /// Assets added to the owner's cooldown
    pub assets: U256,
    /// Shares burned
    pub shares: U256,
    /// When the whole locked amount becomes claimable (seconds)
    pub cooldown_end: u64,
}

/// Event emitted when cooled-down assets are claimed
#[odra::event]
pub struct Claimed {
    /// Owner of the cooldown
    pub owner: Address,
    /// Receiver of the assets
    pub receiver: Address,
    /// Assets paid out
    pub assets: U256,
}

/// Event emitted when the cooldown duration is updated
#[odra::event]
pub struct CooldownDurationUpdated {
    /// Old duration (in seconds)
    pub old_duration: u64,
    /// New duration (in seconds)
    pub new_duration: u64,
    /// Updated by
    pub updated_by: Address,
}

/// Event emitted when the yield cap is updated
#[odra::event]
pub struct BpsYieldCapPerSecondUpdated {
    /// Old cap
    pub old_cap: u64,
    /// New cap
    pub new_cap: u64,
    /// Updated by
    pub updated_by: Address,
}

/// Event emitted when the maximum rewards cycle duration is updated
#[odra::event]
pub struct MaximumRewardsCycleDurationUpdated {
    /// Old maximum (in seconds)
    pub old_duration: u64,
    /// New maximum (in seconds)
    pub new_duration: u64,
    /// Updated by
    pub updated_by: Address,
}
