//! Staked vault module
//!
//! A CEP-4626 vault over a single asset. Rewards sent to the vault vest into
//! the share price over a rewards cycle, optionally capped per second; exits
//! go through a cooldown when one is configured.

pub mod cooldown;
pub mod errors;
pub mod events;
pub mod rewards;
pub mod staked_vault;


pub use cooldown::UserCooldown;
pub use errors::VaultError;
pub use events::*;
pub use rewards::{DistributionPreview, RewardsCycle, YIELD_CAP_SCALE};
pub use staked_vault::StakedVault;
