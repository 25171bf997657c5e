#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared building blocks
pub mod access;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod math;

// CEP-4626: Tokenized Vault Standard
pub mod cep4626;

// Asset token and legacy migration
pub mod token;
pub mod migrator;

// Staked vault with vesting rewards and cooldown exits
pub mod staking;
