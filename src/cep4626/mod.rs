//! CEP-4626: Tokenized Vault Standard for Casper
//!
//! Casper adaptation of ERC-4626. Share/asset conversion math and the
//! standard `Deposit` / `Withdraw` events; the `StakedVault` contract builds
//! its entry points on top of these.

pub mod conversion;
pub mod events;

pub use conversion::{convert_to_assets, convert_to_shares};
pub use events::*;
