//! Share/asset conversion for CEP-4626 vaults
//!
//! At zero share supply the rate is 1:1. Callers pick the rounding direction
//! so that the vault never gives away value:
//! - deposit: assets -> shares, `Down`
//! - mint: shares -> assets, `Up`
//! - withdraw: assets -> shares, `Up`
//! - redeem: shares -> assets, `Down`

use odra::casper_types::U256;
use crate::errors::MathError;
use crate::math::{Rounding, SafeMath};

/// Shares worth `assets`: `assets * total_shares / total_assets`
pub fn convert_to_shares(
    assets: U256,
    total_assets: U256,
    total_shares: U256,
    rounding: Rounding,
) -> Result<U256, MathError> {
    if total_shares.is_zero() || total_assets.is_zero() {
        return Ok(assets);
    }
    SafeMath::mul_div(assets, total_shares, total_assets, rounding)
}

/// Assets backing `shares`: `shares * total_assets / total_shares`
pub fn convert_to_assets(
    shares: U256,
    total_assets: U256,
    total_shares: U256,
    rounding: Rounding,
) -> Result<U256, MathError> {
    if total_shares.is_zero() {
        return Ok(shares);
    }
    SafeMath::mul_div(shares, total_assets, total_shares, rounding)
}
