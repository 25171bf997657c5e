//! Reward vesting engine
//!
//! Rewards handed to the vault are released into its total assets linearly
//! over a cycle. An optional per-second yield cap limits how much may vest
//! relative to total assets; whatever the cap holds back is moved to
//! `surplus` for good and can only leave through a privileged withdrawal.
//!
//! The cycle has no explicit state enum. It is
//! - dormant when `last_distribution_timestamp >= end_timestamp`,
//! - active while `now < end_timestamp`,
//! - expired but unsettled when `now >= end_timestamp` and
//!   `last_distribution_timestamp < end_timestamp`.
//!
//! All functions here are pure over a `RewardsCycle` value and the caller's
//! `now`; the vault owns the value and persists it.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::MathError;
use crate::math::{Rounding, SafeMath};

/// Denominator of `bps_yield_cap_per_second`
pub const YIELD_CAP_SCALE: u64 = 1_000_000_000_000;

/// Vesting state of the current (or last) rewards cycle
#[odra::odra_type]
#[derive(Default)]
pub struct RewardsCycle {
    /// Rewards not yet released
    pub unvested_amount: U256,
    /// Cycle expiry, seconds
    pub end_timestamp: u64,
    /// Last settlement, seconds; never above `end_timestamp` once settled
    pub last_distribution_timestamp: u64,
    /// Rewards withheld by the yield cap, across cycles
    pub surplus: U256,
    /// Max fraction of total assets (scaled by 1e12) vesting per second; 0 = uncapped
    pub bps_yield_cap_per_second: u64,
}

/// Outcome of a settlement at a given instant
#[odra::odra_type]
#[derive(Default)]
pub struct DistributionPreview {
    /// Amount added to total assets
    pub rewards: U256,
    /// Amount moved to surplus by the cap
    pub surplus_rewards: U256,
    /// Amount released from the unvested pool (`rewards + surplus_rewards`)
    pub uncapped_rewards: U256,
}

impl RewardsCycle {
    /// Whether the cycle has not reached its end yet
    pub fn is_running(&self, now: u64) -> bool {
        now < self.end_timestamp
    }

    /// What settling at `now` would release, given the vault's accounted total assets.
    pub fn preview_distribute(&self, now: u64, total_assets: U256) -> Result<DistributionPreview, MathError> {
        let last = self.last_distribution_timestamp;
        let end = self.end_timestamp;

        let elapsed = if now < end {
            now.checked_sub(last).ok_or(MathError::Underflow)?
        } else if last >= end {
            return Ok(DistributionPreview::default());
        } else {
            end - last
        };
        if elapsed == 0 {
            return Ok(DistributionPreview::default());
        }

        // remaining window measured from the last settlement
        let window = end.checked_sub(last).ok_or(MathError::Underflow)?;
        let uncapped_rewards = SafeMath::mul_div(
            self.unvested_amount,
            U256::from(elapsed),
            U256::from(window),
            Rounding::Down,
        )?;

        if self.bps_yield_cap_per_second == 0 {
            return Ok(DistributionPreview {
                rewards: uncapped_rewards,
                surplus_rewards: U256::zero(),
                uncapped_rewards,
            });
        }

        let capped_rewards = SafeMath::mul_div(
            SafeMath::mul(total_assets, U256::from(elapsed))?,
            U256::from(self.bps_yield_cap_per_second),
            U256::from(YIELD_CAP_SCALE),
            Rounding::Down,
        )?;
        let surplus_rewards = if uncapped_rewards > capped_rewards {
            uncapped_rewards - capped_rewards
        } else {
            U256::zero()
        };

        Ok(DistributionPreview {
            rewards: uncapped_rewards - surplus_rewards,
            surplus_rewards,
            uncapped_rewards,
        })
    }

    /// Settle at `now`. Returns the applied distribution, or `None` when
    /// nothing vests (the cycle is left untouched).
    pub fn distribute(&mut self, now: u64, total_assets: U256) -> Result<Option<DistributionPreview>, MathError> {
        let preview = self.preview_distribute(now, total_assets)?;
        if preview.rewards.is_zero() {
            return Ok(None);
        }

        self.unvested_amount = SafeMath::sub(self.unvested_amount, preview.uncapped_rewards)?;
        self.surplus = SafeMath::add(self.surplus, preview.surplus_rewards)?;
        self.last_distribution_timestamp = now.min(self.end_timestamp);

        Ok(Some(preview))
    }

    /// Replace the cycle parameters. Surplus carries over.
    pub fn start(&mut self, amount: U256, end_timestamp: u64, bps_yield_cap_per_second: u64, now: u64) {
        self.unvested_amount = amount;
        self.end_timestamp = end_timestamp;
        self.last_distribution_timestamp = now;
        self.bps_yield_cap_per_second = bps_yield_cap_per_second;
    }
}
