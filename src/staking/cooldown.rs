//! Per-user cooldown record
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::MathError;
use crate::math::SafeMath;

/// Assets waiting out the cooldown for one owner
#[odra::odra_type]
#[derive(Default)]
pub struct UserCooldown {
    /// When `locked_amount` becomes claimable (seconds)
    pub cooldown_end: u64,
    /// Assets owed to the owner
    pub locked_amount: U256,
}

impl UserCooldown {
    /// Add `assets` to the lock. The timer restarts for the whole amount.
    pub fn lock(&mut self, assets: U256, now: u64, duration: u64) -> Result<(), MathError> {
        self.locked_amount = SafeMath::add(self.locked_amount, assets)?;
        self.cooldown_end = now.checked_add(duration).ok_or(MathError::Overflow)?;
        Ok(())
    }

    /// A zero duration releases every pending lock at once.
    pub fn is_claimable(&self, now: u64, duration: u64) -> bool {
        duration == 0 || now >= self.cooldown_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulating_restarts_the_timer() {
        let mut cooldown = UserCooldown::default();
        cooldown.lock(U256::from(100), 1_000, 50).unwrap();
        assert_eq!(cooldown.cooldown_end, 1_050);

        cooldown.lock(U256::from(20), 1_040, 50).unwrap();
        assert_eq!(cooldown.locked_amount, U256::from(120));
        assert_eq!(cooldown.cooldown_end, 1_090);
        assert!(!cooldown.is_claimable(1_060, 50));
        assert!(cooldown.is_claimable(1_090, 50));
    }

    #[test]
    fn test_zero_duration_is_always_claimable() {
        let mut cooldown = UserCooldown::default();
        cooldown.lock(U256::one(), 10, 100).unwrap();
        assert!(!cooldown.is_claimable(11, 100));
        assert!(cooldown.is_claimable(11, 0));
    }

    #[test]
    fn test_end_overflow_is_reported() {
        let mut cooldown = UserCooldown::default();
        assert_eq!(cooldown.lock(U256::one(), u64::MAX, 1), Err(MathError::Overflow));
    }
}
