//! Checked arithmetic for vault accounting
//! Every supply, balance and total-assets update goes through these helpers,
//! so an overflow reverts the whole call instead of wrapping or saturating.
use odra::casper_types::U256;
use crate::errors::MathError;

/// Rounding direction for share/asset conversions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Round towards zero (floor)
    Down,
    /// Round away from zero (ceiling)
    Up,
}

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_add(b).ok_or(MathError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_sub(b).ok_or(MathError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_mul(b).ok_or(MathError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, MathError> {
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// Computes `x * y / denominator` with the requested rounding.
    pub fn mul_div(x: U256, y: U256, denominator: U256, rounding: Rounding) -> Result<U256, MathError> {
        let numerator = Self::mul(x, y)?;
        let quotient = Self::div(numerator, denominator)?;
        match rounding {
            Rounding::Down => Ok(quotient),
            Rounding::Up => {
                if (numerator % denominator).is_zero() {
                    Ok(quotient)
                } else {
                    Self::add(quotient, U256::one())
                }
            }
        }
    }
}
