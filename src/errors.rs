//! Error definitions shared by the token, access control and migrator contracts
use odra::prelude::*;

/// Custom errors for the CEP-18 ledger and the Token contract
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Transfers are paused
    TokenPaused = 102,

    /// Token is not paused
    TokenNotPaused = 103,

    /// Zero amount is meaningless for this operation
    ZeroAmount = 104,

    /// The token cannot rescue its own balance
    CannotRescueSelf = 105,
}

/// Errors raised by the role table
#[odra::odra_error]
pub enum AccessError {
    /// Caller lacks the required role
    Unauthorized = 300,
}

/// Errors raised by the legacy token migrator
#[odra::odra_error]
pub enum MigratorError {
    /// Nothing to migrate
    ZeroAmount = 500,

    /// Exchange rate must be non-zero
    InvalidExchangeRate = 501,

    /// Migration is paused
    MigrationPaused = 502,

    /// Migration is not paused
    MigrationNotPaused = 503,

    /// Legacy or new token address missing from storage
    TokenNotSet = 504,
}

/// Arithmetic failures
#[odra::odra_error]
#[derive(Debug, PartialEq)]
pub enum MathError {
    /// Overflow error
    Overflow = 900,

    /// Underflow error
    Underflow = 901,

    /// Division by zero
    DivisionByZero = 902,
}
