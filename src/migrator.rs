//! Legacy token migrator
//!
//! Swaps a fixed-supply legacy token for the new `Token` at a constant rate.
//! Legacy tokens are pulled into this contract and stay there for good; new
//! tokens are minted, so the migrator must hold `Role::Minter` on the new token.
use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::errors::{AccessError, MigratorError};
use crate::events::{Paused, Unpaused};
use crate::math::SafeMath;
use crate::token::{Cep18TokenContractRef, TokenContractRef};

/// Event emitted when legacy tokens are converted
#[odra::event]
pub struct Migrated {
    /// Account that migrated
    pub account: Address,
    /// Legacy tokens locked
    pub legacy_amount: U256,
    /// New tokens minted
    pub new_amount: U256,
}

/// Migrator contract
#[odra::module(events = [Migrated, Paused, Unpaused])]
pub struct Migrator {
    /// Legacy token address
    legacy_token: Var<Address>,
    /// New token address
    new_token: Var<Address>,
    /// New tokens minted per legacy token
    exchange_rate: Var<U256>,
    /// Legacy tokens migrated so far
    total_migrated: Var<U256>,
    /// Contract admin
    admin: Var<Address>,
    /// Whether migration is paused
    paused: Var<bool>,
}

#[odra::module]
impl Migrator {
    /// Initialize the migrator
    pub fn init(&mut self, legacy_token: Address, new_token: Address, exchange_rate: U256) {
        if exchange_rate.is_zero() {
            self.env().revert(MigratorError::InvalidExchangeRate);
        }
        self.legacy_token.set(legacy_token);
        self.new_token.set(new_token);
        self.exchange_rate.set(exchange_rate);
        self.total_migrated.set(U256::zero());
        self.admin.set(self.env().caller());
        self.paused.set(false);
    }

    /// Convert `amount` legacy tokens held by the caller
    ///
    /// # Returns
    /// The amount of new tokens minted
    pub fn migrate(&mut self, amount: U256) -> U256 {
        if self.paused.get_or_default() {
            self.env().revert(MigratorError::MigrationPaused);
        }
        if amount.is_zero() {
            self.env().revert(MigratorError::ZeroAmount);
        }

        let caller = self.env().caller();
        let new_amount = self.preview_migration(amount);

        let total = SafeMath::add(self.total_migrated.get_or_default(), amount)
            .unwrap_or_revert(&self.env());
        self.total_migrated.set(total);

        let legacy_address = self.legacy_token.get_or_revert_with(MigratorError::TokenNotSet);
        let mut legacy = Cep18TokenContractRef::new(self.env(), legacy_address);
        legacy.transfer_from(caller, self.env().self_address(), amount);

        let new_address = self.new_token.get_or_revert_with(MigratorError::TokenNotSet);
        let mut token = TokenContractRef::new(self.env(), new_address);
        token.mint(caller, new_amount);

        self.env().emit_event(Migrated {
            account: caller,
            legacy_amount: amount,
            new_amount,
        });

        new_amount
    }

    /// New tokens minted for `amount` legacy tokens
    pub fn preview_migration(&self, amount: U256) -> U256 {
        SafeMath::mul(amount, self.exchange_rate.get_or_default()).unwrap_or_revert(&self.env())
    }

    /// Legacy tokens migrated so far
    pub fn total_migrated(&self) -> U256 {
        self.total_migrated.get_or_default()
    }

    /// New tokens per legacy token
    pub fn exchange_rate(&self) -> U256 {
        self.exchange_rate.get_or_default()
    }

    /// Legacy token address
    pub fn legacy_token(&self) -> Option<Address> {
        self.legacy_token.get()
    }

    /// New token address
    pub fn new_token(&self) -> Option<Address> {
        self.new_token.get()
    }

    /// Stop migrations (admin only)
    pub fn pause(&mut self) {
        self.only_admin();
        if self.paused.get_or_default() {
            self.env().revert(MigratorError::MigrationPaused);
        }
        self.paused.set(true);
        self.env().emit_event(Paused { account: self.env().caller() });
    }

    /// Resume migrations (admin only)
    pub fn unpause(&mut self) {
        self.only_admin();
        if !self.paused.get_or_default() {
            self.env().revert(MigratorError::MigrationNotPaused);
        }
        self.paused.set(false);
        self.env().emit_event(Unpaused { account: self.env().caller() });
    }

    /// Check if migration is paused
    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    fn only_admin(&self) {
        if self.admin.get() != Some(self.env().caller()) {
            self.env().revert(AccessError::Unauthorized);
        }
    }
}
