//! CEP-18 balance and allowance table
//!
//! Embedded as a submodule by the `Token` contract and by the `StakedVault`
//! for its shares. The parent contract decides who may call what; this module
//! only keeps the books exact.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::TokenError;
use crate::events::{Approval, Transfer};
use crate::math::SafeMath;

/// CEP-18 ledger submodule
#[odra::module(events = [Transfer, Approval])]
pub struct Cep18Ledger {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl Cep18Ledger {
    /// Set token metadata; supply starts at zero
    pub fn init_metadata(&mut self, name: String, symbol: String, decimals: u8) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Move `amount` from `from` to `to`
    pub fn raw_transfer(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        let new_to_balance = SafeMath::add(to_balance, amount).unwrap_or_revert(&self.env());
        self.balances.set(&to, new_to_balance);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    /// Set the allowance of `spender` over `owner`'s tokens
    pub fn raw_approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }

    /// Decrease `spender`'s allowance over `owner` by `amount`
    pub fn spend_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }
        // unlimited approvals are never decremented
        if current_allowance != U256::MAX {
            self.raw_approve(owner, spender, current_allowance - amount);
        }
    }

    /// Mint new tokens to `to`
    pub fn mint(&mut self, to: Address, amount: U256) {
        let new_supply = SafeMath::add(self.total_supply(), amount).unwrap_or_revert(&self.env());
        self.total_supply.set(new_supply);

        let new_balance = SafeMath::add(self.balance_of(to), amount).unwrap_or_revert(&self.env());
        self.balances.set(&to, new_balance);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
    }

    /// Burn tokens held by `from`
    pub fn burn(&mut self, from: Address, amount: U256) {
        let current_balance = self.balance_of(from);
        if current_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }
        self.balances.set(&from, current_balance - amount);

        let new_supply = SafeMath::sub(self.total_supply(), amount).unwrap_or_revert(&self.env());
        self.total_supply.set(new_supply);

        self.env().emit_event(Transfer {
            from,
            to: self.env().self_address(),
            value: amount,
        });
    }
}
