//! Role-gated, pausable CEP-18 token
//!
//! The asset the staked vault holds and the target of the legacy migration.
//! Minting needs `Minter`, pausing needs `Pauser`, rescue needs `CriticalOperations`.
use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::access::{AccessControl, Role};
use crate::errors::TokenError;
use crate::events::{Approval, Paused, RoleGranted, RoleRevoked, TokensRescued, Transfer, Unpaused};
use crate::ledger::Cep18Ledger;

/// Token contract
#[odra::module(events = [Transfer, Approval, RoleGranted, RoleRevoked, Paused, Unpaused, TokensRescued])]
pub struct Token {
    /// Balances and allowances
    ledger: SubModule<Cep18Ledger>,
    /// Role table
    access: SubModule<AccessControl>,
    /// Whether transfers are paused
    paused: Var<bool>,
}

#[odra::module]
impl Token {
    /// Initialize the token. The deployer receives every role and the initial supply.
    pub fn init(&mut self, name: String, symbol: String, decimals: u8, initial_supply: U256) {
        let caller = self.env().caller();
        self.ledger.init_metadata(name, symbol, decimals);
        self.access.init_roles(
            caller,
            alloc::vec![Role::Admin, Role::CriticalOperations, Role::Minter, Role::Pauser],
        );
        self.paused.set(false);

        if !initial_supply.is_zero() {
            self.ledger.mint(caller, initial_supply);
        }
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.ledger.name()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.ledger.symbol()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.ledger.decimals()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.ledger.total_supply()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.ledger.balance_of(owner)
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.ensure_not_paused();
        let caller = self.env().caller();
        self.ledger.raw_transfer(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.ensure_not_paused();
        let caller = self.env().caller();
        self.ledger.raw_approve(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.ensure_not_paused();
        let caller = self.env().caller();
        self.ledger.spend_allowance(from, caller, amount);
        self.ledger.raw_transfer(from, to, amount);
        true
    }

    /// Mint new tokens (minter only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.access.require_role(Role::Minter, self.env().caller());
        if amount.is_zero() {
            self.env().revert(TokenError::ZeroAmount);
        }
        self.ledger.mint(to, amount);
    }

    /// Burn the caller's own tokens
    pub fn burn(&mut self, amount: U256) {
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(TokenError::ZeroAmount);
        }
        let caller = self.env().caller();
        self.ledger.burn(caller, amount);
    }

    /// Pause transfers (pauser only)
    pub fn pause(&mut self) {
        let caller = self.env().caller();
        self.access.require_role(Role::Pauser, caller);
        self.ensure_not_paused();
        self.paused.set(true);
        self.env().emit_event(Paused { account: caller });
    }

    /// Resume transfers (pauser only)
    pub fn unpause(&mut self) {
        let caller = self.env().caller();
        self.access.require_role(Role::Pauser, caller);
        if !self.is_paused() {
            self.env().revert(TokenError::TokenNotPaused);
        }
        self.paused.set(false);
        self.env().emit_event(Unpaused { account: caller });
    }

    /// Check if transfers are paused
    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    /// Send foreign tokens that were transferred to this contract by mistake (critical operations only)
    pub fn rescue_tokens(&mut self, token: Address, amount: U256, to: Address) {
        self.access.require_role(Role::CriticalOperations, self.env().caller());
        if token == self.env().self_address() {
            self.env().revert(TokenError::CannotRescueSelf);
        }
        let mut foreign = Cep18TokenContractRef::new(self.env(), token);
        foreign.transfer(to, amount);
        self.env().emit_event(TokensRescued { token, to, amount });
    }

    /// Whether `account` holds `role`
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.access.has_role(role, account)
    }

    /// Grant a role (admin only)
    pub fn grant_role(&mut self, role: Role, account: Address) {
        self.access.grant_role(role, account);
    }

    /// Revoke a role (admin only)
    pub fn revoke_role(&mut self, role: Role, account: Address) {
        self.access.revoke_role(role, account);
    }

    /// Drop one of the caller's own roles
    pub fn renounce_role(&mut self, role: Role) {
        self.access.renounce_role(role);
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(TokenError::TokenPaused);
        }
    }
}

/// External token interface for interacting with CEP-18 tokens
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the token decimals
    fn decimals(&self) -> u8;

    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Approve a spender
    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Get total supply
    fn total_supply(&self) -> U256;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AccessError;
    use odra::host::{Deployer, HostEnv, HostRef};

    fn setup() -> (HostEnv, TokenHostRef) {
        let env = odra_test::env();
        let init_args = TokenInitArgs {
            name: String::from("Staking Asset"),
            symbol: String::from("STK"),
            decimals: 18,
            initial_supply: U256::from(1_000_000u64),
        };
        let token = Token::deploy(&env, init_args);
        (env, token)
    }

    #[test]
    fn test_init() {
        let (env, token) = setup();
        let deployer = env.get_account(0);
        assert_eq!(token.name(), "Staking Asset");
        assert_eq!(token.symbol(), "STK");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), U256::from(1_000_000u64));
        assert_eq!(token.balance_of(deployer), U256::from(1_000_000u64));
        assert!(token.has_role(Role::Admin, deployer));
        assert!(token.has_role(Role::CriticalOperations, deployer));
        assert!(token.has_role(Role::Minter, deployer));
        assert!(token.has_role(Role::Pauser, deployer));
    }

    #[test]
    fn test_mint_requires_minter_role() {
        let (env, mut token) = setup();
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            token.try_mint(user, U256::from(10)),
            Err(AccessError::Unauthorized.into())
        );

        env.set_caller(env.get_account(0));
        token.grant_role(Role::Minter, user);

        env.set_caller(user);
        token.mint(user, U256::from(10));
        assert_eq!(token.balance_of(user), U256::from(10));
    }

    #[test]
    fn test_zero_mint_and_burn_rejected() {
        let (env, mut token) = setup();
        let deployer = env.get_account(0);
        assert_eq!(token.try_mint(deployer, U256::zero()), Err(TokenError::ZeroAmount.into()));
        assert_eq!(token.try_burn(U256::zero()), Err(TokenError::ZeroAmount.into()));

        token.burn(U256::from(400_000u64));
        assert_eq!(token.total_supply(), U256::from(600_000u64));
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let spender = env.get_account(1);
        let receiver = env.get_account(2);

        token.approve(spender, U256::from(300));

        env.set_caller(spender);
        token.transfer_from(owner, receiver, U256::from(200));
        assert_eq!(token.balance_of(receiver), U256::from(200));
        assert_eq!(token.allowance(owner, spender), U256::from(100));

        assert_eq!(
            token.try_transfer_from(owner, receiver, U256::from(101)),
            Err(TokenError::InsufficientAllowance.into())
        );
    }

    #[test]
    fn test_pause_blocks_transfers() {
        let (env, mut token) = setup();
        let user = env.get_account(1);

        token.pause();
        assert!(token.is_paused());
        assert_eq!(token.try_transfer(user, U256::from(1)), Err(TokenError::TokenPaused.into()));
        assert_eq!(token.try_pause(), Err(TokenError::TokenPaused.into()));

        token.unpause();
        token.transfer(user, U256::from(1));
        assert_eq!(token.balance_of(user), U256::one());
        assert_eq!(token.try_unpause(), Err(TokenError::TokenNotPaused.into()));
    }

    #[test]
    fn test_revoked_pauser_cannot_pause() {
        let (env, mut token) = setup();
        let deployer = env.get_account(0);

        token.renounce_role(Role::Pauser);
        assert!(!token.has_role(Role::Pauser, deployer));
        assert_eq!(token.try_pause(), Err(AccessError::Unauthorized.into()));
    }

    #[test]
    fn test_cannot_rescue_own_balance() {
        let (env, mut token) = setup();
        let self_address = token.address().clone();
        assert_eq!(
            token.try_rescue_tokens(self_address, U256::one(), env.get_account(1)),
            Err(TokenError::CannotRescueSelf.into())
        );
    }

    #[test]
    fn test_rescue_requires_critical_operations_role() {
        let (env, mut token) = setup();
        let deployer = env.get_account(0);
        let admin = env.get_account(1);
        let receiver = env.get_account(2);
        let token_address = token.address().clone();

        let mut other = Token::deploy(
            &env,
            TokenInitArgs {
                name: String::from("Other"),
                symbol: String::from("OTH"),
                decimals: 9,
                initial_supply: U256::from(1_000),
            },
        );
        other.transfer(token_address, U256::from(40));
        let other_address = other.address().clone();

        token.grant_role(Role::Admin, admin);
        env.set_caller(admin);
        assert_eq!(
            token.try_rescue_tokens(other_address, U256::from(40), receiver),
            Err(AccessError::Unauthorized.into())
        );
        env.set_caller(receiver);
        assert_eq!(
            token.try_rescue_tokens(other_address, U256::from(40), receiver),
            Err(AccessError::Unauthorized.into())
        );
        assert_eq!(other.balance_of(token_address), U256::from(40));

        env.set_caller(deployer);
        token.rescue_tokens(other_address, U256::from(40), receiver);
        assert_eq!(other.balance_of(receiver), U256::from(40));
        assert_eq!(other.balance_of(token_address), U256::zero());
    }
}
