//! Staked Vault - CEP-4626 vault with vesting rewards and cooldown exits
//!
//! Holders deposit the asset and receive shares. Rewards transferred to the
//! vault only count once a `CriticalOperations` holder starts a rewards cycle
//! over them; they then vest linearly into `total_assets`, limited by the
//! optional per-second yield cap. With a cooldown configured, exits burn
//! shares into a per-user lock that is claimable once the timer runs out.
//!
//! Every state-changing entry point that depends on the exchange rate settles
//! vested rewards first, so conversions always use the up-to-date rate.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::access::{AccessControl, Role};
use crate::cep4626::{self, Deposit, Withdraw};
use crate::events::{Approval, Paused, RoleGranted, RoleRevoked, TokensRescued, Transfer, Unpaused};
use crate::ledger::Cep18Ledger;
use crate::math::{Rounding, SafeMath};
use crate::token::Cep18TokenContractRef;
use super::cooldown::UserCooldown;
use super::errors::VaultError;
use super::events::*;
use super::rewards::{DistributionPreview, RewardsCycle};

const DAY: u64 = 86_400;
const MILLIS_PER_SECOND: u64 = 1_000;

/// Cooldown applied at deployment (seconds)
pub const DEFAULT_COOLDOWN_DURATION: u64 = 7 * DAY;
/// Upper bound for `update_cooldown_duration` (seconds)
pub const MAX_COOLDOWN_DURATION: u64 = 90 * DAY;
/// Maximum rewards cycle length applied at deployment (seconds)
pub const DEFAULT_MAXIMUM_REWARDS_CYCLE_DURATION: u64 = 30 * DAY;

/// Staked vault contract
#[odra::module(events = [
    Transfer, Approval, RoleGranted, RoleRevoked, Paused, Unpaused, TokensRescued,
    Deposit, Withdraw, RewardsDistributed, RewardsCycleCreated, SurplusWithdrawn,
    CooldownStarted, Claimed, CooldownDurationUpdated, BpsYieldCapPerSecondUpdated,
    MaximumRewardsCycleDurationUpdated
])]
pub struct StakedVault {
    /// Share balances and allowances
    shares: SubModule<Cep18Ledger>,
    /// Role table
    access: SubModule<AccessControl>,
    /// Underlying asset address
    asset: Var<Address>,
    /// Assets backing the shares, excluding unsettled rewards
    total_assets: Var<U256>,
    /// Vesting state
    rewards_cycle: Var<RewardsCycle>,
    /// Per-owner cooldown locks
    cooldowns: Mapping<Address, UserCooldown>,
    /// Sum of all cooldown locks
    total_cooldown_locked: Var<U256>,
    /// Cooldown length in seconds; 0 enables direct withdraw/redeem
    cooldown_duration: Var<u64>,
    /// Longest rewards cycle that may be created (seconds)
    maximum_rewards_cycle_duration: Var<u64>,
    /// Paused state
    paused: Var<bool>,
}

#[odra::module]
impl StakedVault {
    /// Initialize the vault over `asset`. Shares use the asset's decimals.
    /// The deployer receives `Admin`, `CriticalOperations` and `Pauser`.
    pub fn init(&mut self, asset: Address, name: String, symbol: String) {
        let caller = self.env().caller();
        let decimals = Cep18TokenContractRef::new(self.env(), asset).decimals();

        self.shares.init_metadata(name, symbol, decimals);
        self.access.init_roles(
            caller,
            alloc::vec![Role::Admin, Role::CriticalOperations, Role::Pauser],
        );

        self.asset.set(asset);
        self.total_assets.set(U256::zero());
        self.rewards_cycle.set(RewardsCycle::default());
        self.total_cooldown_locked.set(U256::zero());
        self.cooldown_duration.set(DEFAULT_COOLDOWN_DURATION);
        self.maximum_rewards_cycle_duration.set(DEFAULT_MAXIMUM_REWARDS_CYCLE_DURATION);
        self.paused.set(false);
    }

    // ========================================
    // CEP-18 Share Functions
    // ========================================

    pub fn name(&self) -> String {
        self.shares.name()
    }

    pub fn symbol(&self) -> String {
        self.shares.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.shares.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.shares.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.shares.balance_of(owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.shares.allowance(owner, spender)
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.shares.raw_transfer(caller, to, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.shares.raw_approve(caller, spender, amount);
        true
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.shares.spend_allowance(from, caller, amount);
        self.shares.raw_transfer(from, to, amount);
        true
    }

    // ========================================
    // CEP-4626 Views
    // ========================================

    /// Underlying asset address
    pub fn asset(&self) -> Address {
        self.asset_address()
    }

    /// Accounted assets plus whatever would vest if settled now
    pub fn total_assets(&self) -> U256 {
        let pending = self.preview_distribute_rewards().rewards;
        SafeMath::add(self.total_assets.get_or_default(), pending).unwrap_or_revert(&self.env())
    }

    pub fn convert_to_shares(&self, assets: U256) -> U256 {
        self.to_shares(assets, Rounding::Down)
    }

    pub fn convert_to_assets(&self, shares: U256) -> U256 {
        self.to_assets(shares, Rounding::Down)
    }

    pub fn max_deposit(&self, _receiver: Address) -> U256 {
        if self.is_paused() {
            return U256::zero();
        }
        U256::MAX
    }

    pub fn max_mint(&self, _receiver: Address) -> U256 {
        if self.is_paused() {
            return U256::zero();
        }
        U256::MAX
    }

    /// Zero while a cooldown is configured; exits then go through `cooldown_*`
    pub fn max_withdraw(&self, owner: Address) -> U256 {
        if self.is_paused() || self.cooldown_enabled() {
            return U256::zero();
        }
        self.to_assets(self.balance_of(owner), Rounding::Down)
    }

    /// Zero while a cooldown is configured; exits then go through `cooldown_*`
    pub fn max_redeem(&self, owner: Address) -> U256 {
        if self.is_paused() || self.cooldown_enabled() {
            return U256::zero();
        }
        self.balance_of(owner)
    }

    pub fn preview_deposit(&self, assets: U256) -> U256 {
        self.to_shares(assets, Rounding::Down)
    }

    pub fn preview_mint(&self, shares: U256) -> U256 {
        self.to_assets(shares, Rounding::Up)
    }

    pub fn preview_withdraw(&self, assets: U256) -> U256 {
        self.to_shares(assets, Rounding::Up)
    }

    pub fn preview_redeem(&self, shares: U256) -> U256 {
        self.to_assets(shares, Rounding::Down)
    }

    // ========================================
    // CEP-4626 Entry Points
    // ========================================

    /// Deposit `assets` and mint shares to `receiver`
    ///
    /// # Returns
    /// The amount of shares minted
    pub fn deposit(&mut self, assets: U256, receiver: Address) -> U256 {
        self.ensure_not_paused();
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.distribute(self.now());

        let shares = self.preview_deposit(assets);
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.deposit_internal(receiver, assets, shares);
        shares
    }

    /// Mint exactly `shares` to `receiver`, pulling the assets they cost
    ///
    /// # Returns
    /// The amount of assets pulled
    pub fn mint(&mut self, shares: U256, receiver: Address) -> U256 {
        self.ensure_not_paused();
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.distribute(self.now());

        let assets = self.preview_mint(shares);
        self.deposit_internal(receiver, assets, shares);
        assets
    }

    /// Withdraw exactly `assets` to `receiver`, burning `owner`'s shares.
    /// Only available while no cooldown is configured.
    ///
    /// # Returns
    /// The amount of shares burned
    pub fn withdraw(&mut self, assets: U256, receiver: Address, owner: Address) -> U256 {
        self.ensure_not_paused();
        self.ensure_cooldown_disabled();
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.distribute(self.now());

        self.ensure_withdrawable(owner, assets);
        let shares = self.preview_withdraw(assets);
        self.withdraw_internal(receiver, owner, assets, shares);
        shares
    }

    /// Burn exactly `shares` of `owner` and send the assets to `receiver`.
    /// Only available while no cooldown is configured.
    ///
    /// # Returns
    /// The amount of assets sent
    pub fn redeem(&mut self, shares: U256, receiver: Address, owner: Address) -> U256 {
        self.ensure_not_paused();
        self.ensure_cooldown_disabled();
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.distribute(self.now());

        self.ensure_redeemable(owner, shares);
        let assets = self.preview_redeem(shares);
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.withdraw_internal(receiver, owner, assets, shares);
        assets
    }

    // ========================================
    // Cooldown
    // ========================================

    /// Burn the shares worth `assets` and lock the assets in the caller's cooldown
    ///
    /// # Returns
    /// The amount of shares burned
    pub fn cooldown_assets(&mut self, assets: U256) -> U256 {
        self.ensure_not_paused();
        self.ensure_cooldown_enabled();
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        let now = self.now();
        self.distribute(now);

        let owner = self.env().caller();
        self.ensure_withdrawable(owner, assets);
        let shares = self.preview_withdraw(assets);
        self.start_cooldown(owner, assets, shares, now);
        shares
    }

    /// Burn `shares` and lock the assets they are worth in the caller's cooldown
    ///
    /// # Returns
    /// The amount of assets locked
    pub fn cooldown_shares(&mut self, shares: U256) -> U256 {
        self.ensure_not_paused();
        self.ensure_cooldown_enabled();
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        let now = self.now();
        self.distribute(now);

        let owner = self.env().caller();
        self.ensure_redeemable(owner, shares);
        let assets = self.preview_redeem(shares);
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.start_cooldown(owner, assets, shares, now);
        assets
    }

    /// Pay the caller's whole cooldown lock to `receiver` once it has elapsed.
    /// A caller with nothing locked gets zero and nothing happens, even while paused.
    ///
    /// # Returns
    /// The amount of assets paid
    pub fn claim(&mut self, receiver: Address) -> U256 {
        let owner = self.env().caller();
        let cooldown = self.cooldowns(owner);
        let assets = cooldown.locked_amount;
        if assets.is_zero() {
            return U256::zero();
        }

        self.ensure_not_paused();
        let now = self.now();
        self.distribute(now);
        if !cooldown.is_claimable(now, self.cooldown_duration()) {
            self.env().revert(VaultError::CooldownNotElapsed);
        }

        self.cooldowns.set(&owner, UserCooldown::default());
        let total_locked = SafeMath::sub(self.total_cooldown_locked(), assets)
            .unwrap_or_revert(&self.env());
        self.total_cooldown_locked.set(total_locked);

        self.asset_ref().transfer(receiver, assets);

        self.env().emit_event(Claimed {
            owner,
            receiver,
            assets,
        });

        assets
    }

    pub fn cooldowns(&self, owner: Address) -> UserCooldown {
        self.cooldowns.get(&owner).unwrap_or_default()
    }

    pub fn cooldown_duration(&self) -> u64 {
        self.cooldown_duration.get_or_default()
    }

    pub fn total_cooldown_locked(&self) -> U256 {
        self.total_cooldown_locked.get_or_default()
    }

    // ========================================
    // Rewards
    // ========================================

    /// Settle vested rewards into total assets. Callable by anyone.
    pub fn distribute_rewards(&mut self) {
        self.distribute(self.now());
    }

    /// What `distribute_rewards` would settle right now
    pub fn preview_distribute_rewards(&self) -> DistributionPreview {
        self.rewards_cycle()
            .preview_distribute(self.now(), self.total_assets.get_or_default())
            .unwrap_or_revert(&self.env())
    }

    /// Start vesting `amount` of idle vault balance until `end_timestamp` (seconds)
    pub fn create_rewards_cycle(&mut self, amount: U256, end_timestamp: u64, bps_yield_cap_per_second: u64) {
        let caller = self.env().caller();
        self.access.require_role(Role::CriticalOperations, caller);
        let now = self.now();
        self.distribute(now);

        if end_timestamp <= now {
            self.env().revert(VaultError::CycleEndInPast);
        }
        let mut cycle = self.rewards_cycle();
        if cycle.is_running(now) {
            self.env().revert(VaultError::PreviousCycleNotFinished);
        }
        if end_timestamp - now > self.maximum_rewards_cycle_duration() {
            self.env().revert(VaultError::CycleTooLong);
        }
        if amount > self.available_rewards() {
            self.env().revert(VaultError::NotEnoughRewardFunds);
        }

        cycle.start(amount, end_timestamp, bps_yield_cap_per_second, now);
        self.rewards_cycle.set(cycle);

        self.env().emit_event(RewardsCycleCreated {
            amount,
            end_timestamp,
            bps_yield_cap_per_second,
            created_by: caller,
        });
    }

    /// Send the whole capped surplus to `receiver`
    ///
    /// # Returns
    /// The amount withdrawn
    pub fn withdraw_surplus_rewards(&mut self, receiver: Address) -> U256 {
        self.access.require_role(Role::CriticalOperations, self.env().caller());

        let mut cycle = self.rewards_cycle();
        let amount = cycle.surplus;
        if amount.is_zero() {
            self.env().revert(VaultError::NoSurplus);
        }
        cycle.surplus = U256::zero();
        self.rewards_cycle.set(cycle);

        self.asset_ref().transfer(receiver, amount);

        self.env().emit_event(SurplusWithdrawn { receiver, amount });
        amount
    }

    /// Vault balance not claimed by depositors, surplus or cooldown locks
    pub fn available_rewards(&self) -> U256 {
        let balance = self.asset_ref().balance_of(self.env().self_address());
        let reserved = [
            self.total_assets.get_or_default(),
            self.rewards_cycle().surplus,
            self.total_cooldown_locked(),
        ]
        .into_iter()
        .try_fold(U256::zero(), SafeMath::add)
        .unwrap_or_revert(&self.env());

        if balance > reserved {
            balance - reserved
        } else {
            U256::zero()
        }
    }

    pub fn rewards_cycle(&self) -> RewardsCycle {
        self.rewards_cycle.get_or_default()
    }

    pub fn maximum_rewards_cycle_duration(&self) -> u64 {
        self.maximum_rewards_cycle_duration.get_or_default()
    }

    // ========================================
    // Admin Functions
    // ========================================

    pub fn update_cooldown_duration(&mut self, new_duration: u64) {
        let caller = self.env().caller();
        self.access.require_role(Role::CriticalOperations, caller);

        let old_duration = self.cooldown_duration();
        if new_duration == old_duration {
            self.env().revert(VaultError::SameValue);
        }
        if new_duration > MAX_COOLDOWN_DURATION {
            self.env().revert(VaultError::CooldownDurationTooLong);
        }
        self.cooldown_duration.set(new_duration);

        self.env().emit_event(CooldownDurationUpdated {
            old_duration,
            new_duration,
            updated_by: caller,
        });
    }

    /// Rewards vested so far are settled under the old cap.
    pub fn update_bps_yield_cap_per_second(&mut self, new_cap: u64) {
        let caller = self.env().caller();
        self.access.require_role(Role::CriticalOperations, caller);
        self.distribute(self.now());

        let mut cycle = self.rewards_cycle();
        let old_cap = cycle.bps_yield_cap_per_second;
        if new_cap == old_cap {
            self.env().revert(VaultError::SameValue);
        }
        cycle.bps_yield_cap_per_second = new_cap;
        self.rewards_cycle.set(cycle);

        self.env().emit_event(BpsYieldCapPerSecondUpdated {
            old_cap,
            new_cap,
            updated_by: caller,
        });
    }

    pub fn update_maximum_rewards_cycle_duration(&mut self, new_duration: u64) {
        let caller = self.env().caller();
        self.access.require_role(Role::CriticalOperations, caller);

        let old_duration = self.maximum_rewards_cycle_duration();
        if new_duration == old_duration {
            self.env().revert(VaultError::SameValue);
        }
        self.maximum_rewards_cycle_duration.set(new_duration);

        self.env().emit_event(MaximumRewardsCycleDurationUpdated {
            old_duration,
            new_duration,
            updated_by: caller,
        });
    }

    /// Send foreign tokens that were transferred to the vault by mistake
    pub fn rescue_tokens(&mut self, token: Address, amount: U256, to: Address) {
        self.access.require_role(Role::CriticalOperations, self.env().caller());
        if token == self.asset_address() || token == self.env().self_address() {
            self.env().revert(VaultError::CannotRescueAsset);
        }
        Cep18TokenContractRef::new(self.env(), token).transfer(to, amount);
        self.env().emit_event(TokensRescued { token, to, amount });
    }

    pub fn pause(&mut self) {
        let caller = self.env().caller();
        self.access.require_role(Role::Pauser, caller);
        self.ensure_not_paused();
        self.paused.set(true);
        self.env().emit_event(Paused { account: caller });
    }

    pub fn unpause(&mut self) {
        let caller = self.env().caller();
        self.access.require_role(Role::Pauser, caller);
        if !self.is_paused() {
            self.env().revert(VaultError::ContractNotPaused);
        }
        self.paused.set(false);
        self.env().emit_event(Unpaused { account: caller });
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.access.has_role(role, account)
    }

    pub fn grant_role(&mut self, role: Role, account: Address) {
        self.access.grant_role(role, account);
    }

    pub fn revoke_role(&mut self, role: Role, account: Address) {
        self.access.revoke_role(role, account);
    }

    pub fn renounce_role(&mut self, role: Role) {
        self.access.renounce_role(role);
    }

    // ========================================
    // Internal
    // ========================================

    fn now(&self) -> u64 {
        self.env().get_block_time() / MILLIS_PER_SECOND
    }

    fn asset_address(&self) -> Address {
        self.asset.get_or_revert_with(VaultError::AssetNotSet)
    }

    fn asset_ref(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.asset_address())
    }

    fn to_shares(&self, assets: U256, rounding: Rounding) -> U256 {
        cep4626::convert_to_shares(assets, self.total_assets(), self.total_supply(), rounding)
            .unwrap_or_revert(&self.env())
    }

    fn to_assets(&self, shares: U256, rounding: Rounding) -> U256 {
        cep4626::convert_to_assets(shares, self.total_assets(), self.total_supply(), rounding)
            .unwrap_or_revert(&self.env())
    }

    /// Settle the rewards cycle at `now` and fold vested rewards into total assets
    fn distribute(&mut self, now: u64) {
        let mut cycle = self.rewards_cycle();
        let total_assets = self.total_assets.get_or_default();
        let applied = cycle.distribute(now, total_assets).unwrap_or_revert(&self.env());

        if let Some(distribution) = applied {
            let total_assets = SafeMath::add(total_assets, distribution.rewards)
                .unwrap_or_revert(&self.env());
            self.rewards_cycle.set(cycle);
            self.total_assets.set(total_assets);

            self.env().emit_event(RewardsDistributed {
                rewards: distribution.rewards,
                surplus_rewards: distribution.surplus_rewards,
                uncapped_rewards: distribution.uncapped_rewards,
                total_assets,
                timestamp: now,
            });
        }
    }

    fn deposit_internal(&mut self, receiver: Address, assets: U256, shares: U256) {
        let caller = self.env().caller();
        self.asset_ref().transfer_from(caller, self.env().self_address(), assets);
        self.shares.mint(receiver, shares);
        self.after_deposit(assets);

        self.env().emit_event(Deposit {
            sender: caller,
            owner: receiver,
            assets,
            shares,
        });
    }

    fn withdraw_internal(&mut self, receiver: Address, owner: Address, assets: U256, shares: U256) {
        let caller = self.env().caller();
        if caller != owner {
            self.shares.spend_allowance(owner, caller, shares);
        }
        self.before_withdraw(assets);
        self.shares.burn(owner, shares);
        self.asset_ref().transfer(receiver, assets);

        self.env().emit_event(Withdraw {
            sender: caller,
            receiver,
            owner,
            assets,
            shares,
        });
    }

    fn start_cooldown(&mut self, owner: Address, assets: U256, shares: U256, now: u64) {
        self.before_withdraw(assets);
        self.shares.burn(owner, shares);

        let mut cooldown = self.cooldowns(owner);
        cooldown
            .lock(assets, now, self.cooldown_duration())
            .unwrap_or_revert(&self.env());
        let cooldown_end = cooldown.cooldown_end;
        self.cooldowns.set(&owner, cooldown);

        let total_locked = SafeMath::add(self.total_cooldown_locked(), assets)
            .unwrap_or_revert(&self.env());
        self.total_cooldown_locked.set(total_locked);

        self.env().emit_event(CooldownStarted {
            owner,
            assets,
            shares,
            cooldown_end,
        });
    }

    fn after_deposit(&mut self, assets: U256) {
        let total = SafeMath::add(self.total_assets.get_or_default(), assets)
            .unwrap_or_revert(&self.env());
        self.total_assets.set(total);
    }

    fn before_withdraw(&mut self, assets: U256) {
        let total = SafeMath::sub(self.total_assets.get_or_default(), assets)
            .unwrap_or_revert(&self.env());
        self.total_assets.set(total);
    }

    fn ensure_withdrawable(&self, owner: Address, assets: U256) {
        if assets > self.to_assets(self.balance_of(owner), Rounding::Down) {
            self.env().revert(VaultError::ExcessiveWithdrawAmount);
        }
    }

    fn ensure_redeemable(&self, owner: Address, shares: U256) {
        if shares > self.balance_of(owner) {
            self.env().revert(VaultError::ExcessiveRedeemAmount);
        }
    }

    fn cooldown_enabled(&self) -> bool {
        self.cooldown_duration() > 0
    }

    fn ensure_cooldown_enabled(&self) {
        if !self.cooldown_enabled() {
            self.env().revert(VaultError::OperationNotAllowed);
        }
    }

    fn ensure_cooldown_disabled(&self) {
        if self.cooldown_enabled() {
            self.env().revert(VaultError::OperationNotAllowed);
        }
    }

    fn ensure_not_paused(&self) {
        if self.is_paused() {
            self.env().revert(VaultError::ContractPaused);
        }
    }
}
