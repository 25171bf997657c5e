//! Role table shared by the token, vault and migrator contracts
//!
//! A flat `(role, account) -> bool` mapping. `Admin` holders grant and revoke
//! every role, including `Admin` itself.
use odra::prelude::*;
use crate::errors::AccessError;
use crate::events::{RoleGranted, RoleRevoked};

/// Roles recognised by the contracts in this crate
#[odra::odra_type]
pub enum Role {
    /// Grants and revokes roles
    Admin = 0,
    /// Rewards cycles, surplus withdrawal, parameter updates and token rescue
    CriticalOperations = 1,
    /// Pause and unpause
    Pauser = 2,
    /// Token minting
    Minter = 3,
}

/// Role-based access control submodule
#[odra::module(events = [RoleGranted, RoleRevoked])]
pub struct AccessControl {
    /// (role, account) -> granted
    roles: Mapping<(Role, Address), bool>,
}

#[odra::module]
impl AccessControl {
    /// Grants every role in `roles` to `account` without an admin check.
    /// Only meant to be called from a parent contract's `init`.
    pub fn init_roles(&mut self, account: Address, roles: Vec<Role>) {
        let sender = self.env().caller();
        for role in roles {
            self.set_role(role, account, true, sender);
        }
    }

    /// Whether `account` holds `role`
    pub fn has_role(&self, role: Role, account: Address) -> bool {
        self.roles.get(&(role, account)).unwrap_or(false)
    }

    /// Reverts with `Unauthorized` unless `caller` holds `role`
    pub fn require_role(&self, role: Role, caller: Address) {
        if !self.has_role(role, caller) {
            self.env().revert(AccessError::Unauthorized);
        }
    }

    /// Grant a role (admin only). Granting a held role is a no-op.
    pub fn grant_role(&mut self, role: Role, account: Address) {
        let caller = self.env().caller();
        self.require_role(Role::Admin, caller);
        self.set_role(role, account, true, caller);
    }

    /// Revoke a role (admin only). Revoking a missing role is a no-op.
    pub fn revoke_role(&mut self, role: Role, account: Address) {
        let caller = self.env().caller();
        self.require_role(Role::Admin, caller);
        self.set_role(role, account, false, caller);
    }

    /// Drop one of the caller's own roles
    pub fn renounce_role(&mut self, role: Role) {
        let caller = self.env().caller();
        self.set_role(role, caller, false, caller);
    }

    fn set_role(&mut self, role: Role, account: Address, granted: bool, sender: Address) {
        if self.has_role(role.clone(), account) == granted {
            return;
        }
        self.roles.set(&(role.clone(), account), granted);

        if granted {
            self.env().emit_event(RoleGranted { role, account, sender });
        } else {
            self.env().emit_event(RoleRevoked { role, account, sender });
        }
    }
}
