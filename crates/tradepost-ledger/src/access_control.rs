//! Role-based access control.
//!
//! Privileged operations call [`AccessControl::check_role`] before touching
//! any state. Grants are a plain set of `(account, role)` pairs; who may
//! change a role is decided by [`Role::admin_role`].

use std::collections::BTreeSet;

use tradepost_types::{AccountId, Result, Role, TradepostError};

/// Set-membership store of role grants.
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    grants: BTreeSet<(AccountId, Role)>,
}

impl AccessControl {
    /// Genesis state: `admin` holds every role.
    #[must_use]
    pub fn with_genesis_admin(admin: AccountId) -> Self {
        let mut grants = BTreeSet::new();
        grants.insert((admin, Role::Admin));
        grants.insert((admin, Role::Moderator));
        Self { grants }
    }

    #[must_use]
    pub fn has_role(&self, account: AccountId, role: Role) -> bool {
        self.grants.contains(&(account, role))
    }

    /// Require `account` to hold `role`.
    ///
    /// # Errors
    /// Returns `Unauthorized` if the grant is missing.
    pub fn check_role(&self, account: AccountId, role: Role) -> Result<()> {
        if self.has_role(account, role) {
            Ok(())
        } else {
            Err(TradepostError::Unauthorized { account, role })
        }
    }

    /// Grant `role` to `account`. Idempotent; returns `true` if the grant
    /// is new.
    ///
    /// # Errors
    /// Returns `Unauthorized` unless `caller` holds the admin role of `role`.
    pub fn grant_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<bool> {
        self.check_role(caller, role.admin_role())?;
        Ok(self.grants.insert((account, role)))
    }

    /// Revoke `role` from `account`. Idempotent; returns `true` if a grant
    /// was removed.
    ///
    /// # Errors
    /// Returns `Unauthorized` unless `caller` holds the admin role of `role`.
    pub fn revoke_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<bool> {
        self.check_role(caller, role.admin_role())?;
        Ok(self.grants.remove(&(account, role)))
    }

    /// `caller` gives up its own `role`. Needs no admin.
    pub fn renounce_role(&mut self, caller: AccountId, role: Role) -> bool {
        self.grants.remove(&(caller, role))
    }

    /// All grants in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (AccountId, Role)> + '_ {
        self.grants.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AccountId {
        AccountId::named("admin")
    }

    fn mod1() -> AccountId {
        AccountId::named("moderator")
    }

    #[test]
    fn genesis_admin_holds_both_roles() {
        let ac = AccessControl::with_genesis_admin(admin());
        assert!(ac.has_role(admin(), Role::Admin));
        assert!(ac.has_role(admin(), Role::Moderator));
        assert!(!ac.has_role(mod1(), Role::Moderator));
    }

    #[test]
    fn admin_grants_and_revokes_moderator() {
        let mut ac = AccessControl::with_genesis_admin(admin());
        assert!(ac.grant_role(admin(), Role::Moderator, mod1()).unwrap());
        assert!(ac.has_role(mod1(), Role::Moderator));
        assert!(ac.revoke_role(admin(), Role::Moderator, mod1()).unwrap());
        assert!(!ac.has_role(mod1(), Role::Moderator));
    }

    #[test]
    fn grant_and_revoke_are_idempotent() {
        let mut ac = AccessControl::with_genesis_admin(admin());
        assert!(ac.grant_role(admin(), Role::Moderator, mod1()).unwrap());
        assert!(!ac.grant_role(admin(), Role::Moderator, mod1()).unwrap());
        assert!(ac.revoke_role(admin(), Role::Moderator, mod1()).unwrap());
        assert!(!ac.revoke_role(admin(), Role::Moderator, mod1()).unwrap());
    }

    #[test]
    fn moderator_cannot_grant() {
        let mut ac = AccessControl::with_genesis_admin(admin());
        ac.grant_role(admin(), Role::Moderator, mod1()).unwrap();
        let err = ac
            .grant_role(mod1(), Role::Moderator, AccountId::named("eve"))
            .unwrap_err();
        assert_eq!(
            err,
            TradepostError::Unauthorized {
                account: mod1(),
                role: Role::Admin
            }
        );
        assert!(!ac.has_role(AccountId::named("eve"), Role::Moderator));
    }

    #[test]
    fn renounce_drops_own_role() {
        let mut ac = AccessControl::with_genesis_admin(admin());
        assert!(ac.renounce_role(admin(), Role::Moderator));
        assert!(!ac.renounce_role(admin(), Role::Moderator));
        assert!(ac.has_role(admin(), Role::Admin));
        assert!(ac.check_role(admin(), Role::Moderator).is_err());
    }
}
