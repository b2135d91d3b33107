//! Fungible currency ledger.
//!
//! Tracks per-account balances and `(owner, spender)` allowances. All
//! mutations are atomic: every check runs before the first write, so a
//! failed call leaves the ledger exactly as it was.
//!
//! Zero balances and zero allowances are not stored, which keeps two
//! ledgers holding the same amounts structurally identical.

use std::collections::BTreeMap;

use tradepost_types::{AccountId, Amount, Result, Role, TradepostError, checked_add};

use crate::access_control::AccessControl;
use crate::supply_conservation::SupplyConservation;

/// The currency ledger: balances, allowances, roles, and supply.
#[derive(Debug, Clone)]
pub struct CurrencyLedger {
    /// Non-zero balances per account.
    balances: BTreeMap<AccountId, Amount>,
    /// Non-zero allowances keyed by `(owner, spender)`.
    allowances: BTreeMap<(AccountId, AccountId), Amount>,
    /// Circulating supply.
    total_supply: Amount,
    /// Role grants gating mint/burn.
    access: AccessControl,
    /// Lifetime mint/burn totals.
    supply: SupplyConservation,
}

impl CurrencyLedger {
    /// Create an empty ledger. `genesis_admin` holds `Admin` and
    /// `Moderator`.
    #[must_use]
    pub fn new(genesis_admin: AccountId) -> Self {
        Self {
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            total_supply: 0,
            access: AccessControl::with_genesis_admin(genesis_admin),
            supply: SupplyConservation::new(),
        }
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Balance of `account`. Unknown accounts hold zero.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// How much `spender` may still move out of `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    #[must_use]
    pub fn has_role(&self, account: AccountId, role: Role) -> bool {
        self.access.has_role(account, role)
    }

    #[must_use]
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    #[must_use]
    pub fn supply(&self) -> &SupplyConservation {
        &self.supply
    }

    /// Non-zero balances, ascending by account.
    pub fn balances(&self) -> impl Iterator<Item = (AccountId, Amount)> + '_ {
        self.balances.iter().map(|(a, b)| (*a, *b))
    }

    /// Non-zero allowances, ascending by `(owner, spender)`.
    pub fn allowances(&self) -> impl Iterator<Item = (AccountId, AccountId, Amount)> + '_ {
        self.allowances.iter().map(|((o, s), a)| (*o, *s, *a))
    }

    // -----------------------------------------------------------------
    // Holder operations
    // -----------------------------------------------------------------

    /// Set the allowance of `spender` over `owner`'s funds. Replaces any
    /// previous value.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Amount) {
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
        tracing::debug!(owner = %owner, spender = %spender, amount, "Allowance set");
    }

    /// Move `amount` of the caller's own funds to `to`.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the caller holds less than `amount`.
    pub fn transfer(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.move_funds(caller, to, amount)
    }

    /// Spend `amount` of `owner`'s funds on behalf of `spender`, paying `to`.
    ///
    /// # Errors
    /// - `InsufficientAllowance` if `allowance(owner, spender) < amount`
    /// - `InsufficientBalance` if `balance_of(owner) < amount`
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(TradepostError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }

        self.move_funds(owner, to, amount)?;

        // Balance moved; now consume the allowance.
        let remaining = allowed - amount;
        if remaining == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), remaining);
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Privileged operations (Moderator)
    // -----------------------------------------------------------------

    /// Create `amount` new currency in `to`'s balance.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` holds `Moderator`
    /// - `AmountOverflow` if the balance or supply would overflow
    pub fn mint(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.access.check_role(caller, Role::Moderator)?;

        let new_supply = checked_add(self.total_supply, amount)?;
        let new_balance = checked_add(self.balance_of(to), amount)?;
        self.supply.record_mint(amount);

        self.total_supply = new_supply;
        self.set_balance(to, new_balance);
        tracing::debug!(to = %to, amount, supply = new_supply, "Currency minted");
        Ok(())
    }

    /// Destroy `amount` of `account`'s currency. Moderators may burn from
    /// any account without an allowance.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` holds `Moderator`
    /// - `InsufficientBalance` if `account` holds less than `amount`
    pub fn burn_from(&mut self, caller: AccountId, account: AccountId, amount: Amount) -> Result<()> {
        self.access.check_role(caller, Role::Moderator)?;

        let available = self.balance_of(account);
        if available < amount {
            return Err(TradepostError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.supply.record_burn(amount);

        self.set_balance(account, available - amount);
        self.total_supply -= amount;
        tracing::debug!(account = %account, amount, supply = self.total_supply, "Currency burned");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Role administration (Admin)
    // -----------------------------------------------------------------

    /// See [`AccessControl::grant_role`].
    pub fn grant_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<bool> {
        self.access.grant_role(caller, role, account)
    }

    /// See [`AccessControl::revoke_role`].
    pub fn revoke_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<bool> {
        self.access.revoke_role(caller, role, account)
    }

    /// See [`AccessControl::renounce_role`].
    pub fn renounce_role(&mut self, caller: AccountId, role: Role) -> bool {
        self.access.renounce_role(caller, role)
    }

    // -----------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------

    /// Check `Σ balances == total_supply == minted − burned`.
    ///
    /// # Errors
    /// Returns [`TradepostError::SupplyInvariantViolation`] on any mismatch.
    pub fn verify_supply(&self) -> Result<()> {
        let held = self
            .balances
            .values()
            .try_fold(0, |acc: Amount, b| acc.checked_add(*b))
            .ok_or_else(|| TradepostError::SupplyInvariantViolation {
                reason: "sum of balances overflows".to_string(),
            })?;
        if held != self.total_supply {
            return Err(TradepostError::SupplyInvariantViolation {
                reason: format!(
                    "sum of balances {held} != total supply {}",
                    self.total_supply
                ),
            });
        }
        self.supply.verify(self.total_supply)
    }

    // -----------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------

    fn move_funds(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TradepostError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = checked_add(self.balance_of(to), amount)?;

        self.set_balance(from, from_balance - amount);
        self.set_balance(to, to_balance);
        tracing::debug!(from = %from, to = %to, amount, "Currency transferred");
        Ok(())
    }

    fn set_balance(&mut self, account: AccountId, amount: Amount) {
        if amount == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }
}
