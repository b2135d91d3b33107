//! Ownership bookkeeping for non-fungible items.
//!
//! Each mutation checks first and writes last, so a failed call leaves the
//! registry untouched.

use std::collections::BTreeMap;

use tradepost_types::{AccountId, ItemId, Result, TradepostError};

/// Tracks which account owns which item.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    /// Current owner per minted item. Ordered for deterministic iteration.
    owners: BTreeMap<ItemId, AccountId>,
    /// The id the next mint will receive.
    next_id: ItemId,
}

impl ItemRegistry {
    /// Create an empty registry. The first mint receives `ItemId(0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new item owned by `caller`. Open to any caller.
    pub fn mint(&mut self, caller: AccountId) -> ItemId {
        let item = self.next_id;
        self.owners.insert(item, caller);
        self.next_id = item.next();
        tracing::debug!(item = %item, owner = %caller, "Item minted");
        item
    }

    /// Current owner of `item`.
    ///
    /// # Errors
    /// Returns `NotFound` if the item was never minted.
    pub fn owner_of(&self, item: ItemId) -> Result<AccountId> {
        self.owners
            .get(&item)
            .copied()
            .ok_or(TradepostError::NotFound(item))
    }

    /// Move `item` from `from` to `to`.
    ///
    /// # Errors
    /// - `NotFound` if the item was never minted
    /// - `NotOwner` if `from` is not the current owner
    pub fn transfer(&mut self, from: AccountId, to: AccountId, item: ItemId) -> Result<()> {
        let owner = self
            .owners
            .get_mut(&item)
            .ok_or(TradepostError::NotFound(item))?;
        if *owner != from {
            return Err(TradepostError::NotOwner {
                account: from,
                item,
            });
        }
        *owner = to;
        tracing::debug!(item = %item, from = %from, to = %to, "Item transferred");
        Ok(())
    }

    #[must_use]
    pub fn exists(&self, item: ItemId) -> bool {
        self.owners.contains_key(&item)
    }

    /// Number of items minted so far.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.next_id.0
    }

    /// Items held by `owner`, ascending.
    #[must_use]
    pub fn items_of(&self, owner: AccountId) -> Vec<ItemId> {
        self.owners
            .iter()
            .filter(|(_, o)| **o == owner)
            .map(|(item, _)| *item)
            .collect()
    }

    /// Number of items held by `owner`.
    #[must_use]
    pub fn holdings(&self, owner: AccountId) -> usize {
        self.owners.values().filter(|o| **o == owner).count()
    }

    /// All `(item, owner)` pairs, ascending by item.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, AccountId)> + '_ {
        self.owners.iter().map(|(item, owner)| (*item, *owner))
    }
}
