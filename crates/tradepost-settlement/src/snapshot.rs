//! Serializable view of market state, for indexers and the replay tool.

use serde::{Deserialize, Serialize};
use tradepost_types::{AccountId, Amount, ItemId, Listing};

/// One item and its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOwnership {
    pub item: ItemId,
    pub owner: AccountId,
}

/// One account's non-zero balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: AccountId,
    pub balance: Amount,
}

/// Point-in-time copy of the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub item_count: u64,
    pub owners: Vec<ItemOwnership>,
    pub listings: Vec<Listing>,
    pub balances: Vec<AccountBalance>,
    pub total_supply: Amount,
    pub event_count: usize,
    /// Hex-encoded state digest.
    pub digest: String,
}

impl MarketSnapshot {
    /// Owner of `item` in this snapshot.
    #[must_use]
    pub fn owner_of(&self, item: ItemId) -> Option<AccountId> {
        self.owners
            .iter()
            .find(|o| o.item == item)
            .map(|o| o.owner)
    }

    /// Balance of `account` in this snapshot (zero if absent).
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.balances
            .iter()
            .find(|b| b.account == account)
            .map_or(0, |b| b.balance)
    }
}
