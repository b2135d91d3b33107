//! The set of active listings, keyed by item.
//!
//! Pure bookkeeping: ownership checks live in the marketplace, which
//! consults the registry before touching the book.

use std::collections::BTreeMap;

use chrono::Utc;
use tradepost_types::{AccountId, Amount, ItemId, Listing, ListingState, Result, TradepostError};

/// Active listings. An item is listed iff it has an entry here.
#[derive(Debug, Clone, Default)]
pub struct ListingBook {
    listings: BTreeMap<ItemId, Listing>,
}

impl ListingBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or re-price) a listing.
    ///
    /// # Errors
    /// Returns `InvalidPrice` if `price` is zero.
    pub fn list(&mut self, item: ItemId, price: Amount, seller: AccountId) -> Result<&Listing> {
        if price == 0 {
            return Err(TradepostError::InvalidPrice);
        }
        self.listings.insert(
            item,
            Listing {
                item,
                price,
                seller,
                listed_at: Utc::now(),
            },
        );
        Ok(&self.listings[&item])
    }

    /// Remove the listing for `item`.
    ///
    /// # Errors
    /// Returns `NotListed` if there is none.
    pub fn cancel(&mut self, item: ItemId) -> Result<Listing> {
        self.listings
            .remove(&item)
            .ok_or(TradepostError::NotListed(item))
    }

    /// Drop the listing for `item` if there is one.
    pub fn clear(&mut self, item: ItemId) -> Option<Listing> {
        self.listings.remove(&item)
    }

    #[must_use]
    pub fn get(&self, item: ItemId) -> Option<&Listing> {
        self.listings.get(&item)
    }

    #[must_use]
    pub fn state(&self, item: ItemId) -> ListingState {
        ListingState::from(self.listings.get(&item))
    }

    #[must_use]
    pub fn is_listed(&self, item: ItemId) -> bool {
        self.listings.contains_key(&item)
    }

    /// Active listings, ascending by item.
    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
