//! Listing model: an offer to sell one item at a fixed price.
//!
//! ## State Machine
//!
//! ```text
//!   ┌──────────┐   list    ┌────────────────────────┐
//!   │ UNLISTED ├──────────▶│ LISTED(price, seller)  │
//!   └──────────┘◀──────────┴────────────────────────┘
//!                cancel / buy / owner transfer
//! ```
//!
//! A listing exists for an item **iff** its price is positive. The
//! recorded seller is the item's owner at the time of listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, ItemId};

/// An active sale offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub item: ItemId,
    /// Asking price. Always > 0.
    pub price: Amount,
    /// Owner of the item when it was listed.
    pub seller: AccountId,
    pub listed_at: DateTime<Utc>,
}

impl Listing {
    /// Whether the listing still belongs to `owner`. A listing whose seller
    /// no longer owns the item is stale and must not settle.
    #[must_use]
    pub fn is_held_by(&self, owner: AccountId) -> bool {
        self.seller == owner
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listing[{}] {} by {}", self.item, self.price, self.seller)
    }
}

/// Per-item listing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingState {
    Unlisted,
    Listed { price: Amount, seller: AccountId },
}

impl ListingState {
    #[must_use]
    pub fn is_listed(&self) -> bool {
        matches!(self, Self::Listed { .. })
    }

    /// Asking price, or `0` when unlisted.
    #[must_use]
    pub fn price(&self) -> Amount {
        match self {
            Self::Unlisted => 0,
            Self::Listed { price, .. } => *price,
        }
    }
}

impl From<Option<&Listing>> for ListingState {
    fn from(listing: Option<&Listing>) -> Self {
        match listing {
            None => Self::Unlisted,
            Some(l) => Self::Listed {
                price: l.price,
                seller: l.seller,
            },
        }
    }
}

impl std::fmt::Display for ListingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlisted => write!(f, "UNLISTED"),
            Self::Listed { price, .. } => write!(f, "LISTED({price})"),
        }
    }
}
