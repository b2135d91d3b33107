//! # tradepost-settlement
//!
//! **Listing & Settlement Engine**: the "item for sale" relation and the
//! atomic buy protocol that swaps currency for item ownership.
//!
//! ## Architecture
//!
//! [`Marketplace`] owns the Item Registry, the Currency Ledger, the
//! [`ListingBook`], and the event log. Every public operation goes through
//! it. A buy:
//! 1. Enters the [`ReentrancyGuard`]
//! 2. Checks listing, seller, balance, and allowance
//! 3. Moves currency buyer → seller and notifies the [`PaymentHook`]
//! 4. Clears the listing
//! 5. Moves the item seller → buyer
//! 6. Emits `SaleCompleted`
//!
//! Any failure restores the checkpoint taken on entry, so the caller
//! observes either the whole trade or nothing.

pub mod digest;
pub mod hook;
pub mod listing_book;
pub mod marketplace;
pub mod reentrancy;
pub mod snapshot;

pub use digest::compute_state_digest;
pub use hook::{Payment, PaymentHook};
pub use listing_book::ListingBook;
pub use marketplace::Marketplace;
pub use reentrancy::ReentrancyGuard;
pub use snapshot::MarketSnapshot;
