//! Deterministic state digest.
//!
//! Two markets with the same owners, listings, balances, allowances, role
//! grants, supply, and item counter produce the same digest. Timestamps and
//! the event log are excluded, so a rolled-back operation is
//! indistinguishable from one that never ran.

use sha2::{Digest, Sha256};
use tradepost_ledger::CurrencyLedger;
use tradepost_registry::ItemRegistry;

use crate::listing_book::ListingBook;

/// SHA-256 over the full ledger state, in a fixed field order.
#[must_use]
pub fn compute_state_digest(
    registry: &ItemRegistry,
    ledger: &CurrencyLedger,
    listings: &ListingBook,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"tradepost:state:v1:");

    hasher.update(registry.item_count().to_le_bytes());
    for (item, owner) in registry.iter() {
        hasher.update(item.0.to_le_bytes());
        hasher.update(owner.as_bytes());
    }

    hasher.update((listings.len() as u64).to_le_bytes());
    for listing in listings.iter() {
        hasher.update(listing.item.0.to_le_bytes());
        hasher.update(listing.price.to_le_bytes());
        hasher.update(listing.seller.as_bytes());
    }

    hasher.update(ledger.total_supply().to_le_bytes());
    for (account, balance) in ledger.balances() {
        hasher.update(b"b");
        hasher.update(account.as_bytes());
        hasher.update(balance.to_le_bytes());
    }
    for (owner, spender, amount) in ledger.allowances() {
        hasher.update(b"a");
        hasher.update(owner.as_bytes());
        hasher.update(spender.as_bytes());
        hasher.update(amount.to_le_bytes());
    }
    for (account, role) in ledger.access().iter() {
        hasher.update(b"r");
        hasher.update(account.as_bytes());
        hasher.update([role.tag()]);
    }

    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}
