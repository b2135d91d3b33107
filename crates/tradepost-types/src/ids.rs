//! Identifiers used throughout Tradepost.
//!
//! Accounts are UUIDs (v7 when freshly generated, SHA-256 derived when
//! named). Items use a dense `u64` counter assigned by the registry.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identity of an account: a wallet, a moderator, or the settlement engine
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Deterministic `AccountId` derived from a human-readable label.
    ///
    /// The same label always maps to the same account, which lets replay
    /// scenarios and fixtures refer to `"alice"` instead of a raw UUID.
    #[must_use]
    pub fn named(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"tradepost:account:v1:");
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);
        Self(Uuid::from_bytes(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// First four bytes in hex, for compact log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0.as_bytes()[..4])
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ItemId
// ---------------------------------------------------------------------------

/// Monotonically increasing identifier of a non-fungible item.
///
/// Assigned by the registry at mint time, starting at `0`. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The id after this one. Saturates at `u64::MAX`; the registry mints
    /// one id per call, so that bound is never reached.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_uniqueness() {
        let a = AccountId::new();
        let b = AccountId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn named_accounts_are_stable() {
        assert_eq!(AccountId::named("alice"), AccountId::named("alice"));
        assert_ne!(AccountId::named("alice"), AccountId::named("bob"));
    }

    #[test]
    fn short_is_eight_hex_chars() {
        let short = AccountId::named("alice").short();
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn item_id_next() {
        assert_eq!(ItemId(0).next(), ItemId(1));
        assert_eq!(ItemId::default(), ItemId(0));
        assert_eq!(ItemId(u64::MAX).next(), ItemId(u64::MAX));
    }

    #[test]
    fn item_id_display() {
        assert_eq!(format!("{}", ItemId(7)), "item:7");
    }

    #[test]
    fn account_id_serde_is_plain_uuid() {
        let id = AccountId::named("carol");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
