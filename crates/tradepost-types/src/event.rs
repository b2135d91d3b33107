//! Observable events emitted by the exchange core.
//!
//! Events are consumed by external collaborators (indexers, notifiers) and
//! never interpreted by the core itself. They are appended only when an
//! operation commits, so a rolled-back operation leaves no trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, ItemId, Role};

/// Something that happened to ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketEvent {
    ItemMinted {
        item: ItemId,
        owner: AccountId,
    },
    ItemTransferred {
        item: ItemId,
        from: AccountId,
        to: AccountId,
    },
    SaleListed {
        item: ItemId,
        price: Amount,
        seller: AccountId,
    },
    SaleCancelled {
        item: ItemId,
    },
    SaleCompleted {
        item: ItemId,
        price: Amount,
        seller: AccountId,
        buyer: AccountId,
    },
    /// `from` is `None` for a mint, `to` is `None` for a burn.
    CurrencyTransferred {
        from: Option<AccountId>,
        to: Option<AccountId>,
        amount: Amount,
    },
    Approval {
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    },
    RoleGranted {
        role: Role,
        account: AccountId,
        sender: AccountId,
    },
    RoleRevoked {
        role: Role,
        account: AccountId,
        sender: AccountId,
    },
}

impl MarketEvent {
    /// Short upper-case name, for log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ItemMinted { .. } => "ITEM_MINTED",
            Self::ItemTransferred { .. } => "ITEM_TRANSFERRED",
            Self::SaleListed { .. } => "SALE_LISTED",
            Self::SaleCancelled { .. } => "SALE_CANCELLED",
            Self::SaleCompleted { .. } => "SALE_COMPLETED",
            Self::CurrencyTransferred { .. } => "CURRENCY_TRANSFERRED",
            Self::Approval { .. } => "APPROVAL",
            Self::RoleGranted { .. } => "ROLE_GRANTED",
            Self::RoleRevoked { .. } => "ROLE_REVOKED",
        }
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A committed event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub sequence: u64,
    pub event: MarketEvent,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, assigning the next sequence number.
    pub fn record(&mut self, event: MarketEvent) -> u64 {
        let sequence = self.records.len() as u64;
        self.records.push(EventRecord {
            sequence,
            event,
            recorded_at: Utc::now(),
        });
        sequence
    }

    /// Discard every record from sequence `len` onwards. Used when an
    /// operation that already recorded events is rolled back.
    pub fn rollback_to(&mut self, len: usize) {
        self.records.truncate(len);
    }

    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records with `sequence >= from`.
    #[must_use]
    pub fn since(&self, from: u64) -> &[EventRecord] {
        let start = usize::try_from(from).unwrap_or(usize::MAX).min(self.records.len());
        &self.records[start..]
    }

    #[must_use]
    pub fn last(&self) -> Option<&MarketEvent> {
        self.records.last().map(|r| &r.event)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
