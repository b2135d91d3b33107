//! Serializable form of every public entry point.
//!
//! The caller is never part of a command: the execution environment
//! supplies it alongside.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, ItemId, Role};

/// One invocation of a public operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MintItem,
    TransferItem { to: AccountId, item: ItemId },
    ListItem { item: ItemId, price: Amount },
    CancelListing { item: ItemId },
    BuyItem { item: ItemId },
    Approve { spender: AccountId, amount: Amount },
    Transfer { to: AccountId, amount: Amount },
    TransferFrom { owner: AccountId, to: AccountId, amount: Amount },
    MintCurrency { to: AccountId, amount: Amount },
    BurnFrom { account: AccountId, amount: Amount },
    GrantRole { role: Role, account: AccountId },
    RevokeRole { role: Role, account: AccountId },
    RenounceRole { role: Role },
}

impl Command {
    /// Whether this command enters the listing engine (and is therefore
    /// subject to the reentrancy guard).
    #[must_use]
    pub fn is_listing_operation(&self) -> bool {
        matches!(
            self,
            Self::ListItem { .. } | Self::CancelListing { .. } | Self::BuyItem { .. }
        )
    }

    /// Operation name, for log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MintItem => "mint_item",
            Self::TransferItem { .. } => "transfer_item",
            Self::ListItem { .. } => "list_item",
            Self::CancelListing { .. } => "cancel_listing",
            Self::BuyItem { .. } => "buy_item",
            Self::Approve { .. } => "approve",
            Self::Transfer { .. } => "transfer",
            Self::TransferFrom { .. } => "transfer_from",
            Self::MintCurrency { .. } => "mint_currency",
            Self::BurnFrom { .. } => "burn_from",
            Self::GrantRole { .. } => "grant_role",
            Self::RevokeRole { .. } => "revoke_role",
            Self::RenounceRole { .. } => "renounce_role",
        }
    }
}

/// What a successful command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A new item was minted.
    Minted(ItemId),
    /// A role grant/revoke/renounce ran. `true` if membership changed.
    RoleChanged(bool),
    /// Any other state change.
    Applied,
}
