//! Error types for the Tradepost exchange core.
//!
//! All errors use the `TP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Item registry errors
//! - 2xx: Listing errors
//! - 3xx: Currency errors
//! - 4xx: Access-control errors
//! - 5xx: Settlement errors
//! - 9xx: General / configuration errors

use thiserror::Error;

use crate::{AccountId, Amount, ItemId, Role};

/// Central error enum for all Tradepost operations.
///
/// Every failure is a deterministic function of ledger state and input.
/// There are no transient failure modes inside the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradepostError {
    // =================================================================
    // Item Errors (1xx)
    // =================================================================
    /// The referenced item was never minted.
    #[error("TP_ERR_100: Item not found: {0}")]
    NotFound(ItemId),

    /// The account does not own the item it is acting on.
    #[error("TP_ERR_101: Account {account} does not own {item}")]
    NotOwner { account: AccountId, item: ItemId },

    // =================================================================
    // Listing Errors (2xx)
    // =================================================================
    /// Listing price must be strictly positive.
    #[error("TP_ERR_200: Invalid price: must be greater than zero")]
    InvalidPrice,

    /// The item has no active listing.
    #[error("TP_ERR_201: Item not listed: {0}")]
    NotListed(ItemId),

    /// The buyer already owns the item.
    #[error("TP_ERR_202: Self-purchase blocked: {account} already owns {item}")]
    SelfPurchase { account: AccountId, item: ItemId },

    // =================================================================
    // Currency Errors (3xx)
    // =================================================================
    /// Not enough currency in the paying account.
    #[error("TP_ERR_300: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// The spender's allowance does not cover the amount.
    #[error("TP_ERR_301: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    /// A balance or total supply would exceed `Amount::MAX`.
    #[error("TP_ERR_302: Amount overflow")]
    AmountOverflow,

    // =================================================================
    // Access Errors (4xx)
    // =================================================================
    /// The caller lacks the role required by the operation.
    #[error("TP_ERR_400: Unauthorized: {account} is missing {role}")]
    Unauthorized { account: AccountId, role: Role },

    // =================================================================
    // Settlement Errors (5xx)
    // =================================================================
    /// A listing entry point was re-entered while a settlement was running.
    #[error("TP_ERR_500: Reentrant call rejected: settlement in progress")]
    ReentrantCall,

    /// Supply conservation invariant violated. Critical safety alert.
    #[error("TP_ERR_501: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Invalid configuration.
    #[error("TP_ERR_900: Configuration error: {0}")]
    Configuration(String),
}

/// Fieldless failure category, for callers that branch on the kind of
/// rejection rather than its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotOwner,
    InvalidPrice,
    NotListed,
    SelfPurchase,
    InsufficientBalance,
    InsufficientAllowance,
    AmountOverflow,
    Unauthorized,
    ReentrantCall,
    SupplyInvariantViolation,
    Configuration,
}

impl TradepostError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotOwner { .. } => ErrorKind::NotOwner,
            Self::InvalidPrice => ErrorKind::InvalidPrice,
            Self::NotListed(_) => ErrorKind::NotListed,
            Self::SelfPurchase { .. } => ErrorKind::SelfPurchase,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::InsufficientAllowance { .. } => ErrorKind::InsufficientAllowance,
            Self::AmountOverflow => ErrorKind::AmountOverflow,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ReentrantCall => ErrorKind::ReentrantCall,
            Self::SupplyInvariantViolation { .. } => ErrorKind::SupplyInvariantViolation,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// The `TP_ERR_` code alone, for structured log fields.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "TP_ERR_100",
            ErrorKind::NotOwner => "TP_ERR_101",
            ErrorKind::InvalidPrice => "TP_ERR_200",
            ErrorKind::NotListed => "TP_ERR_201",
            ErrorKind::SelfPurchase => "TP_ERR_202",
            ErrorKind::InsufficientBalance => "TP_ERR_300",
            ErrorKind::InsufficientAllowance => "TP_ERR_301",
            ErrorKind::AmountOverflow => "TP_ERR_302",
            ErrorKind::Unauthorized => "TP_ERR_400",
            ErrorKind::ReentrantCall => "TP_ERR_500",
            ErrorKind::SupplyInvariantViolation => "TP_ERR_501",
            ErrorKind::Configuration => "TP_ERR_900",
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TradepostError>;
