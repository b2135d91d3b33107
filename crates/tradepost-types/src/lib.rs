//! # tradepost-types
//!
//! Shared types, errors, and configuration for the **Tradepost** exchange
//! core.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`ItemId`]
//! - **Access control**: [`Role`]
//! - **Amounts**: [`Amount`]
//! - **Listing model**: [`Listing`], [`ListingState`]
//! - **Events**: [`MarketEvent`], [`EventRecord`], [`EventLog`]
//! - **Commands**: [`Command`], [`Outcome`]
//! - **Configuration**: [`MarketConfig`], [`CurrencyConfig`]
//! - **Errors**: [`TradepostError`] with `TP_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod amount;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod listing;
pub mod role;

// Re-export all primary types at crate root for ergonomic imports:
//   use tradepost_types::{AccountId, ItemId, Listing, TradepostError, ...};

pub use amount::*;
pub use command::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use listing::*;
pub use role::*;

// Constants are accessed via `tradepost_types::constants::FOO`
// (not re-exported to avoid name collisions).
