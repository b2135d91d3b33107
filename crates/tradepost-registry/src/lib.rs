//! # tradepost-registry
//!
//! **Item Registry**: the set of non-fungible items, their identity, and
//! their current owner. A leaf component: it depends on nothing but the
//! shared types.
//!
//! ## Invariants
//!
//! - Item ids are assigned densely from `0` and never reused
//! - Every minted item has exactly one owner at all times
//! - Items are never destroyed

pub mod registry;

pub use registry::ItemRegistry;
