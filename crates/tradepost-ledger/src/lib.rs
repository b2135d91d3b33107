//! # tradepost-ledger
//!
//! **Currency Ledger**: fungible balances, third-party spending allowances,
//! and privileged mint/burn gated by an access-control policy. A leaf
//! component: it depends on nothing but the shared types.
//!
//! ## Components
//!
//! 1. **AccessControl**: set of `(account, role)` grants with admin-gated
//!    grant/revoke
//! 2. **SupplyConservation**: tracks minted and burned totals and checks
//!    `Σ balances == minted − burned`
//! 3. **CurrencyLedger**: balances, allowances, and the entry points that
//!    move currency

pub mod access_control;
pub mod ledger;
pub mod supply_conservation;

pub use access_control::AccessControl;
pub use ledger::CurrencyLedger;
pub use supply_conservation::SupplyConservation;
