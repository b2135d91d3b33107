//! Currency amounts.
//!
//! Amounts are unsigned integers in the currency's smallest unit, so a
//! balance can never go negative by construction. Additions are checked.

use crate::{Result, TradepostError};

/// An integer quantity of the fungible currency.
pub type Amount = u128;

/// `a + b`, or [`TradepostError::AmountOverflow`].
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_add(b).ok_or(TradepostError::AmountOverflow)
}
