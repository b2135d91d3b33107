//! Supply conservation invariant checker.
//!
//! Invariant enforced by the ledger:
//! ```text
//! Σ balances == total_supply == Σ(minted) − Σ(burned)
//! ```
//!
//! Transfers, allowance spends, and settlement only move currency between
//! accounts. The only way supply changes is a moderator mint or burn.
//!
//! Lifetime totals are kept modulo 2^128. Supply itself always fits in an
//! [`Amount`], so `minted − burned` taken with wrapping arithmetic is exact
//! however much currency has churned through mint and burn.

use tradepost_types::{Amount, Result, TradepostError};

/// Running totals of currency created and destroyed since genesis,
/// modulo 2^128.
#[derive(Debug, Clone, Default)]
pub struct SupplyConservation {
    minted: Amount,
    burned: Amount,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_mint(&mut self, amount: Amount) {
        self.minted = self.minted.wrapping_add(amount);
    }

    pub fn record_burn(&mut self, amount: Amount) {
        self.burned = self.burned.wrapping_add(amount);
    }

    /// Expected circulating supply: minted − burned.
    #[must_use]
    pub fn expected_supply(&self) -> Amount {
        self.minted.wrapping_sub(self.burned)
    }

    /// Lifetime minted total, modulo 2^128.
    #[must_use]
    pub fn total_minted(&self) -> Amount {
        self.minted
    }

    #[must_use]
    pub fn total_burned(&self) -> Amount {
        self.burned
    }

    /// Verify that `actual_supply` matches minted − burned.
    ///
    /// # Errors
    /// Returns [`TradepostError::SupplyInvariantViolation`] if they differ.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(TradepostError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (minted={}, burned={})",
                    self.minted, self.burned,
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_supply_is_zero() {
        let sc = SupplyConservation::new();
        assert_eq!(sc.expected_supply(), 0);
        assert!(sc.verify(0).is_ok());
    }

    #[test]
    fn mints_increase_expected() {
        let mut sc = SupplyConservation::new();
        sc.record_mint(1000);
        sc.record_mint(500);
        assert_eq!(sc.expected_supply(), 1500);
        assert_eq!(sc.total_minted(), 1500);
    }

    #[test]
    fn burns_decrease_expected() {
        let mut sc = SupplyConservation::new();
        sc.record_mint(1000);
        sc.record_burn(300);
        assert_eq!(sc.expected_supply(), 700);
        assert_eq!(sc.total_burned(), 300);
    }

    #[test]
    fn verify_fails_when_imbalanced() {
        let mut sc = SupplyConservation::new();
        sc.record_mint(10);
        let err = sc.verify(11).unwrap_err();
        assert!(matches!(
            err,
            TradepostError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn over_burn_is_a_violation() {
        let mut sc = SupplyConservation::new();
        sc.record_mint(5);
        sc.record_burn(6);
        assert!(sc.verify(0).is_err());
    }

    #[test]
    fn churn_past_amount_max_stays_exact() {
        let mut sc = SupplyConservation::new();
        sc.record_mint(Amount::MAX);
        sc.record_burn(Amount::MAX);
        sc.record_mint(1);
        assert_eq!(sc.expected_supply(), 1);
        assert!(sc.verify(1).is_ok());

        sc.record_mint(Amount::MAX - 1);
        assert_eq!(sc.expected_supply(), Amount::MAX);
        assert!(sc.verify(Amount::MAX).is_ok());
    }
}
